//! Blade-surface conditioning and periodic midline extraction.
//!
//! Surface sections of a turbomachinery blade are unrolled into the
//! `(r·θ, z)` plane, where the midline between a blade and its neighbour one
//! pitch away is found from Voronoi bisectors. The resulting point sequences
//! are handed to a CAD backend to loft and revolve the periodic fluid domain.

pub mod blade;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;

pub use error::{ProtobladeError, Result};

#[cfg(test)]
pub(crate) mod test_support;
