mod endwalls;
mod passage;
mod profile;

pub use endwalls::Endwalls;
pub use passage::{extend_to_radius, Axis, PeriodicPassage, PreparePassage};
pub use profile::ProfileSections;

use std::f64::consts::TAU;
use std::path::Path;

use crate::error::{DomainError, Result};
use crate::geometry::CartesianCurve;
use crate::io::load_fpd;

/// A blade row: pressure and suction surfaces sampled at matching radial sections.
#[derive(Debug, Clone)]
pub struct Blade {
    name: String,
    blade_count: u32,
    pressure: Vec<CartesianCurve>,
    suction: Vec<CartesianCurve>,
    interface_location: f64,
}

impl Blade {
    /// Creates a blade from its surface sections, ordered by radius.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBladeCount`] if `blade_count == 0`, or
    /// [`DomainError::SectionCountMismatch`] if the surfaces have a different
    /// number of sections.
    pub fn new(
        name: impl Into<String>,
        blade_count: u32,
        pressure: Vec<CartesianCurve>,
        suction: Vec<CartesianCurve>,
    ) -> Result<Self> {
        if blade_count == 0 {
            return Err(DomainError::InvalidBladeCount.into());
        }
        if pressure.len() != suction.len() {
            return Err(DomainError::SectionCountMismatch {
                pressure: pressure.len(),
                suction: suction.len(),
            }
            .into());
        }
        Ok(Self {
            name: name.into(),
            blade_count,
            pressure,
            suction,
            interface_location: 0.0,
        })
    }

    /// Loads both surfaces from point data files.
    ///
    /// # Errors
    ///
    /// Propagates loader errors unchanged (a missing file is
    /// [`IoError::NotFound`](crate::error::IoError::NotFound)), plus the
    /// checks of [`Blade::new`].
    pub fn load(
        name: impl Into<String>,
        blade_count: u32,
        pressure_path: impl AsRef<Path>,
        suction_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let pressure = load_fpd(pressure_path)?.into_sections();
        let suction = load_fpd(suction_path)?.into_sections();
        Self::new(name, blade_count, pressure, suction)
    }

    /// Sets the axial location of the interface to the neighbouring row.
    #[must_use]
    pub fn with_interface_location(mut self, location: f64) -> Self {
        self.interface_location = location;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn blade_count(&self) -> u32 {
        self.blade_count
    }

    #[must_use]
    pub fn pressure(&self) -> &[CartesianCurve] {
        &self.pressure
    }

    #[must_use]
    pub fn suction(&self) -> &[CartesianCurve] {
        &self.suction
    }

    #[must_use]
    pub fn interface_location(&self) -> f64 {
        self.interface_location
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.pressure.len()
    }

    /// Angle between adjacent blades, `2π / blade_count`.
    #[must_use]
    pub fn pitch_angle_rad(&self) -> f64 {
        TAU / f64::from(self.blade_count)
    }
}
