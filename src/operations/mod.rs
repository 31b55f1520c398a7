mod build_midlines;
mod extrude_radially;
mod find_midline;

pub use build_midlines::{BuildMidlines, UnrolledLoop};
pub use extrude_radially::ExtrudeRadially;
pub use find_midline::{FindMidline, MidlineParams};
