use std::path::{Path, PathBuf};

use crate::error::{DomainError, Result};
use crate::geometry::{min_radius, CartesianCurve};
use crate::io::load_fpd;

/// Hub and shroud boundaries of the flow passage.
///
/// The curve form is a meridional profile revolved about the machine axis by
/// the CAD backend. A STEP reference is handed through untouched; its extent
/// is only known once the backend has imported it.
#[derive(Debug, Clone, PartialEq)]
pub enum Endwalls {
    Curves {
        hub: CartesianCurve,
        shroud: CartesianCurve,
    },
    Step(PathBuf),
}

impl Endwalls {
    /// Loads hub and shroud curves from point data files. Multi-curve files
    /// are joined in file order.
    ///
    /// # Errors
    ///
    /// Propagates loader errors. Returns [`DomainError::TooFewPoints`] if
    /// either curve is empty.
    pub fn load_curves(hub_path: impl AsRef<Path>, shroud_path: impl AsRef<Path>) -> Result<Self> {
        let hub = load_fpd(hub_path)?.into_sections().concat();
        let shroud = load_fpd(shroud_path)?.into_sections().concat();
        for curve in [&hub, &shroud] {
            if curve.is_empty() {
                return Err(DomainError::TooFewPoints {
                    operation: "endwall curve",
                    required: 1,
                    found: 0,
                }
                .into());
            }
        }
        Ok(Self::Curves { hub, shroud })
    }

    /// References endwalls stored in a STEP file.
    #[must_use]
    pub fn step(path: impl Into<PathBuf>) -> Self {
        Self::Step(path.into())
    }

    /// Axial extent `(z_min, z_max)` of the endwall profile, or `None` when
    /// it is not known without the CAD backend.
    #[must_use]
    pub fn axial_extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::Curves { hub, shroud } => {
                let zs = hub.iter().chain(shroud).map(|p| p.z);
                let z_min = zs.clone().reduce(f64::min)?;
                let z_max = zs.reduce(f64::max)?;
                Some((z_min, z_max))
            }
            Self::Step(_) => None,
        }
    }

    /// Smallest radius of the endwall profile, which lies on the hub.
    #[must_use]
    pub fn min_radius(&self) -> Option<f64> {
        match self {
            Self::Curves { hub, shroud } => match (min_radius(hub), min_radius(shroud)) {
                (Some(h), Some(s)) => Some(h.min(s)),
                (h, s) => h.or(s),
            },
            Self::Step(_) => None,
        }
    }

    /// Returns the axial window, failing if it is unknown.
    pub(crate) fn require_axial_extent(&self) -> Result<(f64, f64)> {
        self.axial_extent().ok_or_else(|| {
            DomainError::MissingExtent {
                parameter: "axial window",
            }
            .into()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::io::write_fpd;
    use crate::math::Point3;
    use approx::assert_abs_diff_eq;

    fn annulus() -> Endwalls {
        Endwalls::Curves {
            hub: vec![
                Point3::new(0.9, 0.0, -0.2),
                Point3::new(0.85, 0.1, 0.5),
                Point3::new(0.9, 0.0, 1.4),
            ],
            shroud: vec![Point3::new(1.3, 0.0, -0.25), Point3::new(1.3, 0.0, 1.5)],
        }
    }

    #[test]
    fn extent_spans_hub_and_shroud() {
        let (z_min, z_max) = annulus().axial_extent().unwrap();
        assert_abs_diff_eq!(z_min, -0.25);
        assert_abs_diff_eq!(z_max, 1.5);
        assert_abs_diff_eq!(annulus().min_radius().unwrap(), 0.85_f64.hypot(0.1));
    }

    #[test]
    fn step_reference_has_no_extent() {
        let endwalls = Endwalls::step("endwalls.step");
        assert_eq!(endwalls, Endwalls::Step(PathBuf::from("endwalls.step")));
        assert!(endwalls.axial_extent().is_none());
        assert!(endwalls.min_radius().is_none());
        assert!(matches!(
            endwalls.require_axial_extent().unwrap_err(),
            crate::ProtobladeError::Domain(DomainError::MissingExtent { .. })
        ));
    }

    #[test]
    fn curves_load_from_point_files() {
        let dir = std::env::temp_dir();
        let hub_path = dir.join(format!("protoblade-{}-hub.fpd", std::process::id()));
        let shroud_path = dir.join(format!("protoblade-{}-shroud.fpd", std::process::id()));
        let Endwalls::Curves { hub, shroud } = annulus() else {
            unreachable!()
        };
        write_fpd(&hub_path, &[hub.clone()]).unwrap();
        write_fpd(&shroud_path, &[shroud.clone()]).unwrap();

        let loaded = Endwalls::load_curves(&hub_path, &shroud_path).unwrap();
        let missing = Endwalls::load_curves(&hub_path, dir.join("protoblade-no-shroud.fpd"));
        std::fs::remove_file(&hub_path).unwrap();
        std::fs::remove_file(&shroud_path).unwrap();

        assert_eq!(loaded, Endwalls::Curves { hub, shroud });
        assert!(missing.unwrap_err().is_not_found());
    }
}
