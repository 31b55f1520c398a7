use tracing::{info, instrument};

use crate::blade::{Blade, Endwalls};
use crate::error::Result;
use crate::geometry::{min_radius, CartesianCurve};
use crate::math::Point3;
use crate::operations::{BuildMidlines, ExtrudeRadially, MidlineParams};

/// Overshoot applied when extending the innermost section to the endwall, so
/// the blade surfaces cut through it.
const RADIAL_OVERSHOOT: f64 = 1.1;

/// Rotation axis of the machine, given by two points on the axis line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub start: Point3,
    pub end: Point3,
}

impl Axis {
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// The z-axis through the origin.
    #[must_use]
    pub fn z() -> Self {
        Self::new(Point3::origin(), Point3::new(0.0, 0.0, 1.0))
    }
}

/// Prepends a section reaching below `endwall_min_r` when the innermost
/// section does not reach it.
///
/// The new section is the first one extruded radially by
/// `1.1 · (endwall_min_r − r_min)`, where `r_min` is its smallest radius.
/// Otherwise the sections are returned unchanged.
///
/// # Errors
///
/// Returns [`GeometryError::NegativeRadius`](crate::error::GeometryError::NegativeRadius)
/// if the extrusion would cross the axis.
pub fn extend_to_radius(
    sections: &[CartesianCurve],
    endwall_min_r: f64,
) -> Result<Vec<CartesianCurve>> {
    let Some(first) = sections.first() else {
        return Ok(Vec::new());
    };
    let r_min = min_radius(first).unwrap_or(endwall_min_r);
    if r_min <= endwall_min_r {
        return Ok(sections.to_vec());
    }

    let delta_r = RADIAL_OVERSHOOT * (endwall_min_r - r_min);
    let extended = ExtrudeRadially::new(first, delta_r).execute()?;

    let mut out = Vec::with_capacity(sections.len() + 1);
    out.push(extended);
    out.extend_from_slice(sections);
    Ok(out)
}

/// Geometry handed to the CAD backend to build the periodic passage solid.
#[derive(Debug, Clone)]
pub struct PeriodicPassage {
    /// Pressure surface sections, including any endwall extension.
    pub pressure: Vec<CartesianCurve>,
    /// Suction surface sections, including any endwall extension.
    pub suction: Vec<CartesianCurve>,
    /// One midline per section, to be lofted and revolved.
    pub midlines: Vec<CartesianCurve>,
    /// Hub and shroud, revolved (or imported) and intersected with the passage.
    pub endwalls: Endwalls,
    pub axis: Axis,
    pub pitch_angle_rad: f64,
}

impl PeriodicPassage {
    /// Revolution angle of the lofted midline surface, in degrees.
    #[must_use]
    pub fn revolve_angle_deg(&self) -> f64 {
        -self.pitch_angle_rad.to_degrees()
    }
}

/// Prepares the periodic passage of a blade row between its endwalls.
///
/// The midline window and the hub radius come from the endwall curves unless
/// set explicitly. STEP endwalls need an explicit window.
pub struct PreparePassage<'a> {
    blade: &'a Blade,
    endwalls: &'a Endwalls,
    axis: Axis,
    z_range: Option<(f64, f64)>,
    endwall_min_r: Option<f64>,
    params: MidlineParams,
}

impl<'a> PreparePassage<'a> {
    /// Creates a new `PreparePassage` operation.
    #[must_use]
    pub fn new(blade: &'a Blade, endwalls: &'a Endwalls, axis: Axis) -> Self {
        Self {
            blade,
            endwalls,
            axis,
            z_range: None,
            endwall_min_r: None,
            params: MidlineParams::default(),
        }
    }

    /// Overrides the axial window of the midlines.
    #[must_use]
    pub fn z_range(mut self, z_min: f64, z_max: f64) -> Self {
        self.z_range = Some((z_min, z_max));
        self
    }

    /// Overrides the hub radius both surfaces are extended down to.
    #[must_use]
    pub fn endwall_min_radius(mut self, r: f64) -> Self {
        self.endwall_min_r = Some(r);
        self
    }

    /// Sets the midline extraction parameters.
    #[must_use]
    pub fn params(mut self, params: MidlineParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the preparation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingExtent`](crate::error::DomainError::MissingExtent)
    /// if no axial window is set and the endwalls do not define one, or the
    /// first error of the radial extension or midline extraction.
    #[instrument(skip(self), fields(blade = self.blade.name()))]
    pub fn execute(&self) -> Result<PeriodicPassage> {
        let (z_min, z_max) = match self.z_range {
            Some(range) => range,
            None => self.endwalls.require_axial_extent()?,
        };

        let (pressure, suction) = match self.endwall_min_r.or_else(|| self.endwalls.min_radius()) {
            Some(r) => (
                extend_to_radius(self.blade.pressure(), r)?,
                extend_to_radius(self.blade.suction(), r)?,
            ),
            None => (self.blade.pressure().to_vec(), self.blade.suction().to_vec()),
        };

        let pitch_angle_rad = self.blade.pitch_angle_rad();
        let midlines = BuildMidlines::new(&pressure, &suction, z_min, z_max, pitch_angle_rad)
            .params(self.params)
            .execute()?;

        info!(
            sections = pressure.len(),
            extended = pressure.len() > self.blade.section_count(),
            z_min,
            z_max,
            "periodic passage prepared"
        );

        Ok(PeriodicPassage {
            pressure,
            suction,
            midlines,
            endwalls: self.endwalls.clone(),
            axis: self.axis,
            pitch_angle_rad,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::blade::ProfileSections;
    use crate::error::GeometryError;
    use crate::test_support::slab_surfaces;
    use approx::assert_abs_diff_eq;

    fn slab_blade(blade_count: u32) -> Blade {
        let (ps, ss) = slab_surfaces(0.02, 0.1, 10);
        let to_profile = |pts: &[(f64, f64)]| -> Vec<Point3> {
            pts.iter().map(|&(rt, z)| Point3::new(z, rt, 0.0)).collect()
        };
        let (ps, ss) = (to_profile(&ps), to_profile(&ss));
        let (pressure, suction) = ProfileSections::new(&ps, &ss, 3, 1.0, 1.2).execute().unwrap();
        Blade::new("slab", blade_count, pressure, suction).unwrap()
    }

    #[test]
    fn extension_prepends_inner_section() {
        let blade = slab_blade(31);
        let extended = extend_to_radius(blade.pressure(), 0.9).unwrap();
        assert_eq!(extended.len(), 4);
        assert_abs_diff_eq!(min_radius(&extended[0]).unwrap(), 0.89, epsilon = 1e-12);
        assert_eq!(extended[1], blade.pressure()[0]);
    }

    #[test]
    fn no_extension_when_section_reaches_endwall() {
        let blade = slab_blade(31);
        let sections = extend_to_radius(blade.pressure(), 1.0).unwrap();
        assert_eq!(sections, blade.pressure());
        assert!(extend_to_radius(&[], 0.5).unwrap().is_empty());
    }

    #[test]
    fn extension_through_axis_fails() {
        let blade = slab_blade(31);
        let err = extend_to_radius(blade.pressure(), -5.0).unwrap_err();
        assert!(matches!(
            err,
            crate::ProtobladeError::Geometry(GeometryError::NegativeRadius { .. })
        ));
    }

    /// Hub at r = 0.9 and shroud at r = 1.3, both spanning z = 0.3..0.8.
    fn annulus() -> Endwalls {
        Endwalls::Curves {
            hub: vec![Point3::new(0.9, 0.0, 0.3), Point3::new(0.9, 0.0, 0.8)],
            shroud: vec![Point3::new(1.3, 0.0, 0.3), Point3::new(1.3, 0.0, 0.8)],
        }
    }

    #[test]
    fn passage_midlines_follow_half_pitch() {
        let blade = slab_blade(31);
        let endwalls = annulus();
        let passage = PreparePassage::new(&blade, &endwalls, Axis::z()).execute().unwrap();

        assert_eq!(passage.pressure.len(), 4);
        assert_eq!(passage.suction.len(), 4);
        assert_eq!(passage.midlines.len(), 4);
        assert_eq!(passage.endwalls, endwalls);
        assert_abs_diff_eq!(passage.revolve_angle_deg(), -360.0 / 31.0, epsilon = 1e-12);

        let half_pitch = 0.5 * blade.pitch_angle_rad();
        for (midline, r) in passage.midlines.iter().zip([0.89, 1.0, 1.1, 1.2]) {
            assert_eq!(midline.len(), 200);
            assert_abs_diff_eq!(midline[0].z, 0.3);
            assert_abs_diff_eq!(midline[199].z, 0.8);
            for p in midline {
                assert_abs_diff_eq!(p.x.hypot(p.y), r, epsilon = 1e-9);
                assert_abs_diff_eq!(p.y.atan2(p.x), half_pitch, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn explicit_window_and_radius_override_endwalls() {
        let blade = slab_blade(31);
        let endwalls = annulus();
        let passage = PreparePassage::new(&blade, &endwalls, Axis::z())
            .z_range(0.4, 0.7)
            .endwall_min_radius(1.0)
            .execute()
            .unwrap();
        assert_eq!(passage.midlines.len(), blade.section_count());
        assert_abs_diff_eq!(passage.midlines[0][0].z, 0.4);
        assert_abs_diff_eq!(passage.midlines[0][199].z, 0.7);
    }

    #[test]
    fn step_endwalls_keep_sections() {
        let blade = slab_blade(31);
        let endwalls = Endwalls::step("hub_shroud.step");
        let passage = PreparePassage::new(&blade, &endwalls, Axis::z())
            .z_range(0.3, 0.8)
            .execute()
            .unwrap();
        assert_eq!(passage.midlines.len(), blade.section_count());
        assert_eq!(passage.axis, Axis::z());
        assert_eq!(passage.endwalls, endwalls);
    }

    #[test]
    fn step_endwalls_need_a_window() {
        let blade = slab_blade(31);
        let endwalls = Endwalls::step("hub_shroud.step");
        let err = PreparePassage::new(&blade, &endwalls, Axis::z()).execute().unwrap_err();
        assert!(matches!(
            err,
            crate::ProtobladeError::Domain(crate::error::DomainError::MissingExtent { .. })
        ));
    }
}
