//! Shared fixtures for unit tests.

/// Thin slab blade in the unrolled plane: pressure side on `r·θ = -t`,
/// suction side on `r·θ = +t`, pointed tips on `r·θ = 0`, `m` rows `h` apart.
///
/// Returns `(pressure, suction)` as `(r·θ, z)` pairs, both running tip to tip,
/// so the pressure side followed by the reversed suction side closes on itself.
pub(crate) fn slab_surfaces(t: f64, h: f64, m: u32) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let tail = f64::from(m + 1) * h;
    let side = |rt: f64| {
        let mut pts = vec![(0.0, 0.0)];
        pts.extend((1..=m).map(|k| (rt, f64::from(k) * h)));
        pts.push((0.0, tail));
        pts
    };
    (side(-t), side(t))
}
