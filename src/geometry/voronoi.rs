use spade::{DelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// Computes the vertices of the planar Voronoi diagram of a set of sites.
pub trait PlanarVoronoiBuilder {
    /// Returns the Voronoi vertices of `sites`, in no particular order.
    ///
    /// Duplicate sites are merged. Fewer than three non-collinear sites have
    /// no vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if a site cannot be inserted (e.g. non-finite coordinates).
    fn vertices(&self, sites: &[Point2]) -> Result<Vec<Point2>>;
}

/// Voronoi vertices as circumcenters of a `spade` Delaunay triangulation.
///
/// Cocircular sites yield one vertex per Delaunay triangle, so coincident
/// vertices may be reported more than once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpadeVoronoi;

impl PlanarVoronoiBuilder for SpadeVoronoi {
    fn vertices(&self, sites: &[Point2]) -> Result<Vec<Point2>> {
        let mut points: Vec<SpadePoint2<f64>> =
            sites.iter().map(|p| SpadePoint2::new(p.x, p.y)).collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points.dedup();

        let triangulation = DelaunayTriangulation::<SpadePoint2<f64>>::bulk_load(points)
            .map_err(|e: InsertionError| GeometryError::Voronoi(format!("site insert: {e}")))?;

        Ok(triangulation
            .inner_faces()
            .map(|face| {
                let c = face.circumcenter();
                Point2::new(c.x, c.y)
            })
            .collect())
    }
}
