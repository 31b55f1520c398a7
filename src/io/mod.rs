//! Formatted point data (`.fpd`) files.
//!
//! The first line holds two integers, `n_pts n_curve`. Every following
//! non-blank line holds one point as three numbers `x y z`. With more than
//! one curve the points are split curve-major into `n_curve` curves of
//! `n_pts` points each.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{DomainError, IoError, Result};
use crate::geometry::CartesianCurve;
use crate::math::Point3;

/// Contents of a point data file.
///
/// The shape follows the header: a file declaring at most one curve loads as
/// a flat [`PointData::Single`] (and its point count is not checked against
/// `n_pts`), anything else as [`PointData::Multi`].
#[derive(Debug, Clone, PartialEq)]
pub enum PointData {
    Single(CartesianCurve),
    Multi(Vec<CartesianCurve>),
}

impl PointData {
    /// Returns the curves as a list, wrapping a single curve.
    #[must_use]
    pub fn into_sections(self) -> Vec<CartesianCurve> {
        match self {
            Self::Single(curve) => vec![curve],
            Self::Multi(curves) => curves,
        }
    }

    /// Total number of points across all curves.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match self {
            Self::Single(curve) => curve.len(),
            Self::Multi(curves) => curves.iter().map(Vec::len).sum(),
        }
    }
}

/// Loads a point data file.
///
/// # Errors
///
/// Returns [`IoError::NotFound`] if the file does not exist, [`IoError::Parse`]
/// for malformed content, and [`DomainError::LengthMismatch`] if a multi-curve
/// file does not hold `n_pts * n_curve` points.
pub fn load_fpd(path: impl AsRef<Path>) -> Result<PointData> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| IoError::from_io(path.to_path_buf(), e))?;
    let data = parse_fpd(&text)?;
    debug!(path = %path.display(), points = data.point_count(), "loaded point data");
    Ok(data)
}

/// Parses the text of a point data file. See [`load_fpd`].
///
/// # Errors
///
/// Same as [`load_fpd`], without the file access errors.
pub fn parse_fpd(text: &str) -> Result<PointData> {
    let mut lines = text.lines().enumerate();
    let (n_pts, n_curve) = match lines.next() {
        Some((_, header)) => parse_header(header)?,
        None => return Err(parse_error(0, "missing header")),
    };

    // The header is not trusted for sizing: single-curve files never check it.
    let mut points = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        points.push(parse_point(index, line)?);
    }

    if n_curve <= 1 {
        return Ok(PointData::Single(points));
    }

    let expected = n_pts.saturating_mul(n_curve);
    if points.len() != expected {
        return Err(DomainError::LengthMismatch {
            operation: "point data reshape",
            left: points.len(),
            right: expected,
        }
        .into());
    }
    if n_pts == 0 {
        return Ok(PointData::Multi(vec![Vec::new(); n_curve]));
    }
    Ok(PointData::Multi(
        points.chunks(n_pts).map(<[Point3]>::to_vec).collect(),
    ))
}

/// Writes curves of equal length as a point data file.
///
/// # Errors
///
/// Returns [`DomainError::LengthMismatch`] if the curves differ in length,
/// or an [`IoError`] if the file cannot be written.
pub fn write_fpd(path: impl AsRef<Path>, curves: &[CartesianCurve]) -> Result<()> {
    let path = path.as_ref();
    let n_pts = curves.first().map_or(0, Vec::len);
    if let Some(curve) = curves.iter().find(|c| c.len() != n_pts) {
        return Err(DomainError::LengthMismatch {
            operation: "point data write",
            left: curve.len(),
            right: n_pts,
        }
        .into());
    }

    let to_io = |e: std::io::Error| IoError::from_io(path.to_path_buf(), e);
    let file = fs::File::create(path).map_err(to_io)?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{n_pts} {}", curves.len()).map_err(to_io)?;
    for p in curves.iter().flatten() {
        writeln!(out, "{} {} {}", p.x, p.y, p.z).map_err(to_io)?;
    }
    out.flush().map_err(to_io)?;
    Ok(())
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [n_pts, n_curve] = fields.as_slice() else {
        return Err(parse_error(0, "header must hold `n_pts n_curve`"));
    };
    let parse = |s: &str| {
        s.parse::<usize>()
            .map_err(|e| parse_error(0, &format!("invalid count {s:?}: {e}")))
    };
    Ok((parse(*n_pts)?, parse(*n_curve)?))
}

fn parse_point(index: usize, line: &str) -> Result<Point3> {
    let mut coords = [0.0; 3];
    let mut fields = line.split_whitespace();
    for c in &mut coords {
        let field = fields
            .next()
            .ok_or_else(|| parse_error(index, "expected three coordinates"))?;
        *c = field
            .parse::<f64>()
            .map_err(|e| parse_error(index, &format!("invalid coordinate {field:?}: {e}")))?;
    }
    if fields.next().is_some() {
        return Err(parse_error(index, "expected three coordinates"));
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// `index` is the 0-based line index.
fn parse_error(index: usize, message: &str) -> crate::ProtobladeError {
    IoError::Parse {
        line: index + 1,
        message: message.to_owned(),
    }
    .into()
}
