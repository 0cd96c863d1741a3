//! 2D geometry for curb math. Everything operates in flat world-space measured in meters;
//! `LonLat` and `GPSBounds` map between that space and the WGS84 coordinates in the input.
//!
//! All coordinates get trimmed to a fixed precision on construction, so point equality and
//! ordering behave predictably.

#[macro_use]
extern crate anyhow;

mod distance;
mod gps;
mod line;
mod polyline;
mod pt;
mod ring;

pub use crate::distance::Distance;
pub use crate::gps::{GPSBounds, LonLat};
pub use crate::line::{line_intersection, Line};
pub use crate::polyline::PolyLine;
pub use crate::pt::Pt2D;
pub use crate::ring::Ring;

/// Two points closer than this are considered the same point.
pub const EPSILON_DIST: Distance = Distance::const_meters(0.01);

/// Reduce the precision of an f64. This makes equality checks work and keeps serialized
/// output from dragging along 17 significant digits of noise.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
