use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D, EPSILON_DIST};

/// A line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    /// Creates a line segment between two points, which must not be the same.
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Result<Line> {
        if pt1.dist_to(pt2) < EPSILON_DIST {
            bail!("Line from {} to {} is too small", pt1, pt2);
        }
        Ok(Line(pt1, pt2))
    }

    /// Equivalent to `Line::new(pt1, pt2).unwrap()`. Use when the points are known to be
    /// distinct.
    pub fn must_new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line::new(pt1, pt2).unwrap()
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn length(&self) -> Distance {
        self.pt1().dist_to(self.pt2())
    }

    /// The point on the line `dist` along from the first point. `dist` may overshoot the
    /// length by a small epsilon (slack from repeated float math); it's clamped.
    pub fn dist_along(&self, dist: Distance) -> Result<Pt2D> {
        let len = self.length();
        if dist < Distance::ZERO || dist > len + EPSILON_DIST {
            bail!("dist_along {} of a line of length {}", dist, len);
        }
        let percent = (dist / len).min(1.0);
        Ok(Pt2D::new(
            self.pt1().x() + percent * (self.pt2().x() - self.pt1().x()),
            self.pt1().y() + percent * (self.pt2().y() - self.pt1().y()),
        ))
    }

    /// Perpendicular offset of the whole segment. Positive shifts to the right of the
    /// direction of travel, negative to the left.
    pub fn shift_either_direction(&self, width: Distance) -> Line {
        let dx = self.pt2().x() - self.pt1().x();
        let dy = self.pt2().y() - self.pt1().y();
        let len = self.length().inner_meters();
        // The direction of travel, rotated by 90 degrees
        let (nx, ny) = (-dy / len, dx / len);
        let w = width.inner_meters();
        Line(
            Pt2D::new(self.pt1().x() + w * nx, self.pt1().y() + w * ny),
            Pt2D::new(self.pt2().x() + w * nx, self.pt2().y() + w * ny),
        )
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line({}, {})", self.pt1(), self.pt2())
    }
}

/// Intersection of the two infinite lines containing these segments. None if they're
/// parallel.
pub fn line_intersection(l1: &Line, l2: &Line) -> Option<Pt2D> {
    let (x1, y1) = (l1.pt1().x(), l1.pt1().y());
    let (x2, y2) = (l1.pt2().x(), l1.pt2().y());
    let (x3, y3) = (l2.pt1().x(), l2.pt1().y());
    let (x4, y4) = (l2.pt2().x(), l2.pt2().y());

    let denominator = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denominator.abs() < 1e-9 {
        return None;
    }
    let numer_x = (x1 * y2 - y1 * x2) * (x3 - x4) - (x1 - x2) * (x3 * y4 - y3 * x4);
    let numer_y = (x1 * y2 - y1 * x2) * (y3 - y4) - (y1 - y2) * (x3 * y4 - y3 * x4);
    Some(Pt2D::new(numer_x / denominator, numer_y / denominator))
}
