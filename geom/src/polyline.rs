use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{line_intersection, Distance, Line, Pt2D, EPSILON_DIST};

/// An ordered sequence of at least two points, with all adjacent points distinct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyLine {
    pts: Vec<Pt2D>,
    length: Distance,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        if pts.len() < 2 {
            bail!("Need at least two points for a PolyLine");
        }
        for pair in pts.windows(2) {
            if pair[0].dist_to(pair[1]) < EPSILON_DIST {
                bail!("PolyLine has ~dupe adjacent pts {} and {}", pair[0], pair[1]);
            }
        }
        let length = pts.windows(2).fold(Distance::ZERO, |so_far, pair| {
            so_far + pair[0].dist_to(pair[1])
        });
        Ok(PolyLine { pts, length })
    }

    /// Equivalent to `PolyLine::new(pts).unwrap()`.
    pub fn must_new(pts: Vec<Pt2D>) -> PolyLine {
        PolyLine::new(pts).unwrap()
    }

    /// Like `new`, but first dropping adjacent points that're effectively the same.
    pub fn deduping_new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        PolyLine::new(Pt2D::approx_dedupe(pts, EPSILON_DIST))
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.pts
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.pts.windows(2).map(|pair| Line::must_new(pair[0], pair[1]))
    }

    pub fn length(&self) -> Distance {
        self.length
    }

    pub fn first_pt(&self) -> Pt2D {
        self.pts[0]
    }

    pub fn last_pt(&self) -> Pt2D {
        *self.pts.last().unwrap()
    }

    pub fn reversed(&self) -> PolyLine {
        let mut pts = self.pts.clone();
        pts.reverse();
        PolyLine::must_new(pts)
    }

    /// Extracts the sub-polyline between two distances along this one. `end` may overshoot
    /// the total length by a small epsilon (slack from percentage math); it's clamped.
    pub fn maybe_exact_slice(&self, start: Distance, end: Distance) -> Result<PolyLine> {
        if start < Distance::ZERO || end < Distance::ZERO || start >= end {
            bail!("Can't get a polyline slice [{}, {}]", start, end);
        }
        if end > self.length + EPSILON_DIST {
            bail!(
                "Slice [{}, {}] ends past the polyline's length, {}",
                start,
                end,
                self.length
            );
        }

        let mut result: Vec<Pt2D> = Vec::new();
        let mut dist_so_far = Distance::ZERO;

        for line in self.lines() {
            let length = line.length();

            // Does this line contain the first point of the slice?
            if result.is_empty() && dist_so_far + length >= start {
                result.push(line.dist_along(start - dist_so_far)?);
            }

            // Does this line contain the last point of the slice?
            if dist_so_far + length >= end {
                result.push(line.dist_along(end - dist_so_far)?);
                return PolyLine::deduping_new(result);
            }

            // In the middle of the slice; just collect the endpoint.
            if !result.is_empty() {
                result.push(line.pt2());
            }

            dist_so_far += length;
        }

        if result.is_empty() {
            bail!(
                "Slice [{}, {}] has a start too big for polyline of length {}",
                start,
                end,
                self.length
            );
        }

        // end only overshot the length by floating point slack
        result.push(self.last_pt());
        PolyLine::deduping_new(result)
    }

    /// Equivalent to `maybe_exact_slice(start, end).unwrap()`.
    pub fn exact_slice(&self, start: Distance, end: Distance) -> PolyLine {
        self.maybe_exact_slice(start, end).unwrap()
    }

    /// Shifts the polyline sideways to the right of the direction of travel, preserving the
    /// number of points.
    pub fn shift_right(&self, width: Distance) -> Result<PolyLine> {
        self.shift_with_sharp_angles(width)
    }

    /// Shifts the polyline sideways to the left of the direction of travel, preserving the
    /// number of points.
    pub fn shift_left(&self, width: Distance) -> Result<PolyLine> {
        self.shift_with_sharp_angles(-width)
    }

    fn shift_with_sharp_angles(&self, width: Distance) -> Result<PolyLine> {
        if self.pts.len() == 2 {
            let l = Line::must_new(self.pts[0], self.pts[1]).shift_either_direction(width);
            return PolyLine::new(vec![l.pt1(), l.pt2()]);
        }

        let mut result: Vec<Pt2D> = Vec::new();

        let mut pt3_idx = 2;
        let mut pt1_raw = self.pts[0];
        let mut pt2_raw = self.pts[1];

        loop {
            let pt3_raw = self.pts[pt3_idx];

            let l1 = Line::must_new(pt1_raw, pt2_raw).shift_either_direction(width);
            let l2 = Line::must_new(pt2_raw, pt3_raw).shift_either_direction(width);
            // When the lines are perfectly parallel, the shared endpoint shifts to the same
            // place either way.
            let pt2_shift = line_intersection(&l1, &l2).unwrap_or_else(|| l1.pt2());

            if pt3_idx == 2 {
                result.push(l1.pt1());
            }
            result.push(pt2_shift);
            if pt3_idx == self.pts.len() - 1 {
                result.push(l2.pt2());
                break;
            }

            pt1_raw = pt2_raw;
            pt2_raw = pt3_raw;
            pt3_idx += 1;
        }

        assert_eq!(result.len(), self.pts.len());
        PolyLine::new(result)
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "PolyLine::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}
