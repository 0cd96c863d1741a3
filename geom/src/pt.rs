use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{trim_f64, Distance};

/// This represents world-space in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }

        Pt2D {
            x: trim_f64(x),
            y: trim_f64(y),
        }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn dist_to(self, to: Pt2D) -> Distance {
        Distance::meters(((self.x - to.x).powi(2) + (self.y - to.y).powi(2)).sqrt())
    }

    /// Removes adjacent points that're closer than `threshold` apart. The first point always
    /// survives.
    pub fn approx_dedupe(pts: Vec<Pt2D>, threshold: Distance) -> Vec<Pt2D> {
        let mut result: Vec<Pt2D> = Vec::new();
        for pt in pts {
            if result.is_empty() || result.last().unwrap().dist_to(pt) >= threshold {
                result.push(pt);
            }
        }
        result
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x(), self.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON_DIST;

    #[test]
    fn dedupe_adjacent() {
        let pts = vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(0.0, 0.0),
            Pt2D::new(5.0, 0.0),
            Pt2D::new(5.0, 0.000001),
            Pt2D::new(0.0, 0.0),
        ];
        assert_eq!(
            Pt2D::approx_dedupe(pts, EPSILON_DIST),
            vec![Pt2D::new(0.0, 0.0), Pt2D::new(5.0, 0.0), Pt2D::new(0.0, 0.0)]
        );
    }
}
