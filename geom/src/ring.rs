use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{GPSBounds, Pt2D};

/// Like a PolyLine, but closed: the first and last point are equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    // first equals last
    pts: Vec<Pt2D>,
}

impl Ring {
    pub fn new(pts: Vec<Pt2D>) -> Result<Ring> {
        if pts.len() < 4 {
            bail!("Can't make a ring with only {} points", pts.len());
        }
        if pts[0] != *pts.last().unwrap() {
            bail!("Ring isn't closed; starts at {}, ends at {}", pts[0], pts.last().unwrap());
        }
        if pts.windows(2).any(|pair| pair[0] == pair[1]) {
            bail!("Ring has repeat adjacent points");
        }
        Ok(Ring { pts })
    }

    /// Equivalent to `Ring::new(pts).unwrap()`.
    pub fn must_new(pts: Vec<Pt2D>) -> Ring {
        Ring::new(pts).unwrap()
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    /// Exports as a GeoJSON polygon with one exterior ring, converting back to WGS84 when
    /// bounds are given.
    pub fn to_geojson(&self, gps: Option<&GPSBounds>) -> geojson::Geometry {
        let ring: Vec<Vec<f64>> = if let Some(bounds) = gps {
            bounds
                .convert_back(&self.pts)
                .into_iter()
                .map(|pt| vec![pt.longitude, pt.latitude])
                .collect()
        } else {
            self.pts.iter().map(|pt| vec![pt.x(), pt.y()]).collect()
        };
        geojson::Geometry::new(geojson::Value::Polygon(vec![ring]))
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Ring::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}
