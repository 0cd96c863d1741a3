use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D};

/// Longitude is x, latitude is y. Not trimmed like `Pt2D`; a ten-thousandth of a degree is
/// about 11 meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Haversine distance.
    pub fn gps_dist_meters(self, other: LonLat) -> Distance {
        let earth_radius_m = 6_371_000.0;
        let lon1 = self.longitude.to_radians();
        let lon2 = other.longitude.to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        let a = (delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(earth_radius_m * c)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

/// The WGS84 bounding box of a dataset, used to map between lon/lat and world-space meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GPSBounds {
    pub(crate) min_lon: f64,
    pub(crate) min_lat: f64,
    pub(crate) max_lon: f64,
    pub(crate) max_lat: f64,
}

impl GPSBounds {
    pub fn new() -> GPSBounds {
        GPSBounds {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        }
    }

    pub fn from(pts: &[LonLat]) -> GPSBounds {
        let mut b = GPSBounds::new();
        for pt in pts {
            b.update(*pt);
        }
        b
    }

    pub fn update(&mut self, pt: LonLat) {
        self.min_lon = self.min_lon.min(pt.longitude);
        self.max_lon = self.max_lon.max(pt.longitude);
        self.min_lat = self.min_lat.min(pt.latitude);
        self.max_lat = self.max_lat.max(pt.latitude);
    }

    // Width and height of the covered area, in meters.
    fn world_size(&self) -> (f64, f64) {
        let base = LonLat::new(self.min_lon, self.min_lat);
        let width = base.gps_dist_meters(LonLat::new(self.max_lon, self.min_lat));
        let height = base.gps_dist_meters(LonLat::new(self.min_lon, self.max_lat));
        (width.inner_meters(), height.inner_meters())
    }

    fn convert_one(&self, pt: LonLat) -> Pt2D {
        let (width, height) = self.world_size();
        let x = if self.max_lon == self.min_lon {
            0.0
        } else {
            (pt.longitude - self.min_lon) / (self.max_lon - self.min_lon) * width
        };
        // Invert y, so that the northernmost latitude is 0. Screen drawing order, not
        // Cartesian grid.
        let y = if self.max_lat == self.min_lat {
            0.0
        } else {
            (self.max_lat - pt.latitude) / (self.max_lat - self.min_lat) * height
        };
        Pt2D::new(x, y)
    }

    fn convert_back_one(&self, pt: Pt2D) -> LonLat {
        let (width, height) = self.world_size();
        let lon = if width == 0.0 {
            self.min_lon
        } else {
            self.min_lon + pt.x() / width * (self.max_lon - self.min_lon)
        };
        let lat = if height == 0.0 {
            self.max_lat
        } else {
            self.max_lat - pt.y() / height * (self.max_lat - self.min_lat)
        };
        LonLat::new(lon, lat)
    }

    pub fn convert(&self, pts: &[LonLat]) -> Vec<Pt2D> {
        pts.iter().map(|pt| self.convert_one(*pt)).collect()
    }

    pub fn convert_back(&self, pts: &[Pt2D]) -> Vec<LonLat> {
        pts.iter().map(|pt| self.convert_back_one(*pt)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_round_trips() {
        let pts = vec![
            LonLat::new(-73.5673, 45.5017),
            LonLat::new(-73.5612, 45.5088),
            LonLat::new(-73.5591, 45.5035),
        ];
        let bounds = GPSBounds::from(&pts);
        let world = bounds.convert(&pts);

        // The northernmost point maps to y=0
        assert_eq!(world[1].y(), 0.0);
        // The westernmost point maps to x=0
        assert_eq!(world[0].x(), 0.0);

        for (orig, back) in pts.iter().zip(bounds.convert_back(&world)) {
            assert!((orig.longitude - back.longitude).abs() < 1e-5);
            assert!((orig.latitude - back.latitude).abs() < 1e-5);
        }
    }
}
