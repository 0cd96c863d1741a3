//! The subset of the CurbLR format that zone generation needs: each feature's linear
//! reference along a SharedStreets edge, plus its LineString geometry. The input is assumed
//! to be valid CurbLR; nothing beyond the shape of these fields is checked.

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geom::{Distance, GPSBounds, LonLat, Pt2D};

/// One curb regulation from the input, with its geometry already in world-space.
#[derive(Clone, Debug)]
pub struct CurbSegment {
    pub street_ref_id: String,
    pub side_of_street: SideOfStreet,
    /// Linear reference along the street where this segment begins. Not guaranteed to be
    /// less than `location_end` for every record in the wild.
    pub location_start: Distance,
    pub location_end: Distance,
    pub street_name: String,
    /// The segment's physical shape. Whether it's drawn from `location_start` towards
    /// `location_end` or the other way around is not specified by the format.
    pub pts: Vec<Pt2D>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideOfStreet {
    Left,
    Right,
}

impl fmt::Display for SideOfStreet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SideOfStreet::Left => write!(f, "left"),
            SideOfStreet::Right => write!(f, "right"),
        }
    }
}

#[derive(Deserialize)]
struct RawCurbLr {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    properties: RawProperties,
    geometry: RawGeometry,
}

#[derive(Deserialize)]
struct RawProperties {
    location: RawLocation,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    shst_ref_id: String,
    shst_location_start: f64,
    shst_location_end: f64,
    side_of_street: SideOfStreet,
    street_name: Option<String>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    geometry_type: String,
    coordinates: serde_json::Value,
}

/// Reads a CurbLR GeoJSON file. Returns the segments in input order, projected to
/// world-space against the bounds of the whole dataset, along with those bounds.
pub fn load_curb_segments(path: &str) -> Result<(Vec<CurbSegment>, GPSBounds)> {
    let raw = fs_err::read_to_string(path)?;
    let result = parse_curb_segments(&raw).with_context(|| format!("parsing {}", path))?;
    info!("Loaded {} curb segments from {}", result.0.len(), path);
    Ok(result)
}

pub fn parse_curb_segments(raw_json: &str) -> Result<(Vec<CurbSegment>, GPSBounds)> {
    let raw: RawCurbLr = serde_json::from_str(raw_json)?;

    // One pass to find the bounds of the whole dataset, so every feature projects into the
    // same world-space.
    let mut gps_bounds = GPSBounds::new();
    let mut features = Vec::new();
    for feature in raw.features {
        if feature.geometry.geometry_type != "LineString" {
            bail!(
                "Curbs are LineStrings, but the input has a {}",
                feature.geometry.geometry_type
            );
        }
        let pts: Vec<LonLat> = serde_json::from_value::<Vec<Vec<f64>>>(feature.geometry.coordinates)?
            .into_iter()
            .map(|coord| match coord.as_slice() {
                [lon, lat, ..] => Ok(LonLat::new(*lon, *lat)),
                _ => Err(anyhow!("A coordinate doesn't have both a longitude and latitude")),
            })
            .collect::<Result<Vec<_>>>()?;
        for pt in &pts {
            gps_bounds.update(*pt);
        }
        features.push((feature.properties.location, pts));
    }

    let mut segments = Vec::new();
    for (location, pts) in features {
        segments.push(CurbSegment {
            street_ref_id: location.shst_ref_id,
            side_of_street: location.side_of_street,
            location_start: Distance::meters(location.shst_location_start),
            location_end: Distance::meters(location.shst_location_end),
            street_name: location.street_name.unwrap_or_default(),
            pts: gps_bounds.convert(&pts),
        });
    }
    Ok((segments, gps_bounds))
}
