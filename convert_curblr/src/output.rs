//! Dumps zones as a GeoJSON FeatureCollection: each zone's polygon as the feature geometry,
//! everything else as properties.

use std::io::Write;

use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson};

use geom::GPSBounds;

use crate::zones::Zone;

pub fn write_zones(path: &str, zones: Vec<Zone>, gps_bounds: &GPSBounds) -> Result<()> {
    let gj = zones_to_geojson(zones, gps_bounds)?;
    let mut file = fs_err::File::create(path)?;
    write!(file, "{}", serde_json::to_string_pretty(&gj)?)?;
    Ok(())
}

fn zones_to_geojson(zones: Vec<Zone>, gps_bounds: &GPSBounds) -> Result<GeoJson> {
    let mut features = Vec::new();
    for zone in zones {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(zone.geometry.to_geojson(Some(gps_bounds))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("curb_zone_id", zone.curb_zone_id);
        feature.set_property("curb_policy_ids", serde_json::to_value(&zone.curb_policy_ids)?);
        feature.set_property("published_date", zone.published_date.to_rfc3339());
        feature.set_property("last_updated_date", zone.last_updated_date.to_rfc3339());
        feature.set_property("start_date", zone.start_date.to_rfc3339());
        feature.set_property("street_name", zone.street_name);
        feature.set_property("curb_area_ids", serde_json::to_value(&zone.curb_area_ids)?);
        feature.set_property(
            "location_references",
            serde_json::to_value(&zone.location_references)?,
        );
        features.push(feature);
    }

    Ok(GeoJson::FeatureCollection(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }))
}
