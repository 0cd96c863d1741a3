//! Converts CurbLR curb regulations (<https://www.curblr.org>) into curb zone polygons
//! shaped like the Curb Data Specification's zones. The interesting part is geometric: the
//! input segments for one side of one street arrive unordered, overlapping, and with
//! arbitrary orientation, so a single directed curb line has to be reconstructed per
//! (street, side) before it can be cut into zones.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod classify;
pub mod curblr;
mod output;
pub mod reconstruct;
pub mod zones;

use anyhow::Result;

use geom::Distance;

use crate::zones::{Clock, IdSource};

/// Runs the whole pipeline: load CurbLR input, group it by (street, side), build the zones
/// for each group, and dump everything as one GeoJSON FeatureCollection.
pub fn convert(
    input: &str,
    output_path: &str,
    width: Distance,
    ids: &mut dyn IdSource,
    clock: &dyn Clock,
) -> Result<()> {
    let (segments, gps_bounds) = curblr::load_curb_segments(input)?;

    let mut zones = Vec::new();
    for (street_ref_id, by_side) in classify::group_by_street_and_side(segments) {
        for (side, group) in by_side {
            let group_zones = zones::build_curb_zones(&group, width, ids, clock)?;
            info!(
                "{} zones along the {} side of {}",
                group_zones.len(),
                side,
                street_ref_id
            );
            zones.extend(group_zones);
        }
    }

    info!("Writing {} zones to {}", zones.len(), output_path);
    output::write_zones(output_path, zones, &gps_bounds)
}
