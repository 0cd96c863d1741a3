//! Cuts a reconstructed curb line at every zone boundary and turns each piece into a curb
//! zone record: a sideways-offset polygon footprint plus the metadata downstream consumers
//! expect.

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use geom::{Distance, PolyLine, Ring};

use crate::curblr::{CurbSegment, SideOfStreet};
use crate::reconstruct::reconstruct_curb_line;

/// How far each zone polygon extends sideways from the curb line, unless the caller
/// overrides it.
pub const DEFAULT_ZONE_WIDTH: Distance = Distance::const_meters(5.0);

/// Produces identifiers for freshly minted zones. Injected so tests can use a predictable
/// sequence.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// The production id source.
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Supplies the timestamps stamped onto zones. Injected so tests are reproducible.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Where a zone sits along the source street.
#[derive(Clone, Debug, Serialize)]
pub struct LocationReference {
    pub source: String,
    pub ref_id: String,
    pub start: f64,
    pub end: f64,
    pub side: SideOfStreet,
}

/// One output curb zone. Policy and area associations are left empty for downstream
/// enrichment. Never mutated after creation.
#[derive(Debug)]
pub struct Zone {
    pub curb_zone_id: String,
    pub geometry: Ring,
    pub curb_policy_ids: Vec<String>,
    pub published_date: DateTime<Utc>,
    pub last_updated_date: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub street_name: String,
    pub curb_area_ids: Vec<String>,
    pub location_references: Vec<LocationReference>,
}

/// Every distinct linear reference used as a start or end in the group, sorted ascending.
/// Adjacent pairs bound one zone each.
pub fn find_zone_separations(group: &[CurbSegment]) -> Vec<Distance> {
    let mut separations: BTreeSet<Distance> = BTreeSet::new();
    for segment in group {
        separations.insert(segment.location_start);
        separations.insert(segment.location_end);
    }
    separations.into_iter().collect()
}

/// Cuts the curb line into one sub-line per adjacent separation pair. The linear references
/// are scaled onto the line's actual length, so the pieces tile it exactly.
fn slice_curb_line(line: &PolyLine, separations: &[Distance]) -> Result<Vec<PolyLine>> {
    let curb_start = separations[0];
    let curb_end = *separations.last().unwrap();
    if curb_end == curb_start {
        bail!(
            "Curb with boundaries only at {} has no extent to slice",
            curb_start
        );
    }
    let used_curb_length = curb_end - curb_start;

    let mut pieces = Vec::new();
    for pair in separations.windows(2) {
        let percent_start = (pair[0] - curb_start) / used_curb_length;
        let percent_end = (pair[1] - curb_start) / used_curb_length;
        pieces.push(line.maybe_exact_slice(
            line.length() * percent_start,
            line.length() * percent_end,
        )?);
    }
    Ok(pieces)
}

/// A zone footprint: the sub-line, then the same sub-line pushed sideways (away from the
/// street center), walked back, then closed at the first point. The shift keeps the point
/// count, so an n-point sub-line becomes a 2n+1 point ring.
fn build_zone_polygon(sub_line: &PolyLine, side: SideOfStreet, width: Distance) -> Result<Ring> {
    let offset = match side {
        SideOfStreet::Right => sub_line.shift_right(width)?,
        SideOfStreet::Left => sub_line.shift_left(width)?,
    };

    let mut pts = sub_line.points().clone();
    pts.extend(offset.reversed().into_points());
    pts.push(sub_line.first_pt());
    Ring::new(pts)
}

/// Builds every zone for one (street, side) group. Groups with fewer than two distinct
/// separations produce nothing.
pub fn build_curb_zones(
    group: &[CurbSegment],
    width: Distance,
    ids: &mut dyn IdSource,
    clock: &dyn Clock,
) -> Result<Vec<Zone>> {
    let full_curb_line = reconstruct_curb_line(group)?;
    let separations = find_zone_separations(group);
    if separations.len() < 2 {
        return Ok(Vec::new());
    }

    let representative = &group[0];
    let side = representative.side_of_street;

    let mut zones = Vec::new();
    for sub_line in slice_curb_line(&full_curb_line, &separations)? {
        let now = clock.now();
        zones.push(Zone {
            curb_zone_id: ids.next_id(),
            geometry: build_zone_polygon(&sub_line, side, width)?,
            curb_policy_ids: Vec::new(),
            published_date: now,
            last_updated_date: now,
            start_date: now,
            street_name: representative.street_name.clone(),
            curb_area_ids: Vec::new(),
            location_references: vec![LocationReference {
                source: "https://sharedstreets.io".to_string(),
                ref_id: representative.street_ref_id.clone(),
                start: representative.location_start.inner_meters(),
                end: representative.location_end.inner_meters(),
                side,
            }],
        });
    }
    Ok(zones)
}
