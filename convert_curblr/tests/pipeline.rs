//! End-to-end check of the library surface: parse a small CurbLR document, group it, and
//! build zones, with deterministic ids and timestamps.

use chrono::{DateTime, TimeZone, Utc};

use convert_curblr::classify::group_by_street_and_side;
use convert_curblr::curblr::parse_curb_segments;
use convert_curblr::zones::{build_curb_zones, Clock, IdSource, DEFAULT_ZONE_WIDTH};

struct SeqIds(usize);

impl IdSource for SeqIds {
    fn next_id(&mut self) -> String {
        self.0 += 1;
        format!("zone{}", self.0)
    }
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// Two streets in downtown Montreal. "one" has two regulations on its right side splitting
// the curb at 30m; "two" has a single regulation on its left side.
const INPUT: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {
                "location": {
                    "shstRefId": "one",
                    "shstLocationStart": 0,
                    "shstLocationEnd": 30,
                    "sideOfStreet": "right",
                    "streetName": "Rue Sainte-Catherine"
                }
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [[-73.5700, 45.5000], [-73.5690, 45.5000]]
            }
        },
        {
            "type": "Feature",
            "properties": {
                "location": {
                    "shstRefId": "one",
                    "shstLocationStart": 30,
                    "shstLocationEnd": 60,
                    "sideOfStreet": "right",
                    "streetName": "Rue Sainte-Catherine"
                }
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [[-73.5690, 45.5000], [-73.5680, 45.5000]]
            }
        },
        {
            "type": "Feature",
            "properties": {
                "location": {
                    "shstRefId": "two",
                    "shstLocationStart": 0,
                    "shstLocationEnd": 40,
                    "sideOfStreet": "left",
                    "streetName": "Boulevard Saint-Laurent"
                }
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [[-73.5700, 45.5010], [-73.5700, 45.5005]]
            }
        }
    ]
}"#;

#[test]
fn small_city_end_to_end() {
    let (segments, _) = parse_curb_segments(INPUT).unwrap();
    assert_eq!(segments.len(), 3);

    let mut ids = SeqIds(0);
    let clock = FixedClock(Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap());

    let mut all_zones = Vec::new();
    for (_, by_side) in group_by_street_and_side(segments) {
        for (_, group) in by_side {
            all_zones.extend(build_curb_zones(&group, DEFAULT_ZONE_WIDTH, &mut ids, &clock).unwrap());
        }
    }

    // Street "one" has separations [0, 30, 60] -> 2 zones; street "two" has [0, 40] -> 1
    assert_eq!(all_zones.len(), 3);
    for (zone, expected_id) in all_zones.iter().zip(["zone1", "zone2", "zone3"]) {
        assert_eq!(zone.curb_zone_id, expected_id);
        assert_eq!(zone.published_date, clock.now());
        let pts = zone.geometry.points();
        assert_eq!(pts[0], *pts.last().unwrap());
    }

    assert_eq!(all_zones[0].street_name, "Rue Sainte-Catherine");
    assert_eq!(all_zones[2].street_name, "Boulevard Saint-Laurent");
}

#[test]
fn converting_twice_is_deterministic() {
    let (segments1, _) = parse_curb_segments(INPUT).unwrap();
    let (segments2, _) = parse_curb_segments(INPUT).unwrap();
    let clock = FixedClock(Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap());

    let build = |segments| {
        let mut ids = SeqIds(0);
        let mut zones = Vec::new();
        for (_, by_side) in group_by_street_and_side(segments) {
            for (_, group) in by_side {
                zones
                    .extend(build_curb_zones(&group, DEFAULT_ZONE_WIDTH, &mut ids, &clock).unwrap());
            }
        }
        zones
    };

    let zones1 = build(segments1);
    let zones2 = build(segments2);
    assert_eq!(zones1.len(), zones2.len());
    for (z1, z2) in zones1.iter().zip(zones2.iter()) {
        assert_eq!(z1.curb_zone_id, z2.curb_zone_id);
        assert_eq!(z1.geometry, z2.geometry);
    }
}
