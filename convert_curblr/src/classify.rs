//! Buckets curb segments by the street edge and side they belong to. Everything downstream
//! works on one (street, side) group at a time.

use std::collections::BTreeMap;

use crate::curblr::{CurbSegment, SideOfStreet};

/// Groups segments by (street reference, side of street), preserving input order within
/// each group. Only sides that actually appear in the input show up; no group is empty.
pub fn group_by_street_and_side(
    segments: Vec<CurbSegment>,
) -> BTreeMap<String, BTreeMap<SideOfStreet, Vec<CurbSegment>>> {
    let mut groups: BTreeMap<String, BTreeMap<SideOfStreet, Vec<CurbSegment>>> = BTreeMap::new();
    for segment in segments {
        groups
            .entry(segment.street_ref_id.clone())
            .or_default()
            .entry(segment.side_of_street)
            .or_default()
            .push(segment);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    use geom::{Distance, Pt2D};

    fn segment(ref_id: &str, side: SideOfStreet, start: f64, end: f64) -> CurbSegment {
        CurbSegment {
            street_ref_id: ref_id.to_string(),
            side_of_street: side,
            location_start: Distance::meters(start),
            location_end: Distance::meters(end),
            street_name: String::new(),
            pts: vec![Pt2D::new(0.0, 0.0), Pt2D::new(1.0, 0.0)],
        }
    }

    #[test]
    fn groups_by_both_keys() {
        let groups = group_by_street_and_side(vec![
            segment("a", SideOfStreet::Right, 0.0, 10.0),
            segment("b", SideOfStreet::Left, 0.0, 5.0),
            segment("a", SideOfStreet::Right, 10.0, 20.0),
            segment("a", SideOfStreet::Left, 0.0, 20.0),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["a"][&SideOfStreet::Right].len(), 2);
        assert_eq!(groups["a"][&SideOfStreet::Left].len(), 1);
        assert_eq!(groups["b"][&SideOfStreet::Left].len(), 1);
        // Input order survives within a group
        assert_eq!(
            groups["a"][&SideOfStreet::Right][0].location_start,
            Distance::ZERO
        );
        assert_eq!(
            groups["a"][&SideOfStreet::Right][1].location_start,
            Distance::meters(10.0)
        );
        // Sides that never appear aren't synthesized
        assert!(!groups["b"].contains_key(&SideOfStreet::Right));
    }
}
