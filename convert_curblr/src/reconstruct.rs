//! Rebuilds one continuous curb line from an unordered pile of segments. The input gives no
//! segment ordering and no geometry orientation, so both are inferred: linear references
//! pick out the segments at the extremes of the curb, a distance heuristic decides which
//! physical endpoint is the start, and sorting every coordinate by distance from that start
//! lays the whole pool out along the curb.

use anyhow::Result;

use geom::{PolyLine, Pt2D};

use crate::curblr::CurbSegment;

/// How the starting endpoint of a curb line was chosen. Recorded so the tie-break behavior
/// can be pinned down in tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrientationRule {
    /// The segments with the extreme linear references are distinct. The start is the
    /// endpoint of the low segment participating in the farthest low/high endpoint pairing.
    SpanEndpoints,
    /// One segment covers the whole span, and a segment sitting off-center within that span
    /// disambiguated the direction.
    OffCenter { start_margin_longer: bool },
    /// Every segment sits symmetrically within the span. The direction genuinely can't be
    /// determined from the data, so the covering segment's first coordinate is used as-is.
    SymmetricFallback,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub start_pt: Pt2D,
    pub rule: OrientationRule,
}

/// Decides which physical endpoint the reconstructed line should start from. Pure; the
/// group must be non-empty, with every segment's geometry non-empty.
pub fn infer_orientation(group: &[CurbSegment]) -> Orientation {
    let mut first_segment = &group[0];
    let mut last_segment = &group[0];
    for segment in group {
        if segment.location_start < first_segment.location_start {
            first_segment = segment;
        }
        if segment.location_end > last_segment.location_end {
            last_segment = segment;
        }
    }

    // We don't know yet which endpoint of the first segment is the true start.
    let candidate1 = first_segment.pts[0];
    let candidate2 = *first_segment.pts.last().unwrap();

    let same_segment = first_segment.location_start == last_segment.location_start
        && first_segment.location_end == last_segment.location_end;

    if !same_segment {
        let last1 = last_segment.pts[0];
        let last2 = *last_segment.pts.last().unwrap();

        // The two ends of the full span are farther apart than any other pairing of
        // endpoints, so the widest pairing reveals the orientation.
        let d1 = candidate1.dist_to(last1);
        let d2 = candidate1.dist_to(last2);
        let d3 = candidate2.dist_to(last1);
        let d4 = candidate2.dist_to(last2);
        let max = d1.max(d2).max(d3).max(d4);
        let start_pt = if d1 == max || d2 == max {
            candidate1
        } else {
            candidate2
        };
        return Orientation {
            start_pt,
            rule: OrientationRule::SpanEndpoints,
        };
    }

    // One segment spans the whole curb, so its own references say nothing about direction.
    // Look for a segment that isn't centered within the span; where it sits tells us which
    // way the line runs.
    let off_center = group.iter().find(|segment| {
        segment.location_start - first_segment.location_start
            != first_segment.location_end - segment.location_end
    });
    let off_center = match off_center {
        Some(segment) => segment,
        None => {
            // The curb is symmetric. No way to know. Lets hope for the best.
            return Orientation {
                start_pt: candidate1,
                rule: OrientationRule::SymmetricFallback,
            };
        }
    };

    let start_margin = off_center.location_start - first_segment.location_start;
    let end_margin = first_segment.location_end - off_center.location_end;
    let start_margin_longer = start_margin > end_margin;

    let d1 = candidate1.dist_to(closest_pt(candidate1, &off_center.pts));
    let d2 = candidate2.dist_to(closest_pt(candidate2, &off_center.pts));

    // The off-center segment hugs whichever end of the curb has the smaller margin. When
    // the start margin is the larger one, the true start is the candidate farther from that
    // segment; otherwise the closer one.
    let start_pt = if start_margin_longer {
        if d1 > d2 {
            candidate1
        } else {
            candidate2
        }
    } else if d1 < d2 {
        candidate1
    } else {
        candidate2
    };
    Orientation {
        start_pt,
        rule: OrientationRule::OffCenter { start_margin_longer },
    }
}

fn closest_pt(target: Pt2D, pts: &[Pt2D]) -> Pt2D {
    *pts.iter()
        .min_by_key(|pt| target.dist_to(**pt))
        .unwrap()
}

/// Produces one ordered, deduplicated line spanning all of a group's segments. The group
/// must be entirely on one (street, side); anything else is a hard stop.
pub fn reconstruct_curb_line(group: &[CurbSegment]) -> Result<PolyLine> {
    if group.is_empty() {
        bail!("Can't reconstruct a curb line from zero segments");
    }
    let first = &group[0];
    for segment in group {
        if segment.street_ref_id != first.street_ref_id
            || segment.side_of_street != first.side_of_street
        {
            bail!(
                "All the curb segments must be on the same street and on the same side; got \
                 ({}, {}) and ({}, {})",
                first.street_ref_id,
                first.side_of_street,
                segment.street_ref_id,
                segment.side_of_street
            );
        }
        if segment.pts.is_empty() {
            bail!("A segment on {} has no geometry", segment.street_ref_id);
        }
    }

    let orientation = infer_orientation(group);
    debug!(
        "Curb on {} starts at {} ({:?})",
        first.street_ref_id, orientation.start_pt, orientation.rule
    );

    // Sorting every coordinate by distance from the start orders the whole pool along the
    // curb without needing per-segment ordering. The sort is stable; equal distances keep
    // input order.
    let mut positions: Vec<Pt2D> = group
        .iter()
        .flat_map(|segment| segment.pts.iter().copied())
        .collect();
    positions.sort_by_key(|pt| orientation.start_pt.dist_to(*pt));

    PolyLine::deduping_new(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    use geom::Distance;

    use crate::curblr::SideOfStreet;

    fn segment(start: f64, end: f64, pts: Vec<Pt2D>) -> CurbSegment {
        CurbSegment {
            street_ref_id: "street".to_string(),
            side_of_street: SideOfStreet::Right,
            location_start: Distance::meters(start),
            location_end: Distance::meters(end),
            street_name: String::new(),
            pts,
        }
    }

    #[test]
    fn single_segment_round_trips() {
        let group = vec![segment(
            0.0,
            10.0,
            vec![
                Pt2D::new(0.0, 0.0),
                Pt2D::new(5.0, 0.0),
                Pt2D::new(5.0, 0.0),
                Pt2D::new(10.0, 0.0),
            ],
        )];
        let line = reconstruct_curb_line(&group).unwrap();
        assert_eq!(
            line.points(),
            &vec![
                Pt2D::new(0.0, 0.0),
                Pt2D::new(5.0, 0.0),
                Pt2D::new(10.0, 0.0)
            ]
        );
        assert_eq!(
            infer_orientation(&group).rule,
            OrientationRule::SymmetricFallback
        );
    }

    #[test]
    fn two_segments_order_themselves() {
        // The second segment's geometry is drawn "backwards" relative to its references
        let group = vec![
            segment(
                10.0,
                20.0,
                vec![Pt2D::new(20.0, 0.0), Pt2D::new(10.0, 0.0)],
            ),
            segment(0.0, 10.0, vec![Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0)]),
        ];
        let orientation = infer_orientation(&group);
        assert_eq!(orientation.rule, OrientationRule::SpanEndpoints);
        assert_eq!(orientation.start_pt, Pt2D::new(0.0, 0.0));

        let line = reconstruct_curb_line(&group).unwrap();
        assert_eq!(line.first_pt(), Pt2D::new(0.0, 0.0));
        assert_eq!(line.last_pt(), Pt2D::new(20.0, 0.0));
        assert_eq!(line.length(), Distance::meters(20.0));
    }

    #[test]
    fn reordering_input_is_deterministic() {
        let mut group = vec![
            segment(0.0, 10.0, vec![Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0)]),
            segment(
                10.0,
                20.0,
                vec![Pt2D::new(10.0, 0.0), Pt2D::new(20.0, 0.0)],
            ),
            segment(5.0, 15.0, vec![Pt2D::new(5.0, 0.0), Pt2D::new(15.0, 0.0)]),
        ];
        let expected = reconstruct_curb_line(&group).unwrap();
        group.reverse();
        assert_eq!(reconstruct_curb_line(&group).unwrap(), expected);
    }

    #[test]
    fn off_center_segment_near_curb_start() {
        // One segment covers the whole curb; another hugs the low-reference end, so the
        // line must start at the covering segment's endpoint nearest to it.
        let group = vec![
            segment(
                0.0,
                20.0,
                vec![
                    Pt2D::new(0.0, 0.0),
                    Pt2D::new(10.0, 0.0),
                    Pt2D::new(20.0, 0.0),
                ],
            ),
            segment(0.0, 5.0, vec![Pt2D::new(0.0, 0.0), Pt2D::new(5.0, 0.0)]),
        ];
        let orientation = infer_orientation(&group);
        assert_eq!(
            orientation.rule,
            OrientationRule::OffCenter {
                start_margin_longer: false
            }
        );
        assert_eq!(orientation.start_pt, Pt2D::new(0.0, 0.0));
    }

    #[test]
    fn off_center_segment_near_curb_end() {
        // The extra segment hugs the high-reference end, so the line starts at the far
        // endpoint.
        let group = vec![
            segment(
                0.0,
                20.0,
                vec![
                    Pt2D::new(0.0, 0.0),
                    Pt2D::new(10.0, 0.0),
                    Pt2D::new(20.0, 0.0),
                ],
            ),
            segment(
                15.0,
                20.0,
                vec![Pt2D::new(15.0, 0.0), Pt2D::new(20.0, 0.0)],
            ),
        ];
        let orientation = infer_orientation(&group);
        assert_eq!(
            orientation.rule,
            OrientationRule::OffCenter {
                start_margin_longer: true
            }
        );
        assert_eq!(orientation.start_pt, Pt2D::new(0.0, 0.0));
    }

    #[test]
    fn mixed_group_is_fatal() {
        let mut wrong_side = segment(0.0, 10.0, vec![Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0)]);
        wrong_side.side_of_street = SideOfStreet::Left;
        let group = vec![
            segment(0.0, 10.0, vec![Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0)]),
            wrong_side,
        ];
        assert!(reconstruct_curb_line(&group).is_err());

        assert!(reconstruct_curb_line(&[]).is_err());
    }

    #[test]
    fn fully_symmetric_group_uses_fallback() {
        // Two segments, both perfectly centered in the span; no way to orient. The covering
        // segment's own first coordinate wins.
        let group = vec![
            segment(
                0.0,
                20.0,
                vec![Pt2D::new(20.0, 0.0), Pt2D::new(0.0, 0.0)],
            ),
            segment(5.0, 15.0, vec![Pt2D::new(5.0, 0.0), Pt2D::new(15.0, 0.0)]),
        ];
        let orientation = infer_orientation(&group);
        assert_eq!(orientation.rule, OrientationRule::SymmetricFallback);
        assert_eq!(orientation.start_pt, Pt2D::new(20.0, 0.0));
    }
}
