// crates/geofw-core/src/obstruct/envelope.rs
//
// Elevation-envelope repair for overlapping blocked obstructions.
//
//   1. every start/end becomes a critical station (sorted, de-duplicated)
//   2. each elementary interval takes the policy elevation of the inputs covering it
//   3. touching intervals of equal elevation merge
//   4. neighbours of different elevation closer than `min_gap` are pushed
//      apart to exactly `min_gap`, taken from the start of the right-hand one;
//      equal-elevation neighbours closer than `min_gap` are joined
//   5. classify against the input
//
// Step 4 always moves the later segment. If that segment is not wide enough,
// the earlier one gives up the space instead; if neither can, the two merge at
// the policy elevation and the merged segment is checked again against its
// left neighbour, which gets back any space it gave up if they now match.

use std::fmt;

use crate::doc::xs::XsId;
use crate::error::Result;
use crate::obstruct::segment::Obstruction;
use crate::validate::validate_segments;

/// Slack on station comparisons against `min_gap`.
const WIDTH_EPS: f64 = 1e-9;

/// How overlapping claims on one interval resolve to a single elevation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Highest claim wins. Never understates blockage.
    #[default]
    Highest,
    Lowest,
    /// The claim listed last in the file wins.
    LastDefined,
}

impl OverlapPolicy {
    pub fn name(self) -> &'static str {
        match self {
            OverlapPolicy::Highest => "highest",
            OverlapPolicy::Lowest => "lowest",
            OverlapPolicy::LastDefined => "last-defined",
        }
    }

    /// `claims` are (input index, elevation); never empty.
    pub fn combine(self, claims: &[(usize, f64)]) -> f64 {
        match self {
            OverlapPolicy::Highest => claims.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max),
            OverlapPolicy::Lowest => claims.iter().map(|c| c.1).fold(f64::INFINITY, f64::min),
            OverlapPolicy::LastDefined => claims
                .iter()
                .max_by_key(|c| c.0)
                .map(|c| c.1)
                .unwrap_or(f64::NAN),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Unchanged,
    Repaired,
    GapInserted,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Unchanged => "Unchanged",
            Classification::Repaired => "Repaired",
            Classification::GapInserted => "GapInserted",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Repair {
    pub envelope: Vec<Obstruction>,
    pub classification: Classification,
    pub gaps_inserted: usize,
}

pub fn repair(segments: &[Obstruction], policy: OverlapPolicy, min_gap: f64) -> Result<Repair> {
    validate_segments(segments)?;

    let mut critical: Vec<f64> = segments.iter().flat_map(|s| [s.start, s.end]).collect();
    critical.sort_by(f64::total_cmp);
    critical.dedup();

    let mut pieces: Vec<Obstruction> = Vec::with_capacity(critical.len());
    for w in critical.windows(2) {
        let (a, b) = (w[0], w[1]);
        let claims: Vec<(usize, f64)> = segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.start <= a && s.end >= b)
            .map(|(i, s)| (i, s.elevation))
            .collect();
        if claims.is_empty() {
            continue;
        }
        let elevation = policy.combine(&claims);
        match pieces.last_mut() {
            Some(last) if last.end == a && last.elevation == elevation => last.end = b,
            _ => pieces.push(Obstruction::new(a, b, elevation)),
        }
    }

    let (pieces, gaps_inserted) = insert_gaps(pieces, policy, min_gap);

    let classification = if gaps_inserted > 0 {
        Classification::GapInserted
    } else if pieces.as_slice() == segments {
        Classification::Unchanged
    } else {
        Classification::Repaired
    };

    tracing::debug!(
        input = segments.len(),
        output = pieces.len(),
        gaps = gaps_inserted,
        policy = policy.name(),
        %classification,
        "obstruction envelope repaired"
    );
    Ok(Repair {
        envelope: pieces,
        classification,
        gaps_inserted,
    })
}

/// A segment of the envelope under construction; `made_gap` marks a gap to
/// its left that step 4 created.
struct Slot {
    seg: Obstruction,
    made_gap: bool,
}

fn insert_gaps(
    pieces: Vec<Obstruction>,
    policy: OverlapPolicy,
    min_gap: f64,
) -> (Vec<Obstruction>, usize) {
    let mut out: Vec<Slot> = Vec::with_capacity(pieces.len());
    for seg in pieces {
        let mut cur = Slot {
            seg,
            made_gap: false,
        };
        loop {
            let Some(last) = out.last_mut() else {
                out.push(cur);
                break;
            };
            let d = cur.seg.start - last.seg.end;

            if last.seg.elevation == cur.seg.elevation {
                if d <= WIDTH_EPS || d < min_gap - WIDTH_EPS || cur.made_gap {
                    cur = Slot {
                        seg: Obstruction::new(last.seg.start, cur.seg.end, cur.seg.elevation),
                        made_gap: last.made_gap,
                    };
                    out.pop();
                    continue;
                }
                out.push(cur);
                break;
            }
            if d >= min_gap - WIDTH_EPS {
                out.push(cur);
                break;
            }

            let shifted = last.seg.end + min_gap;
            if cur.seg.end - shifted > WIDTH_EPS {
                cur.seg.start = shifted;
                cur.made_gap = true;
                out.push(cur);
                break;
            }
            let pulled = cur.seg.start - min_gap;
            if pulled - last.seg.start > WIDTH_EPS {
                last.seg.end = pulled;
                cur.made_gap = true;
                out.push(cur);
                break;
            }
            let elevation = policy.combine(&[(0, last.seg.elevation), (1, cur.seg.elevation)]);
            cur = Slot {
                seg: Obstruction::new(last.seg.start, cur.seg.end, elevation),
                made_gap: last.made_gap,
            };
            out.pop();
        }
    }
    let gaps = out.iter().filter(|s| s.made_gap).count();
    (out.into_iter().map(|s| s.seg).collect(), gaps)
}

/// Envelope elevation at `station`, `None` where nothing is blocked.
pub fn elevation_at(envelope: &[Obstruction], station: f64) -> Option<f64> {
    envelope
        .iter()
        .find(|s| s.covers(station))
        .map(|s| s.elevation)
}

/// Audit entry kept for review of every repaired cross section.
#[derive(Clone, Debug, PartialEq)]
pub struct FixRecord {
    pub xs: XsId,
    pub original: Vec<Obstruction>,
    pub repaired: Vec<Obstruction>,
    pub classification: Classification,
    pub gaps_inserted: usize,
}

impl FixRecord {
    pub fn new(xs: XsId, original: Vec<Obstruction>, repair: Repair) -> Self {
        FixRecord {
            xs,
            original,
            repaired: repair.envelope,
            classification: repair.classification,
            gaps_inserted: repair.gaps_inserted,
        }
    }

    pub fn changed(&self) -> bool {
        self.classification != Classification::Unchanged
    }
}

impl fmt::Display for FixRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "xs={} class={} gaps={}",
            self.xs, self.classification, self.gaps_inserted
        )?;
        write!(f, "  before:")?;
        for s in &self.original {
            write!(f, " {:.2}-{:.2}@{:.2}", s.start, s.end, s.elevation)?;
        }
        write!(f, "\n  after: ")?;
        for s in &self.repaired {
            write!(f, " {:.2}-{:.2}@{:.2}", s.start, s.end, s.elevation)?;
        }
        Ok(())
    }
}
