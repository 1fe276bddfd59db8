use geofw_core::obstruct::{envelope::elevation_at, repair};
use geofw_core::{Classification, FixRecord, GeomError, Obstruction, OverlapPolicy, XsId};

mod common;
use common::Rng;

const GAP: f64 = 0.02;

fn seg(start: f64, end: f64, elevation: f64) -> Obstruction {
    Obstruction::new(start, end, elevation)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn assert_envelope(got: &[Obstruction], want: &[(f64, f64, f64)]) {
    assert_eq!(got.len(), want.len(), "{got:?}");
    for (g, w) in got.iter().zip(want) {
        assert!(
            close(g.start, w.0) && close(g.end, w.1) && close(g.elevation, w.2),
            "{got:?} != {want:?}"
        );
    }
}

#[test]
fn overlapping_pair_gets_highest_envelope_and_gap() {
    let input = [seg(100.0, 120.0, 5.0), seg(110.0, 130.0, 3.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_envelope(&r.envelope, &[(100.0, 120.0, 5.0), (120.02, 130.0, 3.0)]);
    assert_eq!(r.classification, Classification::GapInserted);
    assert_eq!(r.gaps_inserted, 1);
}

#[test]
fn repaired_envelope_is_a_fixed_point() {
    let input = [seg(100.0, 120.0, 5.0), seg(110.0, 130.0, 3.0)];
    let once = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    let twice = repair(&once.envelope, OverlapPolicy::Highest, GAP).unwrap();
    assert_eq!(twice.classification, Classification::Unchanged);
    assert_eq!(twice.envelope, once.envelope);
}

#[test]
fn clean_input_is_unchanged() {
    let input = [seg(0.0, 10.0, 1.0), seg(20.0, 30.0, 2.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_eq!(r.classification, Classification::Unchanged);
    assert_eq!(r.envelope, input);
    assert!(repair(&[], OverlapPolicy::Highest, GAP).unwrap().envelope.is_empty());
}

#[test]
fn unsorted_or_touching_equal_input_is_repaired() {
    let r = repair(&[seg(20.0, 30.0, 2.0), seg(0.0, 10.0, 1.0)], OverlapPolicy::Highest, GAP)
        .unwrap();
    assert_eq!(r.classification, Classification::Repaired);
    assert_envelope(&r.envelope, &[(0.0, 10.0, 1.0), (20.0, 30.0, 2.0)]);

    let r = repair(&[seg(0.0, 10.0, 2.0), seg(10.0, 20.0, 2.0)], OverlapPolicy::Highest, GAP)
        .unwrap();
    assert_eq!(r.classification, Classification::Repaired);
    assert_envelope(&r.envelope, &[(0.0, 20.0, 2.0)]);
}

#[test]
fn nested_segment_splits_its_host() {
    let input = [seg(100.0, 130.0, 3.0), seg(110.0, 120.0, 5.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_envelope(
        &r.envelope,
        &[(100.0, 110.0, 3.0), (110.02, 120.0, 5.0), (120.02, 130.0, 3.0)],
    );
    assert_eq!(r.gaps_inserted, 2);
}

#[test]
fn policies_resolve_overlap_differently() {
    let input = [seg(100.0, 130.0, 3.0), seg(110.0, 120.0, 5.0)];

    let low = repair(&input, OverlapPolicy::Lowest, GAP).unwrap();
    assert_envelope(&low.envelope, &[(100.0, 130.0, 3.0)]);
    assert_eq!(low.classification, Classification::Repaired);

    let last = repair(&input, OverlapPolicy::LastDefined, GAP).unwrap();
    assert_envelope(
        &last.envelope,
        &[(100.0, 110.0, 3.0), (110.02, 120.0, 5.0), (120.02, 130.0, 3.0)],
    );

    let reversed = [seg(110.0, 120.0, 5.0), seg(100.0, 130.0, 3.0)];
    let last = repair(&reversed, OverlapPolicy::LastDefined, GAP).unwrap();
    assert_envelope(&last.envelope, &[(100.0, 130.0, 3.0)]);
}

#[test]
fn narrow_right_segment_takes_gap_from_left() {
    let input = [seg(0.0, 10.0, 2.0), seg(10.0, 10.01, 4.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_envelope(&r.envelope, &[(0.0, 9.98, 2.0), (10.0, 10.01, 4.0)]);
    assert_eq!(r.classification, Classification::GapInserted);
}

#[test]
fn two_narrow_segments_merge_at_policy_elevation() {
    let input = [seg(0.0, 0.01, 2.0), seg(0.01, 0.02, 4.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_envelope(&r.envelope, &[(0.0, 0.02, 4.0)]);
    assert_eq!(r.gaps_inserted, 0);
    assert_eq!(r.classification, Classification::Repaired);
}

#[test]
fn malformed_segments_are_rejected() {
    let err = repair(&[seg(50.0, 40.0, 2.0)], OverlapPolicy::Highest, GAP).unwrap_err();
    assert!(matches!(err, GeomError::Validation(_)));
    assert!(err.to_string().contains("obstruction 1: start 50 must be < end 40"));

    let err = repair(&[seg(0.0, 1.0, 1.0), seg(2.0, 3.0, -1.0)], OverlapPolicy::Highest, GAP)
        .unwrap_err();
    assert!(err.to_string().contains("obstruction 2: negative elevation"));

    assert!(repair(&[seg(0.0, f64::NAN, 1.0)], OverlapPolicy::Highest, GAP).is_err());
}

#[test]
fn near_miss_of_different_elevation_is_widened_to_gap() {
    let input = [seg(100.0, 120.0, 5.0), seg(120.01, 130.0, 3.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_envelope(&r.envelope, &[(100.0, 120.0, 5.0), (120.02, 130.0, 3.0)]);
    assert_eq!(r.classification, Classification::GapInserted);
    assert_eq!(r.gaps_inserted, 1);

    // already at the gap: nothing to do
    let ok = [seg(100.0, 120.0, 5.0), seg(120.02, 130.0, 3.0)];
    let r = repair(&ok, OverlapPolicy::Highest, GAP).unwrap();
    assert_eq!(r.classification, Classification::Unchanged);
}

#[test]
fn near_miss_of_equal_elevation_is_joined() {
    let input = [seg(0.0, 10.0, 4.0), seg(10.01, 20.0, 4.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_envelope(&r.envelope, &[(0.0, 20.0, 4.0)]);
    assert_eq!(r.classification, Classification::Repaired);
}

#[test]
fn merge_after_pull_back_gives_the_space_back() {
    let input = [seg(0.0, 10.0, 5.0), seg(10.0, 10.01, 3.0), seg(10.01, 10.02, 5.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_envelope(&r.envelope, &[(0.0, 10.02, 5.0)]);
    assert_eq!(r.gaps_inserted, 0);
    assert_eq!(r.classification, Classification::Repaired);
    assert_eq!(elevation_at(&r.envelope, 9.99), Some(5.0));
}

#[test]
fn merge_after_shift_rejoins_matching_neighbour() {
    // 3 is shifted off 5, then swallowed by the narrow 5 after it
    let input = [seg(0.0, 10.0, 5.0), seg(10.0, 10.03, 3.0), seg(10.03, 10.04, 5.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    assert_envelope(&r.envelope, &[(0.0, 10.04, 5.0)]);
    assert_eq!(r.gaps_inserted, 0);
}

/// Station on the 0.01 grid the file format carries.
fn grid(rng: &mut Rng, lo: i64, hi: i64) -> f64 {
    rng.range(lo, hi) as f64 / 100.0
}

#[test]
fn random_inputs_on_the_file_grid_hold_the_envelope_invariants() {
    let mut rng = Rng(0x5eed_1234_abcd);
    for _ in 0..300 {
        let n = rng.range(1, 8) as usize;
        let input: Vec<Obstruction> = (0..n)
            .map(|_| {
                let a = grid(&mut rng, 0, 2_000);
                let w = grid(&mut rng, 1, 300);
                seg(a, a + w, rng.range(0, 6) as f64)
            })
            .collect();
        let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
        let env = &r.envelope;

        for s in env {
            assert!(s.start < s.end, "{input:?} -> {env:?}");
        }
        // neighbours never sit closer than the gap, whatever their elevation
        for w in env.windows(2) {
            assert!(w[1].start - w[0].end > GAP - 1e-9, "{input:?} -> {env:?}");
        }

        // nowhere lower than the highest input; uncovered only inside a gap
        for k in 0..2_400 {
            let x = k as f64 / 100.0 + 0.005;
            let want = input
                .iter()
                .filter(|s| s.covers(x))
                .map(|s| s.elevation)
                .fold(None, |m: Option<f64>, e| Some(m.map_or(e, |m| m.max(e))));
            let Some(want) = want else { continue };
            match elevation_at(env, x) {
                Some(got) => assert!(got >= want, "x={x} {input:?} -> {env:?}"),
                None => assert!(
                    env.windows(2).any(|w| w[0].end <= x
                        && x < w[1].start
                        && w[1].start - w[0].end < GAP + 1e-9),
                    "x={x} uncovered outside a gap: {input:?} -> {env:?}"
                ),
            }
        }

        let again = repair(env, OverlapPolicy::Highest, GAP).unwrap();
        assert_eq!(again.classification, Classification::Unchanged, "{env:?}");
    }
}

#[test]
fn fix_record_reports_before_and_after() {
    let input = vec![seg(100.0, 120.0, 5.0), seg(110.0, 130.0, 3.0)];
    let r = repair(&input, OverlapPolicy::Highest, GAP).unwrap();
    let rec = FixRecord::new(XsId::new("Butte Creek", "Upper", "5.39"), input, r);
    assert!(rec.changed());
    let text = rec.to_string();
    assert!(text.starts_with("xs=Butte Creek/Upper/5.39 class=GapInserted gaps=1"));
    assert!(text.contains("before: 100.00-120.00@5.00 110.00-130.00@3.00"));
    assert!(text.contains("after:  100.00-120.00@5.00 120.02-130.00@3.00"));
}
