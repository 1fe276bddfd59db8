// crates/geofw-core/src/profile/simplify.rs
//
// Point-limit reduction. Douglas–Peucker on vertical deviation, run
// separately inside every span between two must-keep points so those points
// are never moved or dropped. The tolerance grows until the profile fits;
// once it exceeds every deviation only the must-keep points remain, so the
// loop always ends. Uniform decimation is the fallback if it does not.

use crate::error::{GeomError, Result};
use crate::profile::profile::{Point, Profile};

const TOLERANCE_GROWTH: f64 = 1.5;
const MAX_ROUNDS: usize = 256;

/// Which points a simplification must not touch: first, last, thalweg and
/// every station in `must_keep`.
pub fn critical_mask(profile: &Profile, must_keep: &[f64]) -> Result<Vec<bool>> {
    let n = profile.len();
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let thalweg = profile.thalweg().station;
    if let Some(i) = profile.index_of(thalweg) {
        keep[i] = true;
    }

    for &s in must_keep {
        let i = profile.index_of(s).ok_or_else(|| {
            GeomError::Validation(format!("simplify: must-keep station {s} is not a profile point"))
        })?;
        keep[i] = true;
    }
    Ok(keep)
}

pub fn simplify(profile: &Profile, max_points: usize, must_keep: &[f64]) -> Result<Profile> {
    let critical = critical_mask(profile, must_keep)?;
    let n_critical = critical.iter().filter(|&&k| k).count();
    if n_critical > max_points {
        return Err(GeomError::Validation(format!(
            "simplify: {n_critical} must-keep points exceed the limit of {max_points}"
        )));
    }
    if profile.len() <= max_points {
        return Ok(profile.clone());
    }

    let points = profile.points();
    let span = elevation_span(points);
    let mut tol = 0.0_f64;

    for round in 0..MAX_ROUNDS {
        let mask = douglas_peucker(points, &critical, tol);
        let kept = mask.iter().filter(|&&k| k).count();
        if kept <= max_points {
            tracing::debug!(
                from = profile.len(),
                to = kept,
                tolerance = tol,
                rounds = round + 1,
                "profile simplified"
            );
            return profile.retain_mask(&mask);
        }
        tol = if tol == 0.0 {
            (span * 1e-4).max(1e-6)
        } else {
            tol * TOLERANCE_GROWTH
        };
    }

    tracing::warn!(
        from = profile.len(),
        limit = max_points,
        "tolerance search did not converge, decimating"
    );
    profile.retain_mask(&decimate(&critical, max_points))
}

fn elevation_span(points: &[Point]) -> f64 {
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.elevation), hi.max(p.elevation))
        });
    hi - lo
}

/// Vertical distance of `p` from the chord `a`–`b`.
fn deviation(a: Point, b: Point, p: Point) -> f64 {
    let t = (p.station - a.station) / (b.station - a.station);
    (p.elevation - (a.elevation + t * (b.elevation - a.elevation))).abs()
}

fn douglas_peucker(points: &[Point], critical: &[bool], tol: f64) -> Vec<bool> {
    let mut keep = critical.to_vec();
    let anchors: Vec<usize> = (0..points.len()).filter(|&i| critical[i]).collect();

    let mut stack: Vec<(usize, usize)> = anchors.windows(2).map(|w| (w[0], w[1])).collect();
    while let Some((a, b)) = stack.pop() {
        if b <= a + 1 {
            continue;
        }
        let (mut worst, mut worst_d) = (a, -1.0_f64);
        for i in a + 1..b {
            let d = deviation(points[a], points[b], points[i]);
            if d > worst_d {
                worst = i;
                worst_d = d;
            }
        }
        if worst_d > tol {
            keep[worst] = true;
            stack.push((a, worst));
            stack.push((worst, b));
        }
    }
    keep
}

/// Critical points plus evenly spaced others up to `max_points`.
fn decimate(critical: &[bool], max_points: usize) -> Vec<bool> {
    let mut keep = critical.to_vec();
    let others: Vec<usize> = (0..critical.len()).filter(|&i| !critical[i]).collect();
    let budget = max_points.saturating_sub(critical.iter().filter(|&&k| k).count());
    if budget == 0 || others.is_empty() {
        return keep;
    }
    let take = budget.min(others.len());
    for j in 0..take {
        keep[others[j * others.len() / take]] = true;
    }
    keep
}
