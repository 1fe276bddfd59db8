// crates/geofw-core/src/render.rs
//
// Text plot of a profile with its obstruction envelope, one row per
// elevation band. Compiled only with the `render` feature.

use crate::obstruct::envelope::elevation_at;
use crate::obstruct::segment::Obstruction;
use crate::profile::profile::Profile;

pub fn profile_ascii(profile: &Profile, envelope: &[Obstruction], cols: usize, rows: usize) -> String {
    let cols = cols.max(2);
    let rows = rows.max(2);
    let (s0, s1) = (profile.first().station, profile.last().station);

    let ground: Vec<f64> = (0..cols)
        .map(|c| s0 + (s1 - s0) * c as f64 / (cols - 1) as f64)
        .map(|s| profile.elevation_at(s).unwrap_or(f64::NAN))
        .collect();
    let blocked: Vec<Option<f64>> = (0..cols)
        .map(|c| s0 + (s1 - s0) * c as f64 / (cols - 1) as f64)
        .map(|s| elevation_at(envelope, s))
        .collect();

    let lo = ground.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = ground
        .iter()
        .copied()
        .chain(blocked.iter().flatten().copied())
        .fold(f64::NEG_INFINITY, f64::max);
    let step = if hi > lo { (hi - lo) / (rows - 1) as f64 } else { 1.0 };

    let mut out = String::with_capacity((cols + 1) * rows);
    for r in (0..rows).rev() {
        let z = lo + step * r as f64;
        for c in 0..cols {
            let ch = if ground[c] >= z {
                '#'
            } else if blocked[c].is_some_and(|b| b >= z) {
                '='
            } else {
                ' '
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
