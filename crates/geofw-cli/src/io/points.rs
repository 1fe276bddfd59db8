// crates/geofw-cli/src/io/points.rs

use anyhow::{Context, Result};
use geofw_core::Profile;

/// Load `station,elevation` rows. Blank lines and `#` comments are skipped;
/// a first row that is not numeric is taken as a header.
pub fn load_points_csv(path: &str) -> Result<Profile> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read points {path}"))?;
    let pairs = parse_points(&text).with_context(|| format!("parse points {path}"))?;
    Ok(Profile::from_pairs(&pairs)?)
}

fn parse_points(text: &str) -> Result<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut cols = line.split(',').map(str::trim);
        let (Some(s), Some(e)) = (cols.next(), cols.next()) else {
            anyhow::bail!("line {}: expected station,elevation", n + 1);
        };
        match (s.parse::<f64>(), e.parse::<f64>()) {
            (Ok(s), Ok(e)) => out.push((s, e)),
            _ if out.is_empty() && n == 0 => continue,
            _ => anyhow::bail!("line {}: not numeric: {line:?}", n + 1),
        }
    }
    Ok(out)
}
