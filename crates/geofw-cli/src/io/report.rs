// crates/geofw-cli/src/io/report.rs

use std::fmt::Write as _;

use anyhow::{Context, Result};
use geofw_core::FixRecord;

/// One block per record, blank line between; unchanged sections included.
pub fn write_fix_report(path: &str, records: &[FixRecord]) -> Result<()> {
    let mut text = String::new();
    for r in records {
        writeln!(text, "{r}")?;
        text.push('\n');
    }
    std::fs::write(path, text).with_context(|| format!("write report {path}"))?;
    Ok(())
}
