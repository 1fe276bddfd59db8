// crates/geofw-cli/src/cmd/check.rs

use clap::Args;
use geofw_core::edit::{self, Severity};
use geofw_core::EditContext;

use super::geometry_source;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Geometry file path or identifier (g01..g99)
    #[arg(long)]
    pub geom: String,
}

pub fn run(ctx: &EditContext, args: CheckArgs) -> anyhow::Result<()> {
    let findings = edit::check(ctx, &geometry_source(&args.geom))?;
    for f in &findings {
        println!("{f}");
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;
    eprintln!("check: {errors} error(s), {warnings} warning(s)");
    if !findings.is_empty() {
        anyhow::bail!("check found {} issue(s) in {}", findings.len(), args.geom);
    }
    Ok(())
}
