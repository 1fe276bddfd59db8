// crates/geofw-cli/src/cmd/repair.rs

use clap::{Args, ValueEnum};
use geofw_core::edit::{self, BatchPolicy};
use geofw_core::{Classification, EditContext, OverlapPolicy};

use super::{geometry_source, parse_xs, print_commit};
use crate::io::report::write_fix_report;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    Highest,
    Lowest,
    LastDefined,
}

impl From<PolicyArg> for OverlapPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Highest => OverlapPolicy::Highest,
            PolicyArg::Lowest => OverlapPolicy::Lowest,
            PolicyArg::LastDefined => OverlapPolicy::LastDefined,
        }
    }
}

#[derive(Args, Debug)]
pub struct RepairArgs {
    /// Geometry file path or identifier (g01..g99)
    #[arg(long)]
    pub geom: String,

    /// Only this cross section (river,reach,station); default is all
    #[arg(long)]
    pub xs: Option<String>,

    /// Elevation kept where obstructions overlap
    #[arg(long, value_enum, default_value_t = PolicyArg::Highest)]
    pub policy: PolicyArg,

    /// Report what would change without writing
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Stop at the first bad cross section and write nothing
    #[arg(long, default_value_t = false)]
    pub halt_on_error: bool,

    /// Save fix records to this file
    #[arg(long)]
    pub report: Option<String>,
}

pub fn run(ctx: &EditContext, args: RepairArgs) -> anyhow::Result<()> {
    let mut ctx = ctx.clone();
    ctx.config.overlap_policy = args.policy.into();

    let only = args.xs.as_deref().map(parse_xs).transpose()?;
    let batch = if args.halt_on_error {
        BatchPolicy::Halt
    } else {
        BatchPolicy::Continue
    };

    let out = edit::repair_obstructions(
        &ctx,
        &geometry_source(&args.geom),
        only.as_ref(),
        batch,
        args.dry_run,
    )?;

    for r in out.records.iter().filter(|r| r.changed()) {
        println!("{r}");
    }
    for f in &out.failures {
        eprintln!("ERROR: {}: {}", f.xs, f.error);
    }
    eprintln!("policy      = {}", ctx.config.overlap_policy.name());
    eprintln!(
        "sections    = {} (unchanged={} repaired={} gap_inserted={} failed={})",
        out.records.len() + out.failures.len(),
        out.count(Classification::Unchanged),
        out.count(Classification::Repaired),
        out.count(Classification::GapInserted),
        out.failures.len()
    );

    if let Some(path) = args.report.as_deref() {
        write_fix_report(path, &out.records)?;
        eprintln!("report      = {path}");
    }

    if out.dry_run {
        eprintln!("dry_run     = true (nothing written)");
    } else {
        print_commit(&out.path, out.commit.as_ref());
    }

    if !out.failures.is_empty() {
        anyhow::bail!("{} cross section(s) could not be repaired", out.failures.len());
    }
    Ok(())
}
