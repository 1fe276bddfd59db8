// crates/geofw-cli/src/cmd/simplify.rs

use clap::Args;
use geofw_core::edit;
use geofw_core::EditContext;

use super::{geometry_source, parse_xs, print_commit};

#[derive(Args, Debug)]
pub struct SimplifyArgs {
    /// Geometry file path or identifier (g01..g99)
    #[arg(long)]
    pub geom: String,

    /// Cross section as river,reach,station
    #[arg(long)]
    pub xs: String,

    /// Target point count (never above the consumer limit)
    #[arg(long, default_value_t = 450)]
    pub max_points: usize,
}

pub fn run(ctx: &EditContext, args: SimplifyArgs) -> anyhow::Result<()> {
    let id = parse_xs(&args.xs)?;
    let out = edit::simplify_profile(ctx, &geometry_source(&args.geom), &id, args.max_points)?;
    eprintln!("xs          = {id}");
    eprintln!("points      = {} -> {}", out.edit.points_in, out.edit.points_out);
    print_commit(&out.path, out.commit.as_ref());
    Ok(())
}
