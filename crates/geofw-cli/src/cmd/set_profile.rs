// crates/geofw-cli/src/cmd/set_profile.rs

use clap::Args;
use geofw_core::edit;
use geofw_core::{BankPair, EditContext};

use super::{geometry_source, parse_xs, print_commit};
use crate::io::points::load_points_csv;

#[derive(Args, Debug)]
pub struct SetProfileArgs {
    /// Geometry file path or identifier (g01..g99)
    #[arg(long)]
    pub geom: String,

    /// Cross section as river,reach,station
    #[arg(long)]
    pub xs: String,

    /// CSV of station,elevation rows
    #[arg(long)]
    pub points: String,

    /// Bank stations as left,right; defaults to the file's Bank Sta= line
    #[arg(long)]
    pub bank: Option<String>,
}

pub fn run(ctx: &EditContext, args: SetProfileArgs) -> anyhow::Result<()> {
    let id = parse_xs(&args.xs)?;
    let profile = load_points_csv(&args.points)?;
    let bank = args.bank.as_deref().map(BankPair::parse).transpose()?;

    let out = edit::set_profile(ctx, &geometry_source(&args.geom), &id, &profile, bank)?;
    let e = &out.edit;
    eprintln!("xs              = {id}");
    eprintln!("points_in       = {}", e.points_in);
    eprintln!("points_out      = {}", e.points_out);
    eprintln!("simplified      = {}", e.simplified);
    eprintln!("inserted_banks  = {:?}", e.inserted_banks);
    if e.overflow_fields > 0 {
        eprintln!("WARNING: {} field(s) written as overflow markers", e.overflow_fields);
    }
    print_commit(&out.path, out.commit.as_ref());
    Ok(())
}
