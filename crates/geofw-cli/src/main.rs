// crates/geofw-cli/src/main.rs

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "geofw")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and safely edit fixed-width river geometry files", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Project directory; relative geometry paths and identifiers resolve here
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Project file stem, needed for g01-style identifiers
    #[arg(long, global = true)]
    pub project_name: Option<String>,

    /// Do not write <file>.bak before replacing a geometry file
    #[arg(long, global = true)]
    pub no_backup: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List cross sections, storage areas and block sizes
    Inspect(cmd::inspect::InspectArgs),

    /// Run every validation without writing; non-zero exit on findings
    Check(cmd::check::CheckArgs),

    /// Replace the station/elevation profile of one cross section
    SetProfile(cmd::set_profile::SetProfileArgs),

    /// Reduce a profile to a point limit, keeping banks and thalweg
    Simplify(cmd::simplify::SimplifyArgs),

    /// Resolve overlapping blocked obstructions into one envelope
    RepairObstructions(cmd::repair::RepairArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ctx = cmd::context(&cli);
    match cli.cmd {
        Commands::Inspect(args) => cmd::inspect::run(&ctx, args),
        Commands::Check(args) => cmd::check::run(&ctx, args),
        Commands::SetProfile(args) => cmd::set_profile::run(&ctx, args),
        Commands::Simplify(args) => cmd::simplify::run(&ctx, args),
        Commands::RepairObstructions(args) => cmd::repair::run(&ctx, args),
    }
}
