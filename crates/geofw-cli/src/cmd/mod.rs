// crates/geofw-cli/src/cmd/mod.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use geofw_core::io::CommitReport;
use geofw_core::{EditConfig, EditContext, GeometrySource, ProjectContext, XsId};

use crate::Cli;

pub mod check;
pub mod inspect;
pub mod repair;
pub mod set_profile;
pub mod simplify;

pub fn context(cli: &Cli) -> EditContext {
    let project = ProjectContext::new(
        cli.project_dir.clone(),
        cli.project_name.as_deref().unwrap_or(""),
    );
    let config = EditConfig {
        make_backup: !cli.no_backup,
        ..EditConfig::default()
    };
    EditContext::new(project, config)
}

/// `g01` / `.g01` is an identifier inside the project, anything else a path.
pub fn geometry_source(arg: &str) -> GeometrySource {
    let id = arg.trim().trim_start_matches('.');
    let is_ident = id.len() == 3
        && id.as_bytes()[0].eq_ignore_ascii_case(&b'g')
        && id.as_bytes()[1..].iter().all(u8::is_ascii_digit);
    if is_ident {
        GeometrySource::Identifier(id.to_string())
    } else {
        GeometrySource::Path(PathBuf::from(arg))
    }
}

pub fn parse_xs(arg: &str) -> anyhow::Result<XsId> {
    XsId::parse(arg).with_context(|| format!("--xs {arg:?}"))
}

pub fn print_commit(path: &Path, commit: Option<&CommitReport>) {
    match commit {
        Some(c) => {
            eprintln!("written     = {} ({} bytes)", path.display(), c.bytes_written);
            eprintln!("blake3_16   = {}", c.digest_hex());
            if let Some(bak) = &c.backup {
                eprintln!("backup      = {}", bak.display());
            }
        }
        None => eprintln!("written     = none (no change)"),
    }
}
