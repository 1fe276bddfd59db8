// crates/geofw-cli/src/cmd/inspect.rs

use anyhow::Context;
use clap::Args;
use geofw_core::doc::block::read_block;
use geofw_core::doc::xs;
use geofw_core::fixed::count::STA_ELEV;
use geofw_core::obstruct::read_obstructions;
use geofw_core::profile::read_banks;
use geofw_core::storage::{read_storage, storage_areas};
use geofw_core::{EditContext, GeometryDocument};

use super::geometry_source;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Geometry file path or identifier (g01..g99)
    #[arg(long)]
    pub geom: String,

    /// Draw each profile with its obstruction envelope
    #[cfg(feature = "render")]
    #[arg(long, default_value_t = false)]
    pub plot: bool,
}

pub fn run(ctx: &EditContext, args: InspectArgs) -> anyhow::Result<()> {
    let path = geometry_source(&args.geom).resolve(&ctx.project)?;
    let doc = GeometryDocument::load(&path).with_context(|| format!("load {}", path.display()))?;
    let format = &ctx.config.format;

    println!("file      = {}", path.display());
    println!("encoding  = {}", doc.encoding().name());
    println!("lines     = {}", doc.len());

    let sections = xs::cross_sections(&doc)?;
    println!("cross_sections = {}", sections.len());
    for node in &sections {
        let id = &node.id;
        let (points, overflow) = match read_block(&doc, STA_ELEV, node.lines.clone(), format) {
            Ok(Some(b)) => (
                (b.fields.len() / 2).to_string(),
                b.overflow_slots().len(),
            ),
            Ok(None) => ("-".to_string(), 0),
            Err(e) => (format!("error ({e})"), 0),
        };
        let obstructions = match read_obstructions(&doc, id, format) {
            Ok(Some(s)) => s.len().to_string(),
            Ok(None) => "0".to_string(),
            Err(e) => format!("error ({e})"),
        };
        let bank = match read_banks(&doc, id) {
            Ok(Some(b)) => b.render(),
            Ok(None) => "-".to_string(),
            Err(e) => format!("error ({e})"),
        };
        println!(
            "  {id}  points={points} obstructions={obstructions} bank={bank} overflow={overflow}"
        );

        #[cfg(feature = "render")]
        if args.plot {
            plot(&doc, id, format);
        }
    }

    let areas = storage_areas(&doc);
    println!("storage_areas = {}", areas.len());
    for name in &areas {
        let curve = match read_storage(&doc, name, format) {
            Ok(Some(c)) => format!("points={}", c.points().len()),
            Ok(None) => "points=-".to_string(),
            Err(e) => format!("error ({e})"),
        };
        println!("  {name}  {curve}");
    }
    Ok(())
}

#[cfg(feature = "render")]
fn plot(doc: &GeometryDocument, id: &geofw_core::XsId, format: &geofw_core::FormatSpec) {
    let Ok(profile) = geofw_core::profile::read_profile(doc, id, format) else {
        return;
    };
    let envelope = read_obstructions(doc, id, format)
        .ok()
        .flatten()
        .unwrap_or_default();
    println!("{}", geofw_core::render::profile_ascii(&profile, &envelope, 72, 12));
}
