// crates/geofw-core/src/obstruct/segment.rs

use crate::config::FormatSpec;
use crate::doc::block::{read_block, render_block, replace_block};
use crate::doc::document::GeometryDocument;
use crate::doc::xs::{self, XsId};
use crate::error::{GeomError, Result};
use crate::fixed::count::BLOCK_OBSTRUCT;

/// Blocked obstruction: flow excluded over [start, end) up to `elevation`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstruction {
    pub start: f64,
    pub end: f64,
    pub elevation: f64,
}

impl Obstruction {
    pub fn new(start: f64, end: f64, elevation: f64) -> Self {
        Obstruction {
            start,
            end,
            elevation,
        }
    }

    pub fn covers(&self, station: f64) -> bool {
        self.start <= station && station < self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Default tail of a freshly written header (blocked-obstruction mode flag).
const DEFAULT_TAIL: &str = " ,0";

/// Segments of the `#Block Obstruct=` block; `Ok(None)` if the section has none.
pub fn read_obstructions(
    doc: &GeometryDocument,
    id: &XsId,
    format: &FormatSpec,
) -> Result<Option<Vec<Obstruction>>> {
    let node = xs::find(doc, id)?;
    let block = read_block(doc, BLOCK_OBSTRUCT, node.lines, format).map_err(|e| e.within(id))?;
    let Some(block) = block else {
        return Ok(None);
    };
    let values = block.values(&id.to_string())?;
    Ok(Some(
        values
            .chunks_exact(3)
            .map(|c| Obstruction::new(c[0], c[1], c[2]))
            .collect(),
    ))
}

/// Rewrite the obstruction block of `id` with `segments`, keeping the
/// header's trailing flags. The block must already exist.
pub fn write_obstructions(
    doc: &GeometryDocument,
    id: &XsId,
    segments: &[Obstruction],
    format: &FormatSpec,
) -> Result<GeometryDocument> {
    let node = xs::find(doc, id)?;
    let block = read_block(doc, BLOCK_OBSTRUCT, node.lines, format)
        .map_err(|e| e.within(id))?
        .ok_or_else(|| GeomError::NotFound(format!("{id}: no {BLOCK_OBSTRUCT} block")))?;

    let mut header = block.header.clone();
    if header.tail.is_empty() {
        header.tail = DEFAULT_TAIL.to_string();
    }
    header.count = segments.len();
    let values: Vec<f64> = segments
        .iter()
        .flat_map(|s| [s.start, s.end, s.elevation])
        .collect();

    let mut out = doc.clone();
    replace_block(&mut out, block.span, render_block(&header, &values, format));
    Ok(out)
}
