// crates/geofw-core/src/profile/editor.rs

use crate::config::{FormatSpec, Limits};
use crate::doc::block::{read_block, render_block, replace_block};
use crate::doc::document::GeometryDocument;
use crate::doc::section::BANK_STA;
use crate::doc::xs::{self, XsId};
use crate::error::{GeomError, Result};
use crate::fixed::codec::{self, Field};
use crate::fixed::count::{MANNING, STA_ELEV};
use crate::profile::profile::{BankPair, Point, Profile};
use crate::profile::simplify::simplify;

/// Outcome of `write_profile`: the edited copy plus what was done to get there.
#[derive(Clone, Debug)]
pub struct ProfileEdit {
    pub document: GeometryDocument,
    pub profile: Profile,
    pub bank: Option<BankPair>,
    /// Bank stations that had to be interpolated into the profile.
    pub inserted_banks: Vec<f64>,
    pub simplified: bool,
    pub points_in: usize,
    pub points_out: usize,
    /// Fields written as overflow markers.
    pub overflow_fields: usize,
}

pub fn read_profile(doc: &GeometryDocument, id: &XsId, format: &FormatSpec) -> Result<Profile> {
    let node = xs::find(doc, id)?;
    let block = read_block(doc, STA_ELEV, node.lines.clone(), format)
        .map_err(|e| e.within(id))?
        .ok_or_else(|| GeomError::NotFound(format!("{id}: no {STA_ELEV} block")))?;
    let values = block.values(&id.to_string())?;
    Profile::from_flat(&values).map_err(|e| e.within(id))
}

/// `Ok(None)` when the cross section has no `Bank Sta=` line.
pub fn read_banks(doc: &GeometryDocument, id: &XsId) -> Result<Option<BankPair>> {
    let node = xs::find(doc, id)?;
    match bank_line(doc, &node.lines) {
        Some(i) => {
            let line = &doc.lines()[i];
            let text = &line[line.find('=').map(|p| p + 1).unwrap_or(line.len())..];
            BankPair::parse(text)
                .map(Some)
                .map_err(|e| e.within(format!("{id} line {}", i + 1)))
        }
        None => Ok(None),
    }
}

/// Raw roughness fields; `Ok(None)` when the block is absent.
pub fn read_roughness(
    doc: &GeometryDocument,
    id: &XsId,
    format: &FormatSpec,
) -> Result<Option<Vec<Field>>> {
    let node = xs::find(doc, id)?;
    Ok(read_block(doc, MANNING, node.lines, format)
        .map_err(|e| e.within(id))?
        .map(|b| b.fields))
}

fn bank_line(doc: &GeometryDocument, range: &std::ops::Range<usize>) -> Option<usize> {
    range.clone().find(|&i| doc.lines()[i].contains(BANK_STA))
}

/// Replace the station–elevation profile of `id`.
///
/// Bank stations (the supplied pair, else the file's current one) end up as
/// exact profile points, their elevations interpolated on `profile` before
/// rounding. Profiles above `limits.max_points` are simplified with the banks
/// pinned. The returned `profile` is what the file now holds. Nothing touches
/// disk.
pub fn write_profile(
    doc: &GeometryDocument,
    id: &XsId,
    profile: &Profile,
    bank: Option<BankPair>,
    format: &FormatSpec,
    limits: &Limits,
) -> Result<ProfileEdit> {
    let node = xs::find(doc, id)?;
    let block = read_block(doc, STA_ELEV, node.lines.clone(), format)
        .map_err(|e| e.within(id))?
        .ok_or_else(|| GeomError::NotFound(format!("{id}: no {STA_ELEV} block")))?;

    let points_in = profile.len();
    let mut p = profile.quantized(format).map_err(|e| e.within(id))?;

    let effective = match bank {
        Some(b) => Some(b),
        None => read_banks(doc, id)?,
    };
    let effective = effective
        .map(|b| b.quantized(format))
        .transpose()
        .map_err(|e| e.within(id))?;

    let mut inserted_banks = Vec::new();
    if let Some(b) = effective {
        b.check_within(&p).map_err(|e| e.within(id))?;
        for s in [b.left, b.right] {
            if p.contains_station(s) {
                continue;
            }
            // interpolate on the caller's values, round only the result
            let Some(elevation) = profile.elevation_at(s).or_else(|| p.elevation_at(s)) else {
                return Err(GeomError::Validation(format!(
                    "{id}: bank station {s} outside the profile"
                )));
            };
            let elevation = format.quantize(elevation);
            if p.insert_point(Point::new(s, elevation)) {
                tracing::debug!(xs = %id, station = s, elevation, "inserted bank station");
                inserted_banks.push(s);
            }
        }
    }

    let mut simplified = false;
    if p.len() > limits.max_points {
        let pinned: Vec<f64> = effective.map(|b| vec![b.left, b.right]).unwrap_or_default();
        let before = p.len();
        p = simplify(&p, limits.max_points, &pinned).map_err(|e| e.within(id))?;
        simplified = true;
        tracing::info!(xs = %id, from = before, to = p.len(), "profile simplified to point limit");
    }

    let values = p.to_flat();
    let overflow_fields = codec::overflow_count(&values, format.width, format.precision);
    if overflow_fields > 0 {
        tracing::warn!(xs = %id, fields = overflow_fields, "profile values overflow the field width");
    }

    let mut header = block.header.clone();
    header.count = p.len();
    let rendered = render_block(&header, &values, format);
    let new_len = rendered.len();

    // only a caller-supplied pair is written back; the file's own line stays as is
    let written_bank = bank.and(effective);
    let mut out = doc.clone();
    let existing_bank_line = bank_line(doc, &node.lines);
    if let (Some(b), Some(i)) = (written_bank, existing_bank_line) {
        out.set_line(i, format!("{BANK_STA}{}", b.render()));
    }
    replace_block(&mut out, block.span, rendered);
    if let (Some(b), None) = (written_bank, existing_bank_line) {
        out.insert_line(block.span.header + new_len, format!("{BANK_STA}{}", b.render()));
    }

    Ok(ProfileEdit {
        document: out,
        points_out: p.len(),
        profile: p,
        bank: effective,
        inserted_banks,
        simplified,
        points_in,
        overflow_fields,
    })
}
