// crates/geofw-core/src/fixed/codec.rs

use crate::error::{GeomError, Result};

pub const OVERFLOW_CHAR: char = '*';

/// One decoded fixed-width slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field {
    Value(f64),
    /// The writer ran out of columns; the magnitude is unknown.
    Overflow,
}

impl Field {
    pub fn value(self) -> Option<f64> {
        match self {
            Field::Value(v) => Some(v),
            Field::Overflow => None,
        }
    }

    pub fn is_overflow(self) -> bool {
        matches!(self, Field::Overflow)
    }
}

/// Split `line` into `width`-character slots and parse each one.
///
/// Trailing blank slots are dropped (lines are often right-trimmed on disk).
/// A blank slot followed by data is rejected, since positions would shift.
pub fn decode(line: &str, width: usize) -> Result<Vec<Field>> {
    if width == 0 {
        return Err(GeomError::Format("codec: field width must be > 0".into()));
    }
    let chars: Vec<char> = line.trim_end_matches(['\r', '\n']).chars().collect();
    let slots: Vec<String> = chars.chunks(width).map(|c| c.iter().collect()).collect();

    let used = slots
        .iter()
        .rposition(|s| !s.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut out = Vec::with_capacity(used);
    for (i, slot) in slots[..used].iter().enumerate() {
        out.push(decode_slot(slot, i)?);
    }
    Ok(out)
}

fn decode_slot(slot: &str, index: usize) -> Result<Field> {
    let t = slot.trim();
    if t.is_empty() {
        return Err(GeomError::Format(format!(
            "codec: blank field at slot {index} precedes data"
        )));
    }
    if t.chars().all(|c| c == OVERFLOW_CHAR) {
        return Ok(Field::Overflow);
    }
    t.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Field::Value)
        .ok_or_else(|| GeomError::Format(format!("codec: slot {index} is not numeric: {t:?}")))
}

/// Right-align one value in `width` columns, or emit the overflow marker.
pub fn format_field(v: f64, width: usize, precision: usize) -> String {
    if !v.is_finite() {
        return overflow_marker(width);
    }
    let s = format!("{v:>width$.precision$}");
    if s.chars().count() > width {
        overflow_marker(width)
    } else {
        s
    }
}

pub fn overflow_marker(width: usize) -> String {
    std::iter::repeat(OVERFLOW_CHAR).take(width).collect()
}

/// Encode values into lines of `per_line` fields each.
pub fn encode(values: &[f64], width: usize, per_line: usize, precision: usize) -> Vec<String> {
    let per_line = per_line.max(1);
    values
        .chunks(per_line)
        .map(|chunk| {
            let mut line = String::with_capacity(chunk.len() * width);
            for &v in chunk {
                line.push_str(&format_field(v, width, precision));
            }
            line
        })
        .collect()
}

/// Decode a run of body lines into one flat field list.
pub fn decode_lines<S: AsRef<str>>(lines: &[S], width: usize) -> Result<Vec<Field>> {
    let mut out = Vec::new();
    for (n, line) in lines.iter().enumerate() {
        let fields = decode(line.as_ref(), width).map_err(|e| match e {
            GeomError::Format(m) => GeomError::Format(format!("body line {}: {m}", n + 1)),
            other => other,
        })?;
        out.extend(fields);
    }
    Ok(out)
}

/// Count of overflow markers an encoding of `values` would contain.
pub fn overflow_count(values: &[f64], width: usize, precision: usize) -> usize {
    values
        .iter()
        .filter(|&&v| format_field(v, width, precision).starts_with(OVERFLOW_CHAR))
        .count()
}
