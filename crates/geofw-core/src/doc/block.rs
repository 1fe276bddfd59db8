// crates/geofw-core/src/doc/block.rs
//
// A counted numeric block: a header such as `#Sta/Elev= 40` followed by
// fixed-width body lines holding exactly the number of values the header's
// count semantics imply.

use std::ops::Range;

use crate::config::FormatSpec;
use crate::doc::document::GeometryDocument;
use crate::doc::section::{locate_in, SectionSpan};
use crate::error::{GeomError, Result};
use crate::fixed::codec::{self, Field};
use crate::fixed::count::{parse_header, Header};

#[derive(Clone, Debug)]
pub struct Block {
    pub span: SectionSpan,
    pub header: Header,
    pub fields: Vec<Field>,
}

impl Block {
    pub fn overflow_slots(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_overflow())
            .map(|(i, _)| i)
            .collect()
    }

    /// All fields as numbers; an overflowed slot cannot become a typed value.
    pub fn values(&self, owner: &str) -> Result<Vec<f64>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| {
                f.value().ok_or_else(|| {
                    GeomError::Validation(format!(
                        "{owner}: {} value {} is an overflow marker",
                        self.header.keyword,
                        i + 1
                    ))
                })
            })
            .collect()
    }
}

/// Read the block headed by `keyword` inside `bounds`. `Ok(None)` means the
/// block is absent, which is distinct from a block that fails to decode.
pub fn read_block(
    doc: &GeometryDocument,
    keyword: &str,
    bounds: Range<usize>,
    format: &FormatSpec,
) -> Result<Option<Block>> {
    let lines = doc.lines();
    let Some(span) = locate_in(lines, keyword, bounds) else {
        return Ok(None);
    };

    let header = parse_header(&lines[span.header])
        .map_err(|e| at_line(e, span.header))?;
    let expected = header.total_values()?;
    let fields = codec::decode_lines(&lines[span.body()], format.width)
        .map_err(|e| at_line(e, span.header))?;

    if fields.len() != expected {
        return Err(GeomError::Format(format!(
            "line {}: {} declares {} ({} values) but body holds {}",
            span.header + 1,
            header.keyword,
            header.count,
            expected,
            fields.len()
        )));
    }

    tracing::debug!(
        keyword = %header.keyword,
        count = header.count,
        lines = span.body().len(),
        "decoded block"
    );
    Ok(Some(Block {
        span,
        header,
        fields,
    }))
}

fn at_line(e: GeomError, header: usize) -> GeomError {
    match e {
        GeomError::Format(m) => GeomError::Format(format!("line {}: {m}", header + 1)),
        other => other,
    }
}

/// Header line followed by the encoded body.
pub fn render_block(header: &Header, values: &[f64], format: &FormatSpec) -> Vec<String> {
    let mut out = Vec::with_capacity(1 + values.len() / format.per_line.max(1) + 1);
    out.push(header.render());
    out.extend(codec::encode(
        values,
        format.width,
        format.per_line,
        format.precision,
    ));
    out
}

/// Swap the lines of `span` for `lines`; returns the index shift after it.
pub fn replace_block(doc: &mut GeometryDocument, span: SectionSpan, lines: Vec<String>) -> isize {
    doc.splice(span.range(), lines)
}
