// crates/geofw-core/src/io/text.rs
//
// Text conventions of geometry files.
// Read: try each encoding in the chain, first clean decode wins.
// Write: CRLF after every line, re-encoded with the encoding the file came in,
// with the UTF-8 byte-order mark restored when the file had one.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::error::{GeomError, Result};

pub const LINE_ENDING: &str = "\r\n";

/// Primary encoding followed by legacy fallbacks.
pub fn default_chain() -> Vec<&'static Encoding> {
    vec![UTF_8, WINDOWS_1252]
}

/// Convert CRLF and lone CR to LF. All other bytes unchanged.
pub fn normalize_newlines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
            continue;
        }
        out.push(c);
    }
    out
}

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text of a file plus what is needed to write it back the same way.
#[derive(Clone, Debug)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static Encoding,
    /// The bytes started with a UTF-8 byte-order mark.
    pub bom: bool,
}

/// Decode with the first encoding in `chain` that accepts the bytes unchanged.
pub fn decode_text(bytes: &[u8], chain: &[&'static Encoding]) -> Result<Decoded> {
    let (body, bom) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (bytes, false),
    };
    for &enc in chain {
        if let Some(text) = enc.decode_without_bom_handling_and_without_replacement(body) {
            tracing::debug!(encoding = enc.name(), bom, "decoded geometry text");
            return Ok(Decoded {
                text: text.into_owned(),
                encoding: enc,
                bom,
            });
        }
        tracing::debug!(encoding = enc.name(), "decode failed, trying next encoding");
    }
    let names: Vec<&str> = chain.iter().map(|e| e.name()).collect();
    Err(GeomError::Format(format!(
        "text: bytes are not valid in any of {names:?}"
    )))
}

pub fn split_lines(text: &str) -> Vec<String> {
    let norm = normalize_newlines(text);
    if norm.is_empty() {
        return Vec::new();
    }
    let body = norm.strip_suffix('\n').unwrap_or(&norm);
    body.split('\n').map(str::to_string).collect()
}

/// Join with CRLF and encode; characters the encoding cannot carry are an error.
/// `bom` puts the UTF-8 byte-order mark back in front.
pub fn encode_lines(lines: &[String], enc: &'static Encoding, bom: bool) -> Result<Vec<u8>> {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
    for l in lines {
        text.push_str(l);
        text.push_str(LINE_ENDING);
    }
    let (bytes, used, unmappable) = enc.encode(&text);
    if unmappable || used != enc {
        return Err(GeomError::Format(format!(
            "text: content cannot be represented in {}",
            enc.name()
        )));
    }
    if bom {
        let mut out = Vec::with_capacity(UTF8_BOM.len() + bytes.len());
        out.extend_from_slice(UTF8_BOM);
        out.extend_from_slice(&bytes);
        return Ok(out);
    }
    Ok(bytes.into_owned())
}
