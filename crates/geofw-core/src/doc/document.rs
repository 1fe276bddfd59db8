// crates/geofw-core/src/doc/document.rs

use std::ops::Range;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};

use crate::error::{GeomError, Result};
use crate::io::checksum::crc32;
use crate::io::text;

/// One geometry file held in memory as lines.
///
/// Editors never mutate a document in place; they take `&GeometryDocument`
/// and return the edited copy, so a failed edit leaves the caller's copy as
/// loaded.
#[derive(Clone, Debug)]
pub struct GeometryDocument {
    lines: Vec<String>,
    encoding: &'static Encoding,
    bom: bool,
    origin: Option<PathBuf>,
}

impl GeometryDocument {
    pub fn from_text(text: &str) -> Self {
        GeometryDocument {
            lines: text::split_lines(text),
            encoding: UTF_8,
            bom: false,
            origin: None,
        }
    }

    pub fn from_bytes(bytes: &[u8], chain: &[&'static Encoding]) -> Result<Self> {
        let decoded = text::decode_text(bytes, chain)?;
        Ok(GeometryDocument {
            lines: text::split_lines(&decoded.text),
            encoding: decoded.encoding,
            bom: decoded.bom,
            origin: None,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, &text::default_chain())
    }

    pub fn load_with(path: &Path, chain: &[&'static Encoding]) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| GeomError::io(path, e))?;
        let mut doc = Self::from_bytes(&bytes, chain).map_err(|e| match e {
            GeomError::Format(m) => GeomError::Format(format!("{}: {m}", path.display())),
            other => other,
        })?;
        doc.origin = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            lines = doc.lines.len(),
            encoding = doc.encoding.name(),
            "loaded geometry document"
        );
        Ok(doc)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, i: usize) -> Option<&str> {
        self.lines.get(i).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Replace `range` with `replacement`. Returns the shift applied to
    /// every line index after the range.
    pub(crate) fn splice(&mut self, range: Range<usize>, replacement: Vec<String>) -> isize {
        let removed = range.len() as isize;
        let added = replacement.len() as isize;
        self.lines.splice(range, replacement);
        added - removed
    }

    pub(crate) fn set_line(&mut self, i: usize, line: String) {
        self.lines[i] = line;
    }

    pub(crate) fn insert_line(&mut self, i: usize, line: String) {
        self.lines.insert(i, line);
    }

    /// Bytes as they would be committed: CRLF endings, original encoding and
    /// byte-order mark.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        text::encode_lines(&self.lines, self.encoding, self.bom)
    }

    /// crc32 of `to_bytes()`; equal fingerprints mean a commit would be a no-op.
    pub fn fingerprint(&self) -> Result<u32> {
        Ok(crc32(&self.to_bytes()?))
    }
}
