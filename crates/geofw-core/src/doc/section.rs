// crates/geofw-core/src/doc/section.rs
//
// Sections are flat: a header line, then body lines up to the first blank
// line or the first line carrying any recognized keyword. The same rule is
// used for every keyword and is not configurable; the application that
// re-reads these files splits them the same way.

use std::ops::Range;

use crate::fixed::count::{BLOCK_OBSTRUCT, ELEV_VOLUME, MANNING, STA_ELEV};

pub const RIVER_REACH: &str = "River Reach=";
pub const NODE_TYPE: &str = "Type RM Length L Ch R =";
pub const BANK_STA: &str = "Bank Sta=";
pub const STORAGE_AREA: &str = "Storage Area=";

/// Every keyword that starts a section (and therefore ends the previous one).
pub const RECOGNIZED: &[&str] = &[
    STA_ELEV,
    ELEV_VOLUME,
    MANNING,
    BLOCK_OBSTRUCT,
    BANK_STA,
    RIVER_REACH,
    NODE_TYPE,
    STORAGE_AREA,
    "Geom Title=",
    "Program Version=",
    "Viewing Rectangle=",
    "Reach XY=",
    "Rch Text X Y=",
    "Reverse River Text=",
    "Junct Name=",
    "Node Last Edited Time=",
    "Node Name=",
    "Node Description:",
    "XS GIS Cut Line=",
    "XS Rating Curve=",
    "XS HTab Starting El and Incr=",
    "XS HTab Horizontal Distribution=",
    "Mann Blocked Obstruct=",
    "#XS Ineff=",
    "Permanent Ineff=",
    "Levee=",
    "XS Dec=",
    "Exp/Cntr=",
    "Storage Area Surface Line=",
    "Storage Area Type=",
    "Storage Area Is2D=",
    "Connection=",
    "LCMann Time=",
    "Chan Stop Cuts=",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionSpan {
    /// Index of the header line.
    pub header: usize,
    /// One past the last body line.
    pub end: usize,
}

impl SectionSpan {
    pub fn body(&self) -> Range<usize> {
        self.header + 1..self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.header..self.end
    }
}

pub fn is_keyword_line(line: &str) -> bool {
    RECOGNIZED.iter().any(|k| line.contains(k))
}

pub fn is_terminator(line: &str) -> bool {
    line.trim().is_empty() || is_keyword_line(line)
}

/// First section headed by `keyword` at or after `from`.
pub fn locate<S: AsRef<str>>(lines: &[S], keyword: &str, from: usize) -> Option<SectionSpan> {
    locate_in(lines, keyword, from..lines.len())
}

/// Like `locate`, but neither the header search nor the body may leave `bounds`.
pub fn locate_in<S: AsRef<str>>(
    lines: &[S],
    keyword: &str,
    bounds: Range<usize>,
) -> Option<SectionSpan> {
    let stop = bounds.end.min(lines.len());
    let header = (bounds.start..stop).find(|&i| lines[i].as_ref().contains(keyword))?;
    let end = (header + 1..stop)
        .find(|&i| is_terminator(lines[i].as_ref()))
        .unwrap_or(stop);
    Some(SectionSpan { header, end })
}
