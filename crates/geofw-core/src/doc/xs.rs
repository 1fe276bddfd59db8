// crates/geofw-core/src/doc/xs.rs

use std::fmt;
use std::ops::Range;

use crate::doc::document::GeometryDocument;
use crate::doc::section::{NODE_TYPE, RIVER_REACH, STORAGE_AREA};
use crate::error::{GeomError, Result};

/// Node type code of a cross section on the `Type RM Length L Ch R` line.
pub const XS_NODE_TYPE: u32 = 1;

/// Lines that close the current node.
const NODE_BOUNDARIES: &[&str] = &[NODE_TYPE, RIVER_REACH, STORAGE_AREA, "Junct Name=", "Connection="];

/// River / reach / station triple naming one cross section.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct XsId {
    pub river: String,
    pub reach: String,
    pub station: String,
}

impl XsId {
    pub fn new(river: &str, reach: &str, station: &str) -> Self {
        XsId {
            river: river.trim().to_string(),
            reach: reach.trim().to_string(),
            station: station.trim().to_string(),
        }
    }

    /// `river,reach,station`
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.trim().is_empty()) {
            return Err(GeomError::Validation(format!(
                "xs id must be river,reach,station: {s:?}"
            )));
        }
        Ok(XsId::new(parts[0], parts[1], parts[2]))
    }

    /// Stations compare numerically when both parse, so `5.390` finds `5.39`.
    pub fn matches(&self, other: &XsId) -> bool {
        if !self.river.eq_ignore_ascii_case(&other.river)
            || !self.reach.eq_ignore_ascii_case(&other.reach)
        {
            return false;
        }
        match (self.station.parse::<f64>(), other.station.parse::<f64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.station == other.station,
        }
    }
}

impl fmt::Display for XsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.river, self.reach, self.station)
    }
}

/// A node (cross section, bridge, culvert, ...) and the lines it owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeRef {
    pub id: XsId,
    pub node_type: u32,
    pub lines: Range<usize>,
}

impl NodeRef {
    pub fn is_cross_section(&self) -> bool {
        self.node_type == XS_NODE_TYPE
    }
}

fn after_eq(line: &str) -> &str {
    line.find('=').map(|i| &line[i + 1..]).unwrap_or("")
}

fn is_boundary(line: &str) -> bool {
    NODE_BOUNDARIES.iter().any(|k| line.contains(k))
}

/// Every river node in file order.
pub fn nodes(doc: &GeometryDocument) -> Result<Vec<NodeRef>> {
    let lines = doc.lines();
    let mut river = String::new();
    let mut reach = String::new();
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if line.contains(RIVER_REACH) {
            let mut it = after_eq(line).splitn(2, ',');
            river = it.next().unwrap_or("").trim().to_string();
            reach = it.next().unwrap_or("").trim().to_string();
            continue;
        }
        if !line.contains(NODE_TYPE) {
            continue;
        }

        let mut fields = after_eq(line).split(',');
        let type_txt = fields.next().unwrap_or("").trim();
        let node_type = type_txt.parse::<u32>().map_err(|_| {
            GeomError::Format(format!("line {}: bad node type {type_txt:?}", i + 1))
        })?;
        let station = fields.next().unwrap_or("").trim();
        if station.is_empty() {
            return Err(GeomError::Format(format!("line {}: node has no station", i + 1)));
        }

        let end = (i + 1..lines.len())
            .find(|&j| is_boundary(&lines[j]))
            .unwrap_or(lines.len());
        out.push(NodeRef {
            id: XsId::new(&river, &reach, station),
            node_type,
            lines: i..end,
        });
    }
    Ok(out)
}

pub fn cross_sections(doc: &GeometryDocument) -> Result<Vec<NodeRef>> {
    Ok(nodes(doc)?
        .into_iter()
        .filter(NodeRef::is_cross_section)
        .collect())
}

pub fn find(doc: &GeometryDocument, id: &XsId) -> Result<NodeRef> {
    cross_sections(doc)?
        .into_iter()
        .find(|n| n.id.matches(id))
        .ok_or_else(|| GeomError::NotFound(format!("cross section {id}")))
}
