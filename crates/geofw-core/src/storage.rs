// crates/geofw-core/src/storage.rs
//
// Elevation/volume curves of storage areas. A storage area owns the lines from
// its `Storage Area=` header up to the next storage area or river node.

use std::ops::Range;

use crate::config::FormatSpec;
use crate::doc::block::{read_block, render_block, replace_block};
use crate::doc::document::GeometryDocument;
use crate::doc::section::{NODE_TYPE, RIVER_REACH, STORAGE_AREA};
use crate::error::{GeomError, Result};
use crate::fixed::count::ELEV_VOLUME;
use crate::validate::validate_storage;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoragePoint {
    pub elevation: f64,
    pub volume: f64,
}

/// Elevation strictly increasing, volume non-decreasing.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageCurve {
    points: Vec<StoragePoint>,
}

impl StorageCurve {
    pub fn new(points: Vec<StoragePoint>) -> Result<Self> {
        validate_storage(&points)?;
        Ok(StorageCurve { points })
    }

    pub fn from_flat(values: &[f64]) -> Result<Self> {
        if values.len() % 2 != 0 {
            return Err(GeomError::Format(format!(
                "storage: odd number of values ({})",
                values.len()
            )));
        }
        StorageCurve::new(
            values
                .chunks_exact(2)
                .map(|c| StoragePoint {
                    elevation: c[0],
                    volume: c[1],
                })
                .collect(),
        )
    }

    pub fn points(&self) -> &[StoragePoint] {
        &self.points
    }

    /// Volume at `elevation` by linear interpolation; `None` outside the curve.
    pub fn volume_at(&self, elevation: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if elevation < first.elevation || elevation > last.elevation {
            return None;
        }
        let hi = self
            .points
            .partition_point(|p| p.elevation < elevation)
            .max(1);
        let (a, b) = (self.points[hi - 1], self.points[hi]);
        let t = (elevation - a.elevation) / (b.elevation - a.elevation);
        Some(a.volume + t * (b.volume - a.volume))
    }
}

fn area_name(line: &str) -> Option<&str> {
    let rest = line.split_once(STORAGE_AREA)?.1;
    Some(rest.split(',').next().unwrap_or("").trim())
}

/// Lines owned by the storage area called `name` (case-insensitive).
pub fn find_area(doc: &GeometryDocument, name: &str) -> Result<Range<usize>> {
    let lines = doc.lines();
    let start = lines
        .iter()
        .position(|l| area_name(l).is_some_and(|n| n.eq_ignore_ascii_case(name.trim())))
        .ok_or_else(|| GeomError::NotFound(format!("storage area {name:?}")))?;
    let end = (start + 1..lines.len())
        .find(|&i| {
            let l = &lines[i];
            l.contains(STORAGE_AREA) || l.contains(NODE_TYPE) || l.contains(RIVER_REACH)
        })
        .unwrap_or(lines.len());
    Ok(start..end)
}

pub fn storage_areas(doc: &GeometryDocument) -> Vec<String> {
    doc.lines()
        .iter()
        .filter_map(|l| area_name(l))
        .map(str::to_string)
        .collect()
}

/// `Ok(None)` when the area exists but has no elevation/volume block.
pub fn read_storage(
    doc: &GeometryDocument,
    name: &str,
    format: &FormatSpec,
) -> Result<Option<StorageCurve>> {
    let owner = format!("storage area {name}");
    let range = find_area(doc, name)?;
    let Some(block) = read_block(doc, ELEV_VOLUME, range, format).map_err(|e| e.within(&owner))?
    else {
        return Ok(None);
    };
    let values = block.values(&owner)?;
    StorageCurve::from_flat(&values)
        .map(Some)
        .map_err(|e| e.within(&owner))
}

pub fn write_storage(
    doc: &GeometryDocument,
    name: &str,
    curve: &StorageCurve,
    format: &FormatSpec,
) -> Result<GeometryDocument> {
    let owner = format!("storage area {name}");
    let range = find_area(doc, name)?;
    let block = read_block(doc, ELEV_VOLUME, range, format)
        .map_err(|e| e.within(&owner))?
        .ok_or_else(|| GeomError::NotFound(format!("{owner}: no {ELEV_VOLUME} block")))?;

    let mut header = block.header.clone();
    header.count = curve.points.len();
    let values: Vec<f64> = curve
        .points
        .iter()
        .flat_map(|p| [p.elevation, p.volume])
        .collect();

    let mut out = doc.clone();
    replace_block(&mut out, block.span, render_block(&header, &values, format));
    Ok(out)
}
