// crates/geofw-core/src/validate.rs

use crate::error::{GeomError, Result};
use crate::obstruct::segment::Obstruction;
use crate::profile::profile::{BankPair, Point};
use crate::storage::StoragePoint;

pub fn validate_points(points: &[Point]) -> Result<()> {
    if points.len() < 2 {
        return Err(GeomError::Validation(format!(
            "profile: needs at least 2 points, got {}",
            points.len()
        )));
    }
    for (i, p) in points.iter().enumerate() {
        if !p.station.is_finite() || !p.elevation.is_finite() {
            return Err(GeomError::Validation(format!(
                "profile: point {} is not finite ({}, {})",
                i + 1,
                p.station,
                p.elevation
            )));
        }
    }
    for (i, w) in points.windows(2).enumerate() {
        if w[1].station == w[0].station {
            return Err(GeomError::Validation(format!(
                "profile: duplicate station {} at points {} and {}",
                w[1].station,
                i + 1,
                i + 2
            )));
        }
        if w[1].station < w[0].station {
            return Err(GeomError::Validation(format!(
                "profile: station {} at point {} is below station {} at point {}",
                w[1].station,
                i + 2,
                w[0].station,
                i + 1
            )));
        }
    }
    Ok(())
}

pub fn validate_bank(bank: &BankPair, first: f64, last: f64) -> Result<()> {
    if !bank.left.is_finite() || !bank.right.is_finite() {
        return Err(GeomError::Validation("bank: stations must be finite".into()));
    }
    if bank.left >= bank.right {
        return Err(GeomError::Validation(format!(
            "bank: left {} must be < right {}",
            bank.left, bank.right
        )));
    }
    for (side, s) in [("left", bank.left), ("right", bank.right)] {
        if s < first || s > last {
            return Err(GeomError::Validation(format!(
                "bank: {side} station {s} outside profile range [{first}, {last}]"
            )));
        }
    }
    Ok(())
}

pub fn validate_segments(segments: &[Obstruction]) -> Result<()> {
    for (i, s) in segments.iter().enumerate() {
        if !s.start.is_finite() || !s.end.is_finite() || !s.elevation.is_finite() {
            return Err(GeomError::Validation(format!(
                "obstruction {}: values must be finite",
                i + 1
            )));
        }
        if s.start >= s.end {
            return Err(GeomError::Validation(format!(
                "obstruction {}: start {} must be < end {}",
                i + 1,
                s.start,
                s.end
            )));
        }
        if s.elevation < 0.0 {
            return Err(GeomError::Validation(format!(
                "obstruction {}: negative elevation {}",
                i + 1,
                s.elevation
            )));
        }
    }
    Ok(())
}

pub fn validate_storage(points: &[StoragePoint]) -> Result<()> {
    if points.len() < 2 {
        return Err(GeomError::Validation(format!(
            "storage: needs at least 2 points, got {}",
            points.len()
        )));
    }
    for (i, w) in points.windows(2).enumerate() {
        if !(w[1].elevation > w[0].elevation) {
            return Err(GeomError::Validation(format!(
                "storage: elevation {} at point {} does not increase",
                w[1].elevation,
                i + 2
            )));
        }
        if w[1].volume < w[0].volume {
            return Err(GeomError::Validation(format!(
                "storage: volume {} at point {} decreases",
                w[1].volume,
                i + 2
            )));
        }
    }
    if let Some(p) = points.iter().find(|p| !p.volume.is_finite() || p.volume < 0.0) {
        return Err(GeomError::Validation(format!(
            "storage: volume {} at elevation {} is negative or not finite",
            p.volume, p.elevation
        )));
    }
    Ok(())
}
