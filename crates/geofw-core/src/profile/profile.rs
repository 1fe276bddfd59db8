// crates/geofw-core/src/profile/profile.rs

use crate::config::FormatSpec;
use crate::error::{GeomError, Result};
use crate::validate::{validate_bank, validate_points};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub station: f64,
    pub elevation: f64,
}

impl Point {
    pub fn new(station: f64, elevation: f64) -> Self {
        Point { station, elevation }
    }
}

/// Station–elevation profile. Stations strictly increase; at least 2 points.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    points: Vec<Point>,
}

impl Profile {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        validate_points(&points)?;
        Ok(Profile { points })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Profile::new(pairs.iter().map(|&(s, e)| Point::new(s, e)).collect())
    }

    /// `[s0, e0, s1, e1, ...]` as stored on disk.
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        if values.len() % 2 != 0 {
            return Err(GeomError::Format(format!(
                "profile: odd number of values ({})",
                values.len()
            )));
        }
        Profile::new(
            values
                .chunks_exact(2)
                .map(|c| Point::new(c[0], c[1]))
                .collect(),
        )
    }

    pub fn to_flat(&self) -> Vec<f64> {
        self.points
            .iter()
            .flat_map(|p| [p.station, p.elevation])
            .collect()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn stations(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.station)
    }

    pub fn index_of(&self, station: f64) -> Option<usize> {
        self.points
            .binary_search_by(|p| p.station.total_cmp(&station))
            .ok()
    }

    pub fn contains_station(&self, station: f64) -> bool {
        self.index_of(station).is_some()
    }

    /// Lowest point; the first one when several share the minimum.
    pub fn thalweg(&self) -> Point {
        self.points
            .iter()
            .copied()
            .fold(self.points[0], |lo, p| if p.elevation < lo.elevation { p } else { lo })
    }

    /// Linear interpolation between the bracketing points; `None` outside the range.
    pub fn elevation_at(&self, station: f64) -> Option<f64> {
        if station < self.first().station || station > self.last().station {
            return None;
        }
        if let Some(i) = self.index_of(station) {
            return Some(self.points[i].elevation);
        }
        let hi = self.points.partition_point(|p| p.station < station);
        let (a, b) = (self.points[hi - 1], self.points[hi]);
        let t = (station - a.station) / (b.station - a.station);
        Some(a.elevation + t * (b.elevation - a.elevation))
    }

    /// Insert an interpolated point at `station` unless one already exists.
    /// Returns whether a point was added.
    pub fn insert_station(&mut self, station: f64) -> Result<bool> {
        if self.contains_station(station) {
            return Ok(false);
        }
        let elevation = self.elevation_at(station).ok_or_else(|| {
            GeomError::Validation(format!(
                "profile: station {station} outside [{}, {}]",
                self.first().station,
                self.last().station
            ))
        })?;
        Ok(self.insert_point(Point::new(station, elevation)))
    }

    /// Insert `point` in station order. `false` when its station is taken.
    pub fn insert_point(&mut self, point: Point) -> bool {
        if self.contains_station(point.station) {
            return false;
        }
        let at = self.points.partition_point(|p| p.station < point.station);
        self.points.insert(at, point);
        true
    }

    /// Snap every value to the encoder's grid and re-check ordering, so two
    /// stations that would print identically are caught before writing.
    pub fn quantized(&self, format: &FormatSpec) -> Result<Profile> {
        Profile::new(
            self.points
                .iter()
                .map(|p| Point::new(format.quantize(p.station), format.quantize(p.elevation)))
                .collect(),
        )
        .map_err(|e| match e {
            GeomError::Validation(m) => GeomError::Validation(format!(
                "{m} (after rounding to {} decimals)",
                format.precision
            )),
            other => other,
        })
    }

    /// Keep only the points whose index is flagged. Order is preserved.
    pub(crate) fn retain_mask(&self, keep: &[bool]) -> Result<Profile> {
        Profile::new(
            self.points
                .iter()
                .zip(keep)
                .filter(|&(_, &k)| k)
                .map(|(p, _)| *p)
                .collect(),
        )
    }
}

/// Main-channel limits. `left < right`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BankPair {
    pub left: f64,
    pub right: f64,
}

impl BankPair {
    pub fn new(left: f64, right: f64) -> Result<Self> {
        if !(left < right) {
            return Err(GeomError::Validation(format!(
                "bank: left {left} must be < right {right}"
            )));
        }
        Ok(BankPair { left, right })
    }

    pub fn check_within(&self, profile: &Profile) -> Result<()> {
        validate_bank(self, profile.first().station, profile.last().station)
    }

    pub fn quantized(&self, format: &FormatSpec) -> Result<BankPair> {
        BankPair::new(format.quantize(self.left), format.quantize(self.right))
    }

    /// `Bank Sta=` value text, e.g. `100,200.5`.
    pub fn render(&self) -> String {
        format!("{},{}", self.left, self.right)
    }

    pub fn parse(text: &str) -> Result<BankPair> {
        let mut it = text.split(',').map(str::trim);
        let (Some(l), Some(r), None) = (it.next(), it.next(), it.next()) else {
            return Err(GeomError::Format(format!("bank: expected two stations in {text:?}")));
        };
        let parse = |s: &str| {
            s.parse::<f64>()
                .map_err(|_| GeomError::Format(format!("bank: bad station {s:?}")))
        };
        BankPair::new(parse(l)?, parse(r)?)
    }
}
