// crates/geofw-cli/src/io/mod.rs

pub mod points;
pub mod report;
