pub mod envelope;
pub mod segment;

pub use envelope::{repair, Classification, FixRecord, OverlapPolicy, Repair};
pub use segment::{read_obstructions, write_obstructions, Obstruction};
