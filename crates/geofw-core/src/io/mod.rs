pub mod checksum;
pub mod commit;
pub mod text;

pub use commit::{commit, CommitReport};
