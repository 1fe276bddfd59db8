pub mod editor;
pub mod profile;
pub mod simplify;

pub use editor::{read_banks, read_profile, read_roughness, write_profile, ProfileEdit};
pub use profile::{BankPair, Point, Profile};
pub use simplify::simplify;
