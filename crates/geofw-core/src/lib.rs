pub mod config;
pub mod error;
pub mod validate;

pub mod doc;
pub mod edit;
pub mod fixed;
pub mod io;
pub mod obstruct;
pub mod profile;
pub mod source;
pub mod storage;

#[cfg(feature = "render")]
pub mod render;

pub use crate::config::{EditConfig, FormatSpec, Limits};
pub use crate::doc::{GeometryDocument, XsId};
pub use crate::error::{GeomError, Result};
pub use crate::obstruct::{Classification, FixRecord, Obstruction, OverlapPolicy};
pub use crate::profile::{BankPair, Point, Profile};
pub use crate::source::{EditContext, GeometrySource, ProjectContext};
