// crates/geofw-core/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeomError>;

#[derive(Debug, Error)]
pub enum GeomError {
    #[error("format error: {0}")]
    Format(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GeomError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeomError::Io {
            path: path.into(),
            source,
        }
    }

    /// Prefix the message with the record it concerns (cross section, storage area).
    pub fn within(self, owner: impl std::fmt::Display) -> Self {
        match self {
            GeomError::Format(m) => GeomError::Format(format!("{owner}: {m}")),
            GeomError::Validation(m) => GeomError::Validation(format!("{owner}: {m}")),
            GeomError::NotFound(m) => GeomError::NotFound(format!("{owner}: {m}")),
            io @ GeomError::Io { .. } => io,
        }
    }

    /// True for failures raised before anything was written.
    pub fn is_validation(&self) -> bool {
        matches!(self, GeomError::Validation(_) | GeomError::Format(_))
    }
}
