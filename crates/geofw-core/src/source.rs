// crates/geofw-core/src/source.rs
//
// Where a geometry file comes from. Every operation receives the project
// context explicitly and resolves its source to one concrete path before any
// parsing starts.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::EditConfig;
use crate::error::{GeomError, Result};

/// The project a set of geometry files belongs to: `<dir>/<name>.gNN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectContext {
    pub dir: PathBuf,
    pub name: String,
}

impl ProjectContext {
    pub fn new(dir: impl Into<PathBuf>, name: &str) -> Self {
        ProjectContext {
            dir: dir.into(),
            name: name.to_string(),
        }
    }

    /// Path of geometry identifier `g01`..`g99`.
    pub fn geometry_path(&self, ident: &str) -> Result<PathBuf> {
        let id = ident.trim().trim_start_matches('.').to_ascii_lowercase();
        let digits = id.strip_prefix('g').unwrap_or("");
        let valid = digits.len() == 2
            && digits.bytes().all(|b| b.is_ascii_digit())
            && digits != "00";
        if !valid {
            return Err(GeomError::Validation(format!(
                "source: {ident:?} is not a geometry identifier (g01..g99)"
            )));
        }
        if self.name.is_empty() {
            return Err(GeomError::Validation(
                "source: project name is required to resolve an identifier".into(),
            ));
        }
        Ok(self.dir.join(format!("{}.{id}", self.name)))
    }
}

/// A file already opened by the caller, remembered with its path.
#[derive(Debug)]
pub struct GeometryHandle {
    path: PathBuf,
    _file: File,
}

impl GeometryHandle {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::open(&path).map_err(|e| GeomError::io(&path, e))?;
        Ok(GeometryHandle { path, _file: file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug)]
pub enum GeometrySource {
    /// `g01`-style identifier inside the project.
    Identifier(String),
    /// Relative paths are taken from the project directory.
    Path(PathBuf),
    OpenHandle(GeometryHandle),
}

impl GeometrySource {
    pub fn resolve(&self, project: &ProjectContext) -> Result<PathBuf> {
        match self {
            GeometrySource::Identifier(id) => project.geometry_path(id),
            GeometrySource::Path(p) if p.is_relative() => Ok(project.dir.join(p)),
            GeometrySource::Path(p) => Ok(p.clone()),
            GeometrySource::OpenHandle(h) => Ok(h.path().to_path_buf()),
        }
    }
}

/// Everything an edit needs besides its arguments.
#[derive(Clone, Debug)]
pub struct EditContext {
    pub project: ProjectContext,
    pub config: EditConfig,
}

impl EditContext {
    pub fn new(project: ProjectContext, config: EditConfig) -> Self {
        EditContext { project, config }
    }
}
