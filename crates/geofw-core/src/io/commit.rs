// crates/geofw-core/src/io/commit.rs
//
// Backup-then-atomic-replace. Order of operations:
//   1. stat target (must exist, must be a regular file)
//   2. copy target -> <target>.bak, re-read both, compare blake3_16
//   3. write new bytes to a temp file in the target's directory, fsync
//   4. rename temp over target
// A failure at any step leaves the target as it was.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::BACKUP_SUFFIX;
use crate::error::{GeomError, Result};
use crate::io::checksum::{blake3_16, hex16};

#[derive(Clone, Debug)]
pub struct CommitReport {
    pub target: PathBuf,
    pub backup: Option<PathBuf>,
    pub bytes_written: usize,
    /// blake3_16 of the written content.
    pub digest: [u8; 16],
}

impl CommitReport {
    pub fn digest_hex(&self) -> String {
        hex16(&self.digest)
    }
}

/// `foo.g01` -> `foo.g01.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

pub fn commit(path: &Path, content: &[u8], make_backup: bool) -> Result<CommitReport> {
    commit_with(path, content, make_backup, |tmp, target| {
        tmp.persist(target).map(|_| ()).map_err(|e| e.error)
    })
}

fn commit_with<F>(path: &Path, content: &[u8], make_backup: bool, replace: F) -> Result<CommitReport>
where
    F: FnOnce(NamedTempFile, &Path) -> std::io::Result<()>,
{
    let meta = fs::metadata(path).map_err(|e| GeomError::io(path, e))?;
    if !meta.is_file() {
        return Err(GeomError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    let backup = if make_backup {
        Some(write_backup(path)?)
    } else {
        None
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| GeomError::io(&dir, e))?;
    tmp.write_all(content)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| GeomError::io(tmp.path(), e))?;
    fs::set_permissions(tmp.path(), meta.permissions()).map_err(|e| GeomError::io(tmp.path(), e))?;

    replace(tmp, path).map_err(|e| GeomError::io(path, e))?;

    let report = CommitReport {
        target: path.to_path_buf(),
        backup,
        bytes_written: content.len(),
        digest: blake3_16(content),
    };
    tracing::info!(
        target = %path.display(),
        bytes = report.bytes_written,
        digest = %report.digest_hex(),
        backup = ?report.backup,
        "committed geometry file"
    );
    Ok(report)
}

fn write_backup(path: &Path) -> Result<PathBuf> {
    let bak = backup_path(path);
    fs::copy(path, &bak).map_err(|e| GeomError::io(&bak, e))?;

    let original = fs::read(path).map_err(|e| GeomError::io(path, e))?;
    let copy = fs::read(&bak).map_err(|e| GeomError::io(&bak, e))?;
    if blake3_16(&original) != blake3_16(&copy) {
        return Err(GeomError::io(
            &bak,
            std::io::Error::new(std::io::ErrorKind::Other, "backup does not match original"),
        ));
    }
    fs::File::open(&bak)
        .and_then(|f| f.sync_all())
        .map_err(|e| GeomError::io(&bak, e))?;

    tracing::debug!(backup = %bak.display(), bytes = copy.len(), "backup verified");
    Ok(bak)
}
