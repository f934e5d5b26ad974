//! Asset output with change detection.
//!
//! A file that already holds the generated content is not rewritten, so its
//! modification time is kept across rebuilds.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while writing an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A parent directory could not be created.
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The existing file could not be compared.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// What happened to one asset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    /// The file did not exist.
    Created,
    /// The file existed with different content.
    Updated,
    /// The file already held this content and was not touched.
    Unchanged,
}

/// One asset handled by [`write_asset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenAsset {
    /// Output path.
    pub path: PathBuf,
    /// Content length in bytes.
    pub bytes: usize,
    /// Whether the file was created, rewritten or skipped.
    pub status: AssetStatus,
}

/// Writes `content` to `path` unless the file already holds it.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, an existing
/// file cannot be read, or the new content cannot be written.
pub fn write_asset(path: &Path, content: &str) -> Result<WrittenAsset, AssetError> {
    let status = match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => AssetStatus::Unchanged,
        Ok(_) => AssetStatus::Updated,
        Err(e) if e.kind() == io::ErrorKind::NotFound => AssetStatus::Created,
        Err(source) => {
            return Err(AssetError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if status != AssetStatus::Unchanged {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| AssetError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| AssetError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    tracing::debug!(path = %path.display(), bytes = content.len(), ?status, "asset");

    Ok(WrittenAsset {
        path: path.to_path_buf(),
        bytes: content.len(),
        status,
    })
}
