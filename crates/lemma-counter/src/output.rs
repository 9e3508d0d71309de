use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;
use thiserror::Error;

use crate::record::LemmaRecord;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write output {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize lemma records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Render records as a pretty-printed JSON array (2-space indent, literal UTF-8).
pub fn to_json_string(records: &[LemmaRecord]) -> Result<String, WriteError> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

/// Write records to `path`, replacing it only once the whole document is on disk.
pub fn write_records(path: impl AsRef<Path>, records: &[LemmaRecord]) -> Result<(), WriteError> {
    let path = path.as_ref();
    let json = to_json_string(records)?;
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // The replacement keeps the destination's mode, or gets a plain
    // umask-governed mode when the destination is new.
    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());
    let mut builder = Builder::new();
    if let Some(perms) = existing.clone().or_else(new_file_permissions) {
        builder.permissions(perms);
    }
    let mut file = builder.tempfile_in(dir).map_err(io_err)?;
    if let Some(perms) = existing {
        file.as_file().set_permissions(perms).map_err(io_err)?;
    }
    file.write_all(json.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    file.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
