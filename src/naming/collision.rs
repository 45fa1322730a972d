//! Collision-safe path resolution.
//!
//! Given a candidate path, returns a path guaranteed not to exist at the
//! moment of the call, by suffixing an index onto the file stem. The check
//! is not a reservation: a narrow check/use window remains, which is
//! acceptable for the sequential download loop.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::export::ExportError;

/// Upper bound on suffix probes before resolution is reported as exhausted.
pub const MAX_COLLISION_PROBES: usize = 10_000;

/// Resolves a filesystem path that does not currently exist.
///
/// If `candidate` is free it is returned unchanged. Otherwise the stem is
/// suffixed `-2`, `-3`, ... until a free path is found.
///
/// # Errors
///
/// Returns [`ExportError::CollisionExhausted`] when no free name is found
/// within [`MAX_COLLISION_PROBES`] attempts.
pub fn resolve_unique_path(candidate: &Path) -> Result<PathBuf, ExportError> {
    if !candidate.exists() {
        return Ok(candidate.to_path_buf());
    }

    debug!(path = %candidate.display(), "file already exists, probing for a unique name");

    let file_name = candidate
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let (stem, extension) = match file_name.rfind('.') {
        // A leading dot is part of the name, not an extension separator.
        Some(pos) if pos > 0 => (&file_name[..pos], &file_name[pos..]),
        _ => (file_name, ""),
    };
    let parent = candidate.parent().unwrap_or_else(|| Path::new(""));

    for index in 2..2 + MAX_COLLISION_PROBES {
        let probe = parent.join(format!("{stem}-{index}{extension}"));
        if !probe.exists() {
            debug!(path = %probe.display(), "generated unique filename");
            return Ok(probe);
        }
    }

    Err(ExportError::CollisionExhausted {
        path: candidate.to_path_buf(),
        attempts: MAX_COLLISION_PROBES,
    })
}
