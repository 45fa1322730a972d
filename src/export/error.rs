//! Error types for the export orchestrator.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Errors raised while mirroring a group's albums onto disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A listing operation failed (albums of a group, photos of an album).
    #[error("failed to list {what}: {source}")]
    Listing {
        /// What was being listed.
        what: String,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// An output directory could not be created.
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// No free filename was found within the probe bound.
    #[error("no unique filename found for {path:?} after {attempts} attempts")]
    CollisionExhausted {
        /// The fully-occupied candidate path.
        path: PathBuf,
        /// How many suffixes were probed.
        attempts: usize,
    },

    /// The content type of an extensionless download could not be
    /// determined. The file is kept on disk under its extensionless name.
    #[error("could not sniff content type of {path:?}: {reason}")]
    ContentSniff {
        /// The extensionless file that was sniffed.
        path: PathBuf,
        /// Why sniffing failed.
        reason: String,
    },

    /// Renaming a file to carry its recovered extension failed.
    #[error("failed to rename {from:?} to {to:?}: {source}")]
    Rename {
        /// The extensionless source path.
        from: PathBuf,
        /// The intended destination path.
        to: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Downloading one photo failed. Fatal to that item only.
    #[error("failed to download {name}: {source}")]
    Download {
        /// The photo's remote display name.
        name: String,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },
}

impl ExportError {
    /// Creates a listing error with a description of what was listed.
    pub fn listing(what: impl Into<String>, source: ApiError) -> Self {
        Self::Listing {
            what: what.into(),
            source,
        }
    }

    /// Creates a directory-creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a content-sniff failure with full context.
    pub fn content_sniff(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ContentSniff {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a rename error.
    pub fn rename(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Rename {
            from: from.into(),
            to: to.into(),
            source,
        }
    }

    /// Creates a per-photo download error.
    pub fn download(name: impl Into<String>, source: ApiError) -> Self {
        Self::Download {
            name: name.into(),
            source,
        }
    }
}
