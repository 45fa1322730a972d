//! The download orchestrator.
//!
//! Drives one export run: for the selected group, enumerate albums, create
//! a directory per album, enumerate photos, and for each photo sanitize the
//! name, resolve collisions, stream the bytes to disk, and recover a
//! missing extension from the file content. Albums are processed strictly
//! sequentially, each to completion; paths are constructed by explicit
//! joining, never by changing the working directory.
//!
//! Failure policy: a per-photo failure is logged and does not abort the
//! surrounding album; a per-album failure (directory creation, photo
//! listing) aborts that album only; group-level failures abort the run.
//! Nothing is retried automatically.

mod error;

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::api::{Album, ApiClient, Group, Photo};
use crate::naming::{
    SanitizeOptions, recover_extension, resolve_unique_path, sanitize, sanitize_component,
};

pub use error::ExportError;

/// Counters accumulated over one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Albums processed to completion.
    pub albums: usize,
    /// Photos written to disk.
    pub downloaded: u64,
    /// Photos skipped (in-progress `.part` uploads).
    pub skipped: u64,
    /// Photos that failed to download.
    pub failed: u64,
}

/// Top-level driver mirroring one group's albums onto disk.
#[derive(Debug, Clone)]
pub struct Exporter {
    client: ApiClient,
    output_root: PathBuf,
    options: SanitizeOptions,
    fix_missing_extensions: bool,
}

enum PhotoOutcome {
    Downloaded,
    Skipped,
}

impl Exporter {
    /// Creates an exporter writing under `output_root`, with default
    /// sanitize options and extension recovery enabled.
    #[must_use]
    pub fn new(client: ApiClient, output_root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_root: output_root.into(),
            options: SanitizeOptions::default(),
            fix_missing_extensions: true,
        }
    }

    /// Overrides the sanitize options.
    #[must_use]
    pub fn with_sanitize_options(mut self, options: SanitizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Enables or disables post-hoc extension recovery for extensionless
    /// downloads.
    #[must_use]
    pub fn with_extension_recovery(mut self, enabled: bool) -> Self {
        self.fix_missing_extensions = enabled;
        self
    }

    /// Exports every album of `group` to
    /// `<output_root>/<group-name>/<album-title>/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the group directory cannot be created or the
    /// album listing fails; album- and photo-level failures are logged and
    /// skipped instead.
    #[instrument(skip(self, group), fields(group = %group.group_name))]
    pub async fn export_group(&self, group: &Group) -> Result<ExportStats, ExportError> {
        let group_dir = self
            .output_root
            .join(directory_name(&group.group_name, "group", group.group_id));
        tokio::fs::create_dir_all(&group_dir)
            .await
            .map_err(|e| ExportError::create_dir(&group_dir, e))?;

        let albums = self
            .client
            .get_albums(group.group_id)
            .await
            .map_err(|e| ExportError::listing(format!("albums of group {}", group.group_id), e))?;

        info!(albums = albums.len(), "album listing complete");

        let mut stats = ExportStats::default();
        for album in &albums {
            if let Err(album_error) = self.export_album(group, album, &group_dir, &mut stats).await
            {
                error!(
                    album = %album.title,
                    error = %album_error,
                    "album export failed, continuing with next album"
                );
            }
        }
        Ok(stats)
    }

    /// Processes one album to completion before returning.
    async fn export_album(
        &self,
        group: &Group,
        album: &Album,
        group_dir: &Path,
        stats: &mut ExportStats,
    ) -> Result<(), ExportError> {
        info!(album = %album.title, "downloading photos for album");

        let album_dir = group_dir.join(directory_name(&album.title, "album", album.id));
        tokio::fs::create_dir_all(&album_dir)
            .await
            .map_err(|e| ExportError::create_dir(&album_dir, e))?;

        let photos = self
            .client
            .get_photos(group.group_id, album.id)
            .await
            .map_err(|e| ExportError::listing(format!("photos of album {}", album.id), e))?;

        for photo in &photos {
            match self.export_photo(photo, &album_dir).await {
                Ok(PhotoOutcome::Downloaded) => stats.downloaded += 1,
                Ok(PhotoOutcome::Skipped) => stats.skipped += 1,
                Err(photo_error) => {
                    stats.failed += 1;
                    error!(
                        photo = %photo.name,
                        id = photo.id,
                        error = %photo_error,
                        "photo download failed, continuing"
                    );
                }
            }
        }

        stats.albums += 1;
        Ok(())
    }

    /// Sanitize → resolve → fetch → maybe recover extension, for one photo.
    async fn export_photo(
        &self,
        photo: &Photo,
        album_dir: &Path,
    ) -> Result<PhotoOutcome, ExportError> {
        info!(name = %photo.name, id = photo.id, "photo");

        // An in-progress remote upload marker. Never download it.
        if raw_extension(&photo.name).eq_ignore_ascii_case(".part") {
            info!(name = %photo.name, "skipping partial file");
            return Ok(PhotoOutcome::Skipped);
        }

        let mut sanitized = sanitize(&photo.name, &self.options);
        if !sanitized.recognized {
            warn!(
                filename = %sanitized.file_name(),
                extension = %sanitized.extension,
                "unknown extension, flagging for manual inspection"
            );
        }
        if sanitized.base.is_empty() {
            sanitized.base = format!("photo-{}", photo.id);
        }

        let candidate = album_dir.join(sanitized.file_name());
        let target = resolve_unique_path(&candidate)?;

        self.client
            .download_to_path(&photo.download_url, &target)
            .await
            .map_err(|e| ExportError::download(&photo.name, e))?;

        if !sanitized.has_extension() && self.fix_missing_extensions {
            match recover_extension(&target, &self.options).await {
                Ok(recovered) if !recovered.recognized => {
                    warn!(
                        path = %recovered.path.display(),
                        extension = %recovered.extension,
                        "recovered extension outside known image set, flagging for manual inspection"
                    );
                }
                Ok(_) => {}
                // The download itself succeeded; keep the extensionless file.
                Err(recovery_error) => {
                    warn!(
                        path = %target.display(),
                        error = %recovery_error,
                        "extension recovery failed, keeping file as downloaded"
                    );
                }
            }
        }

        Ok(PhotoOutcome::Downloaded)
    }
}

/// Selects a group from the subscription list.
///
/// A numeric selector matches by group id; any other non-empty selector
/// matches by exact group name.
#[must_use]
pub fn select_group(subscriptions: &[Group], selector: &str) -> Option<Group> {
    if let Ok(id) = selector.parse::<u64>() {
        subscriptions.iter().find(|g| g.group_id == id).cloned()
    } else {
        subscriptions.iter().find(|g| g.group_name == selector).cloned()
    }
}

/// Returns the apparent extension of a raw remote name, dot included.
fn raw_extension(name: &str) -> &str {
    name.rfind('.').map_or("", |dot| &name[dot..])
}

/// Cleans a remote name into a directory component, falling back to a
/// kind-plus-id name when nothing survives sanitization.
fn directory_name(raw: &str, kind: &str, id: u64) -> String {
    let cleaned = sanitize_component(raw);
    if cleaned.is_empty() {
        format!("{kind}-{id}")
    } else {
        cleaned
    }
}
