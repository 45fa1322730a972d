//! Post-hoc extension recovery via content sniffing.
//!
//! When a remote name carries no usable extension the photo is written to
//! disk extensionless; this module determines the file's type from its
//! leading bytes and renames it to carry the correct extension.

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;
use tracing::{debug, instrument};

use crate::export::ExportError;

use super::sanitize::{SanitizeOptions, normalize_extension};

/// Extensions (without dot) accepted from a sniffed content type.
const RECOVERABLE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Number of leading bytes needed to identify the supported formats.
const SNIFF_LEN: usize = 16;

/// Outcome of a successful extension recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredExtension {
    /// The renamed path, now carrying the recovered extension.
    pub path: PathBuf,
    /// The normalized extension that was appended (including the dot).
    pub extension: String,
    /// False when the sniffed type falls outside the known image set —
    /// a signal for manual inspection; the rename still happened.
    pub recognized: bool,
}

/// Identifies an image content type from leading file bytes.
///
/// Returns the MIME type for the formats this exporter knows how to
/// recover, or `None` when the magic number is not recognized.
#[must_use]
pub fn sniff_content_type(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
        [b'B', b'M', ..] => Some("image/bmp"),
        _ => None,
    }
}

/// Parses the subtype out of a MIME string (after `/`, before any `;`).
fn mime_subtype(content_type: &str) -> Option<&str> {
    let subtype = content_type.split('/').nth(1)?;
    let subtype = subtype.split(';').next().unwrap_or(subtype).trim();
    (!subtype.is_empty()).then_some(subtype)
}

/// Sniffs the content type of the file at `path` and renames it to carry
/// the matching extension, normalized through the same rules as the
/// sanitizer.
///
/// On sniff failure the extensionless file is kept on disk untouched.
///
/// # Errors
///
/// Returns [`ExportError::ContentSniff`] when the file cannot be read or
/// its magic number is unknown, and [`ExportError::Rename`] when the
/// on-disk rename fails.
#[instrument(skip(options), fields(path = %path.display()))]
pub async fn recover_extension(
    path: &Path,
    options: &SanitizeOptions,
) -> Result<RecoveredExtension, ExportError> {
    let mut header = [0u8; SNIFF_LEN];
    let read = read_header(path, &mut header)
        .await
        .map_err(|e| ExportError::content_sniff(path, format!("cannot read file: {e}")))?;

    let content_type = sniff_content_type(&header[..read])
        .ok_or_else(|| ExportError::content_sniff(path, "unrecognized magic number"))?;

    let subtype = mime_subtype(content_type).ok_or_else(|| {
        ExportError::content_sniff(path, format!("unparseable content type {content_type:?}"))
    })?;

    let extension = normalize_extension(&format!(".{subtype}"), options);
    debug!(content_type, extension = %extension, "extension recovered from content");

    let recognized = RECOVERABLE_EXTENSIONS
        .iter()
        .any(|known| extension[1..].eq_ignore_ascii_case(known));

    let mut renamed = path.as_os_str().to_os_string();
    renamed.push(&extension);
    let renamed = PathBuf::from(renamed);

    tokio::fs::rename(path, &renamed)
        .await
        .map_err(|e| ExportError::rename(path, &renamed, e))?;

    Ok(RecoveredExtension {
        path: renamed,
        extension,
        recognized,
    })
}

async fn read_header(path: &Path, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut read = 0;
    while read < buffer.len() {
        let n = file.read(&mut buffer[read..]).await?;
        if n == 0 {
            break;
        }
        read += n;
    }
    Ok(read)
}
