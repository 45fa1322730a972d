//! Filename sanitization, collision-safe path resolution, and post-hoc
//! extension recovery for downloaded photos.
//!
//! [`sanitize`] is a pure function mapping a raw remote filename to a safe
//! local one; [`resolve_unique_path`] guarantees the returned path does not
//! exist at the moment of the call; [`recover_extension`] sniffs the content
//! type of a file written under an extensionless name and renames it.

mod collision;
mod sanitize;
mod sniff;

pub use collision::{MAX_COLLISION_PROBES, resolve_unique_path};
pub use sanitize::{
    RECOGNIZED_IMAGE_EXTENSIONS, SanitizeOptions, SanitizedName, sanitize, sanitize_component,
};
pub use sniff::{RecoveredExtension, recover_extension, sniff_content_type};
