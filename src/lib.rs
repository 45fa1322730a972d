//! groups.io Photo Album Exporter
//!
//! This library bulk-exports the photo albums of a groups.io subscription
//! onto local disk, producing a `<group>/<album>/<photo>` mirror of the
//! remote hierarchy with collision-safe, extension-correct filenames.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`api`] - Authenticated groups.io client and cursor-based pagination
//! - [`naming`] - Filename sanitization, collision resolution, content sniffing
//! - [`export`] - The download orchestrator driving one export run
//! - [`config`] - Environment configuration (credentials, API base URL)

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod export;
pub mod naming;

// Re-export commonly used types
pub use api::{Album, ApiClient, ApiError, Group, Page, Photo};
pub use config::{Config, ConfigError};
pub use export::{ExportError, ExportStats, Exporter, select_group};
pub use naming::{SanitizeOptions, SanitizedName, resolve_unique_path, sanitize};
