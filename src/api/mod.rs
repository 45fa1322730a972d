//! Authenticated groups.io API client.
//!
//! This module provides the session handshake, JSON listing requests with
//! exhaustive cursor-based pagination, and streaming photo downloads.
//!
//! # Listing contract
//!
//! Listing endpoints return a JSON object with `data` (array of items),
//! `has_more` (boolean), and `next_page_token` (present when `has_more` is
//! true). Pagination follows the token until `has_more` is false; item order
//! is authoritative and never re-sorted.

mod client;
mod error;
mod pager;
mod types;

pub use client::{ApiClient, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::ApiError;
pub use types::{Album, Group, Page, Photo};

// Note: no module-local Result aliases. Use `Result<T, ApiError>` explicitly
// in function signatures.
