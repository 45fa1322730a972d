//! Authenticated HTTP client for the groups.io API.
//!
//! Handles the login handshake (session cookies retained in the client's
//! cookie store), listing GETs, and streaming photo downloads to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Config;

use super::error::ApiError;
use super::types::Group;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large photos).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Authenticated groups.io API client.
///
/// Created via [`ApiClient::login`]; the session cookies issued by the login
/// endpoint are kept in the underlying client's cookie store and attached to
/// every later request. Designed to be created once and reused, taking
/// advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    subscriptions: Vec<Group>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    #[serde(default)]
    subscriptions: Vec<Group>,
}

impl ApiClient {
    /// Performs the login handshake and returns an authenticated client.
    ///
    /// The login response body carries the account's subscription list,
    /// which is parsed and retained for group selection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthFailed`] when the login endpoint responds
    /// with a non-200 status, [`ApiError::InvalidUrl`] when the configured
    /// base URL is malformed, and network/decode errors otherwise.
    #[instrument(skip(config), fields(username = %config.username))]
    pub async fn login(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| ApiError::invalid_url(config.base_url.clone()))?;
        let login_url = base_url
            .join("v1/login")
            .map_err(|_| ApiError::invalid_url(config.base_url.clone()))?;

        let client = build_client().map_err(|e| ApiError::network(login_url.as_str(), e))?;

        let response = client
            .post(login_url.clone())
            .query(&[
                ("email", config.username.as_str()),
                ("password", config.password()),
                ("api_key", "nonce"),
            ])
            .send()
            .await
            .map_err(|e| map_send_error(login_url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::auth_failed(status.as_u16(), body));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::decode("v1/login", e))?;

        info!(
            subscriptions = login.user.subscriptions.len(),
            "login succeeded"
        );

        Ok(Self {
            client,
            base_url,
            subscriptions: login.user.subscriptions,
        })
    }

    /// Returns the subscriptions reported by the login response.
    #[must_use]
    pub fn subscriptions(&self) -> &[Group] {
        &self.subscriptions
    }

    /// Issues one listing GET with the fixed parameters plus an optional
    /// continuation token.
    ///
    /// Status handling is left to the caller: the pagination loop treats
    /// non-200 first pages as empty listings rather than errors.
    pub(super) async fn listing_request(
        &self,
        route: &str,
        fixed_params: &[(&str, String)],
        page_token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self
            .base_url
            .join(route)
            .map_err(|_| ApiError::invalid_url(format!("{}{route}", self.base_url)))?;

        let mut request = self.client.get(url.clone()).query(fixed_params);
        if let Some(token) = page_token {
            request = request.query(&[("page_token", token)]);
        }

        request
            .send()
            .await
            .map_err(|e| map_send_error(url.as_str(), e))
    }

    /// Streams the photo at `url` to `path`, returning bytes written.
    ///
    /// The destination path must already be collision-resolved; this method
    /// creates (or truncates) the file and never probes for alternatives.
    /// A failure mid-stream removes the partial file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the URL is invalid, the request fails, the
    /// server responds with a non-success status, or writing to disk fails.
    #[instrument(skip(self), fields(url = %url, path = %path.display()))]
    pub async fn download_to_path(&self, url: &str, path: &Path) -> Result<u64, ApiError> {
        let parsed = Url::parse(url).map_err(|_| ApiError::invalid_url(url.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| map_send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http_status(url, status.as_u16()));
        }

        let mut file = File::create(path)
            .await
            .map_err(|e| ApiError::io(path.to_path_buf(), e))?;

        let stream_result = stream_to_file(&mut file, response, url, path).await;

        if stream_result.is_err() {
            // Don't leave incomplete data behind.
            debug!(path = %path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(path).await;
        }

        let bytes_written = stream_result?;
        debug!(bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }
}

/// Streams the response body to the file, returning bytes written.
///
/// Extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, ApiError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| ApiError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| ApiError::io(path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| ApiError::io(PathBuf::from(path), e))?;

    Ok(bytes_written)
}

fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .gzip(true)
        .cookie_store(true)
        .build()
}

fn map_send_error(url: &str, error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout(url)
    } else {
        ApiError::network(url, error)
    }
}
