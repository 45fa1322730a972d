//! Exhaustive cursor-based pagination over the listing endpoints.
//!
//! Produces the complete sequence of result items for a route by following
//! `next_page_token` until the server reports `has_more: false`. Items are
//! emitted in server order; the listing is finite and non-restartable.

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{Album, Page, Photo};

impl ApiClient {
    /// Lists all albums of a group.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ProtocolViolation`] when pagination claims more
    /// data exists but a page carries no item array, and network/decode
    /// errors otherwise. A non-200 first page yields an empty listing.
    #[instrument(skip(self))]
    pub async fn get_albums(&self, group_id: u64) -> Result<Vec<Album>, ApiError> {
        self.list_all("v1/getalbums", &[("group_id", group_id.to_string())])
            .await
    }

    /// Lists all photos of an album.
    ///
    /// # Errors
    ///
    /// Same error behavior as [`get_albums`](Self::get_albums).
    #[instrument(skip(self))]
    pub async fn get_photos(&self, group_id: u64, album_id: u64) -> Result<Vec<Photo>, ApiError> {
        self.list_all(
            "v1/getphotos",
            &[
                ("group_id", group_id.to_string()),
                ("album_id", album_id.to_string()),
            ],
        )
        .await
    }

    /// Follows the continuation cursor until the listing is exhausted.
    ///
    /// Exactly one request is issued per page. A non-200 response on the
    /// first page degrades to an empty listing (logged at warn, nothing has
    /// been accumulated yet); a non-200 or missing item array once pagination is
    /// underway is a hard [`ApiError::ProtocolViolation`] — the listing must
    /// fail loudly rather than silently truncate.
    async fn list_all<T: DeserializeOwned>(
        &self,
        route: &str,
        fixed_params: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let mut items: Vec<T> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages: usize = 0;

        loop {
            let response = self
                .listing_request(route, fixed_params, page_token.as_deref())
                .await?;

            let status = response.status();
            if !status.is_success() {
                if pages == 0 {
                    warn!(
                        route,
                        status = status.as_u16(),
                        "listing request failed; treating as empty listing"
                    );
                    return Ok(Vec::new());
                }
                // Mid-pagination failure would drop the remaining pages.
                return Err(ApiError::protocol_violation(route));
            }

            let page: Page<T> = response
                .json()
                .await
                .map_err(|e| ApiError::decode(route, e))?;

            // Read the cursor fields before taking the data out of the page.
            let has_more = page.has_more;
            let next_token = page.next_token();

            let Some(mut batch) = page.data else {
                if has_more || pages > 0 {
                    return Err(ApiError::protocol_violation(route));
                }
                // Lone page with neither items nor pagination: nothing to list.
                return Ok(items);
            };

            debug!(route, page = pages + 1, items = batch.len(), "page received");
            items.append(&mut batch);
            pages += 1;

            if !has_more {
                return Ok(items);
            }

            // has_more without a token means the cursor cannot advance.
            let Some(token) = next_token else {
                return Err(ApiError::protocol_violation(route));
            };
            page_token = Some(token);
        }
    }
}
