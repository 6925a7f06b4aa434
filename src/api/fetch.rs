// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::http::HttpClient;

use super::raw::{EpisodeSummary, RawEpisode};

/// Sort direction understood by the listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Query parameters for the episode listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub limit: usize,
    pub sort_by: String,
    pub order: SortOrder,
}

impl ListingQuery {
    /// The `limit` most recently published episodes, newest first
    pub fn recent(limit: usize) -> Self {
        Self {
            limit,
            sort_by: "published_at".to_string(),
            order: SortOrder::Desc,
        }
    }
}

/// Client for the episode listing and detail endpoints
#[derive(Clone)]
pub struct EpisodeApi<C> {
    client: C,
    base_url: Url,
}

impl<C: HttpClient> EpisodeApi<C> {
    /// Create an API client rooted at `base_url`
    pub fn new(client: C, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// URL of the listing endpoint for the given query
    pub fn listing_url(&self, query: &ListingQuery) -> Url {
        let mut url = self.endpoint(&["episodes"]);
        url.query_pairs_mut()
            .append_pair("_limit", &query.limit.to_string())
            .append_pair("_sort", &query.sort_by)
            .append_pair("_order", &query.order.to_string());
        url
    }

    /// URL of the detail endpoint for one episode
    pub fn episode_url(&self, id: &str) -> Url {
        self.endpoint(&["episodes", id])
    }

    /// Fetch the episode listing
    pub async fn list_episodes(&self, query: &ListingQuery) -> Result<Vec<EpisodeSummary>, ApiError> {
        fetch_json(&self.client, &self.listing_url(query)).await
    }

    /// Fetch one full episode record
    pub async fn get_episode(&self, id: &str) -> Result<RawEpisode, ApiError> {
        fetch_json(&self.client, &self.episode_url(id)).await
    }
}

/// Fetch raw response bytes from a URL (without decoding)
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &Url) -> Result<Bytes, ApiError> {
    client
        .get_bytes(url.as_str())
        .await
        .map_err(|e| ApiError::RequestFailed {
            url: url.to_string(),
            source: e,
        })
}

/// Fetch a URL and decode its body as JSON
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    url: &Url,
) -> Result<T, ApiError> {
    let bytes = fetch_bytes(client, url).await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::DecodeFailed {
        url: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::MockHttpClient;

    fn api(base: &str) -> EpisodeApi<MockHttpClient> {
        EpisodeApi::new(MockHttpClient::default(), base).unwrap()
    }

    #[test]
    fn listing_url_requests_recent_episodes() {
        let url = api("http://localhost:3333").listing_url(&ListingQuery::recent(2));

        assert_eq!(
            url.as_str(),
            "http://localhost:3333/episodes?_limit=2&_sort=published_at&_order=desc"
        );
    }

    #[test]
    fn endpoints_respect_base_path() {
        let with_slash = api("https://example.com/api/");
        let without_slash = api("https://example.com/api");

        assert_eq!(
            with_slash.episode_url("ep-1").as_str(),
            "https://example.com/api/episodes/ep-1"
        );
        assert_eq!(
            without_slash.episode_url("ep-1").as_str(),
            "https://example.com/api/episodes/ep-1"
        );
    }

    #[test]
    fn episode_url_escapes_identifier() {
        let url = api("http://localhost:3333").episode_url("a/b c");
        assert_eq!(url.as_str(), "http://localhost:3333/episodes/a%2Fb%20c");
    }

    #[test]
    fn new_rejects_invalid_base() {
        let client = MockHttpClient::default();
        assert!(EpisodeApi::new(client.clone(), "not a url").is_err());
        assert!(EpisodeApi::new(client, "mailto:someone@example.com").is_err());
    }

    #[tokio::test]
    async fn get_episode_decodes_record() {
        let client = MockHttpClient::default().with_episode(crate::testing::raw_episode(
            "1",
            "125",
            "2021-05-10T00:00:00Z",
        ));
        let api = EpisodeApi::new(client, "http://api.test").unwrap();

        let raw = api.get_episode("1").await.unwrap();
        assert_eq!(raw.title, "Ep1");
    }

    #[tokio::test]
    async fn get_episode_propagates_missing_record() {
        let api = api("http://api.test");

        let err = api.get_episode("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::DecodeFailed { .. }));
    }
}
