// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{EpisodeApi, ListingQuery};
use crate::episode::{Episode, normalize};
use crate::error::PageError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};

/// Seconds after which a generated page is considered stale
pub const REVALIDATE_SECS: u64 = 60 * 60 * 24;

/// Number of recent episodes prerendered ahead of time
pub const LISTING_LIMIT: usize = 2;

/// Options for page generation
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// How many of the most recent episodes to prerender
    pub listing_limit: usize,
    /// Age after which a generated page is regenerated
    pub revalidate: Duration,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            listing_limit: LISTING_LIMIT,
            revalidate: Duration::from_secs(REVALIDATE_SECS),
        }
    }
}

/// What happens when a page outside the prerendered set is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// Generate on first request, the caller waits, then cache
    Blocking,
}

/// A single page to prerender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTarget {
    pub slug: String,
}

/// The prerender targets plus the fallback policy for everything else
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPaths {
    pub paths: Vec<PathTarget>,
    pub fallback: Fallback,
}

impl StaticPaths {
    pub fn contains(&self, slug: &str) -> bool {
        self.paths.iter().any(|p| p.slug == slug)
    }
}

/// Everything the details page needs to render one episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticProps {
    pub episode: Episode,
    /// Seconds until the page should be regenerated
    pub revalidate: u64,
}

impl StaticProps {
    pub fn revalidate_after(&self) -> Duration {
        Duration::from_secs(self.revalidate)
    }
}

/// Enumerate the episode pages to prerender.
///
/// Asks the listing endpoint for the most recently published episodes and
/// yields one target per identifier, in listing order. Anything else falls
/// back to blocking generation on first request.
pub async fn enumerate_paths<C: HttpClient>(
    api: &EpisodeApi<C>,
    options: &PageOptions,
    reporter: &SharedProgressReporter,
) -> Result<StaticPaths, PageError> {
    let query = ListingQuery::recent(options.listing_limit);

    reporter.report(ProgressEvent::FetchingListing {
        url: api.listing_url(&query).to_string(),
    });

    let listing = api.list_episodes(&query).await?;

    let paths: Vec<_> = listing
        .into_iter()
        .map(|summary| PathTarget { slug: summary.id })
        .collect();

    reporter.report(ProgressEvent::PathsEnumerated { count: paths.len() });

    Ok(StaticPaths {
        paths,
        fallback: Fallback::Blocking,
    })
}

/// Fetch one episode and turn it into page props
pub async fn load_episode_props<C: HttpClient>(
    api: &EpisodeApi<C>,
    slug: &str,
    options: &PageOptions,
    reporter: &SharedProgressReporter,
) -> Result<StaticProps, PageError> {
    reporter.report(ProgressEvent::FetchingEpisode {
        slug: slug.to_string(),
    });

    let raw = api.get_episode(slug).await?;
    let episode = normalize(&raw)?;

    reporter.report(ProgressEvent::EpisodeNormalized {
        slug: slug.to_string(),
        title: episode.title.clone(),
    });

    Ok(StaticProps {
        episode,
        revalidate: options.revalidate.as_secs(),
    })
}
