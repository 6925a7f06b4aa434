// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::api::EpisodeApi;
use crate::error::PageError;
use crate::generate::{PageOptions, StaticPaths, StaticProps, enumerate_paths, load_episode_props};
use crate::http::HttpClient;
use crate::progress::{PageOrigin, ProgressEvent, SharedProgressReporter};

/// A generated episode page
#[derive(Debug, Clone)]
pub struct Page {
    pub props: StaticProps,
    pub generated_at: Instant,
    pub origin: PageOrigin,
}

impl Page {
    /// Whether the page has outlived its revalidation window at `now`
    pub fn is_stale(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.generated_at) >= self.props.revalidate_after()
    }
}

/// Cache of generated episode pages.
///
/// Prerendered pages are generated up front; any other identifier is
/// generated the first time it is requested and cached from then on.
/// Pages older than their revalidation window are regenerated on the next
/// request.
///
/// The page map is only locked for lookups and inserts. Generation of a
/// given slug is serialized through a per-slug gate, so concurrent requests
/// for the same missing page wait for a single fetch while cached pages
/// keep being served.
pub struct PageStore<C> {
    api: EpisodeApi<C>,
    options: PageOptions,
    reporter: SharedProgressReporter,
    pages: Mutex<HashMap<String, Page>>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<C: HttpClient> PageStore<C> {
    pub fn new(api: EpisodeApi<C>, options: PageOptions, reporter: SharedProgressReporter) -> Self {
        Self {
            api,
            options,
            reporter,
            pages: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn api(&self) -> &EpisodeApi<C> {
        &self.api
    }

    /// Enumerate the prerender targets and generate each of them.
    ///
    /// The first failure aborts the run.
    pub async fn prerender(&self) -> Result<StaticPaths, PageError> {
        let paths = enumerate_paths(&self.api, &self.options, &self.reporter).await?;

        for target in &paths.paths {
            let gate = self.gate(&target.slug).await;
            let _generating = gate.lock().await;

            self.generate_and_store(&target.slug, PageOrigin::Prerender)
                .await?;
        }

        Ok(paths)
    }

    /// Serve the page for `slug`, generating or regenerating it as needed.
    ///
    /// A failed generation is returned as-is; a previously cached page is
    /// left in place.
    pub async fn get(&self, slug: &str) -> Result<Page, PageError> {
        if let Some(page) = self.fresh(slug).await {
            return Ok(page);
        }

        let gate = self.gate(slug).await;
        let _generating = gate.lock().await;

        // Another request may have generated the page while we waited
        if let Some(page) = self.fresh(slug).await {
            self.release(slug).await;
            return Ok(page);
        }

        let origin = if self.pages.lock().await.contains_key(slug) {
            PageOrigin::Revalidate
        } else {
            PageOrigin::Fallback
        };

        self.generate_and_store(slug, origin).await
    }

    /// Generate `slug` and cache the result. The caller holds the slug's gate.
    async fn generate_and_store(&self, slug: &str, origin: PageOrigin) -> Result<Page, PageError> {
        let result = self.generate(slug, origin).await;

        if let Ok(page) = &result {
            self.pages
                .lock()
                .await
                .insert(slug.to_string(), page.clone());
        }
        self.release(slug).await;

        result
    }

    /// The cached page for `slug` if it is still fresh
    async fn fresh(&self, slug: &str) -> Option<Page> {
        let pages = self.pages.lock().await;
        let page = pages.get(slug).filter(|p| !p.is_stale(Instant::now()))?;

        self.reporter.report(ProgressEvent::PageServed {
            slug: slug.to_string(),
        });
        Some(page.clone())
    }

    /// The generation gate for `slug`, shared by everyone generating it
    async fn gate(&self, slug: &str) -> Arc<Mutex<()>> {
        self.in_flight
            .lock()
            .await
            .entry(slug.to_string())
            .or_default()
            .clone()
    }

    /// Drop the gate once nobody else is queued on it.
    ///
    /// One reference lives in the map and one with the caller.
    async fn release(&self, slug: &str) {
        let mut in_flight = self.in_flight.lock().await;
        if in_flight
            .get(slug)
            .is_some_and(|gate| Arc::strong_count(gate) <= 2)
        {
            in_flight.remove(slug);
        }
    }

    /// Pages currently cached, keyed by slug
    pub async fn cached_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<_> = self.pages.lock().await.keys().cloned().collect();
        slugs.sort();
        slugs
    }

    /// A cached page without triggering generation
    pub async fn peek(&self, slug: &str) -> Option<Page> {
        self.pages.lock().await.get(slug).cloned()
    }

    async fn generate(&self, slug: &str, origin: PageOrigin) -> Result<Page, PageError> {
        let props = load_episode_props(&self.api, slug, &self.options, &self.reporter).await?;

        self.reporter.report(ProgressEvent::PageGenerated {
            slug: slug.to_string(),
            origin,
        });

        Ok(Page {
            props,
            generated_at: Instant::now(),
            origin,
        })
    }
}
