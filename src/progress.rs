use std::sync::Arc;

/// Why a page was (re)generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    /// Generated ahead of time from the enumerated paths
    Prerender,
    /// Generated on first request for an identifier outside the prerendered set
    Fallback,
    /// Regenerated because the cached page went stale
    Revalidate,
}

/// Events emitted during page generation for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The episode listing is being fetched
    FetchingListing { url: String },

    /// The listing returned and paths were enumerated
    PathsEnumerated { count: usize },

    /// An episode record is being fetched
    FetchingEpisode { slug: String },

    /// A record was normalized into its view model
    EpisodeNormalized { slug: String, title: String },

    /// A page was generated and stored
    PageGenerated { slug: String, origin: PageOrigin },

    /// A cached page was served without regeneration
    PageServed { slug: String },

    /// A page file was written to the build output
    PageWritten { slug: String, path: String },
}

/// Trait for reporting progress events during page generation.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
