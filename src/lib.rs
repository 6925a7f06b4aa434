pub mod api;
pub mod episode;
pub mod error;
pub mod generate;
pub mod http;
pub mod output;
pub mod player;
pub mod progress;
pub mod store;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use api::{EpisodeApi, EpisodeSummary, ListingQuery, RawEpisode, RawEpisodeFile, SortOrder};
pub use episode::{Episode, EpisodeDetails, format_duration, format_published_date, normalize};
pub use error::{ApiError, NormalizeError, OutputError, PageError};
pub use generate::{
    Fallback, PageOptions, PathTarget, StaticPaths, StaticProps, enumerate_paths,
    load_episode_props,
};
pub use http::{HttpClient, ReqwestClient};
pub use output::{BuildResult, build_pages};
pub use player::{PlaybackQueue, Player};
pub use progress::{NoopReporter, PageOrigin, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use store::{Page, PageStore};
