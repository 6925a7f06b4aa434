mod fetch;
mod raw;

pub use fetch::{EpisodeApi, ListingQuery, SortOrder, fetch_json};
pub use raw::{EpisodeSummary, RawEpisode, RawEpisodeFile, RawScalar};
