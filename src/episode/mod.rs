mod details;
mod format;
mod view;

pub use details::EpisodeDetails;
pub use format::{DATE_LOCALE, format_duration, format_published_date, parse_published_at};
pub use view::{Episode, normalize};
