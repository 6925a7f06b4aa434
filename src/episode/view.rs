use serde::{Deserialize, Serialize};

use crate::api::RawEpisode;
use crate::error::NormalizeError;

use super::format::{format_duration, format_published_date, parse_published_at};

/// Display-ready snapshot of an episode, derived from a [`RawEpisode`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub members: String,
    /// Length in whole seconds
    pub duration: u64,
    /// Length as `HH:MM:SS`
    pub duration_as_string: String,
    /// Short localized publish date
    pub published_at: String,
    /// Audio file URL
    pub url: String,
}

/// Map a raw API record into its view model.
///
/// Pure: the same record always yields the same episode.
pub fn normalize(raw: &RawEpisode) -> Result<Episode, NormalizeError> {
    let duration = raw
        .file
        .duration
        .as_u64()
        .ok_or_else(|| NormalizeError::InvalidDuration {
            id: raw.id.clone(),
            value: raw.file.duration.to_string(),
        })?;

    let published =
        parse_published_at(&raw.published_at).ok_or_else(|| NormalizeError::InvalidDate {
            id: raw.id.clone(),
            value: raw.published_at.clone(),
        })?;

    Ok(Episode {
        id: raw.id.clone(),
        title: raw.title.clone(),
        thumbnail: raw.thumbnail.clone(),
        description: raw.description.clone(),
        members: raw.members.clone(),
        duration,
        duration_as_string: format_duration(duration),
        published_at: format_published_date(published.date()),
        url: raw.file.url.clone(),
    })
}
