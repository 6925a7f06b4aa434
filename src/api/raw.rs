// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar the API sometimes sends as a string and sometimes as a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl RawScalar {
    /// Interpret the value as a whole, non-negative number
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            RawScalar::Integer(n) => Some(*n),
            RawScalar::Float(f) => whole_number(*f),
            RawScalar::Text(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
            }
        }
    }
}

fn whole_number(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Integer(n) => write!(f, "{n}"),
            RawScalar::Float(n) => write!(f, "{n}"),
            RawScalar::Text(s) => f.write_str(s),
        }
    }
}

/// Identifiers come back as strings from most backends, numbers from some
fn id_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(RawScalar::deserialize(deserializer)?.to_string())
}

/// An entry of the episode listing. Only the identifier is needed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeSummary {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
}

/// A full episode record as served by the detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisode {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    pub title: String,
    pub members: String,
    pub published_at: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub file: RawEpisodeFile,
}

/// The audio file attached to a raw episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisodeFile {
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub duration: RawScalar,
}
