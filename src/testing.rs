//! Shared fixtures for unit tests

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::api::{RawEpisode, RawEpisodeFile, RawScalar};
use crate::http::HttpClient;

/// Build a raw record shaped like the API's
pub fn raw_episode(id: &str, duration: &str, published_at: &str) -> RawEpisode {
    RawEpisode {
        id: id.to_string(),
        title: format!("Ep{id}"),
        members: "A, B".to_string(),
        published_at: published_at.to_string(),
        thumbnail: format!("http://x/{id}.jpg"),
        description: "<p>Show notes</p>".to_string(),
        file: RawEpisodeFile {
            url: "http://x/a.mp3".to_string(),
            mime_type: None,
            duration: RawScalar::Text(duration.to_string()),
        },
    }
}

#[derive(Default)]
struct MockState {
    episodes: BTreeMap<String, RawEpisode>,
    bodies: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    requests: Vec<String>,
}

/// In-memory stand-in for a json-server style episode API.
///
/// Unknown detail URLs answer with `{}`, which fails to decode. Canned
/// bodies registered for an exact URL take precedence over everything else.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn with_episode(self, episode: RawEpisode) -> Self {
        self.set_episode(episode);
        self
    }

    /// Insert or replace an episode
    pub fn set_episode(&self, episode: RawEpisode) {
        let mut state = self.state.lock().unwrap();
        state.episodes.insert(episode.id.clone(), episode);
    }

    pub fn remove_episode(&self, id: &str) {
        self.state.lock().unwrap().episodes.remove(id);
    }

    /// Answer requests for exactly `url` with `body`
    pub fn respond_with(&self, url: &str, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.bodies.insert(url.to_string(), body.to_string());
    }

    /// Make detail requests for `id` take `delay` before answering
    pub fn delay_episode(&self, id: &str, delay: Duration) {
        let mut state = self.state.lock().unwrap();
        state.delays.insert(id.to_string(), delay);
    }

    /// Every URL requested so far
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    fn listing(&self, url: &Url) -> String {
        let state = self.state.lock().unwrap();
        let limit = url
            .query_pairs()
            .find(|(k, _)| k == "_limit")
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(usize::MAX);

        let mut episodes: Vec<_> = state.episodes.values().collect();
        episodes.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        let episodes: Vec<_> = episodes.into_iter().take(limit).collect();

        serde_json::to_string(&episodes).unwrap()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get_bytes(&self, url: &str) -> Result<Bytes, reqwest::Error> {
        let parsed = Url::parse(url).unwrap();
        let segments: Vec<_> = parsed.path_segments().unwrap().collect();

        let (canned, delay) = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(url.to_string());
            let delay = match segments.as_slice() {
                [.., "episodes", id] => state.delays.get(*id).copied(),
                _ => None,
            };
            (state.bodies.get(url).cloned(), delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(body) = canned {
            return Ok(Bytes::from(body));
        }

        let body = match segments.as_slice() {
            [.., "episodes"] => self.listing(&parsed),
            [.., "episodes", id] => {
                let state = self.state.lock().unwrap();
                state
                    .episodes
                    .get(*id)
                    .map(|ep| serde_json::to_string(ep).unwrap())
                    .unwrap_or_else(|| "{}".to_string())
            }
            _ => "{}".to_string(),
        };

        Ok(Bytes::from(body))
    }
}
