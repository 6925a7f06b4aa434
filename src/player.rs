use crate::episode::Episode;

/// Something that can start playback of an episode.
///
/// Views receive a player explicitly rather than looking one up.
pub trait Player {
    fn play(&mut self, episode: &Episode);
}

/// A simple playback queue holding the episodes lined up for playback
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackQueue {
    episodes: Vec<Episode>,
    current_index: usize,
    is_playing: bool,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The episode under the play head, if any
    pub fn current(&self) -> Option<&Episode> {
        self.episodes.get(self.current_index)
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }
}

impl Player for PlaybackQueue {
    fn play(&mut self, episode: &Episode) {
        self.episodes = vec![episode.clone()];
        self.current_index = 0;
        self.is_playing = true;
    }
}
