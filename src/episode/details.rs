use std::borrow::Cow;

use crate::player::Player;

use super::view::Episode;

/// Read-only details view over an episode
#[derive(Debug, Clone, Copy)]
pub struct EpisodeDetails<'a> {
    episode: &'a Episode,
}

impl<'a> EpisodeDetails<'a> {
    pub fn new(episode: &'a Episode) -> Self {
        Self { episode }
    }

    pub fn episode(&self) -> &'a Episode {
        self.episode
    }

    /// Document title of the page
    pub fn document_title(&self) -> &'a str {
        &self.episode.title
    }

    /// Header lines in display order: members, publish date, duration
    pub fn header(&self) -> [&'a str; 3] {
        [
            self.episode.members.as_str(),
            self.episode.published_at.as_str(),
            self.episode.duration_as_string.as_str(),
        ]
    }

    /// The episode description as markup, unchanged
    pub fn description_html(&self) -> &'a str {
        &self.episode.description
    }

    /// The description with tags removed and entities decoded
    pub fn description_text(&self) -> String {
        let stripped = strip_tags(&self.episode.description);
        let decoded = html_escape::decode_html_entities(&stripped);
        collapse_whitespace(&decoded)
    }

    /// Hand the episode to `player`
    pub fn play<P: Player + ?Sized>(&self, player: &mut P) {
        player.play(self.episode);
    }
}

/// Remove markup tags, turning block-level boundaries into spaces
fn strip_tags(html: &str) -> Cow<'_, str> {
    if !html.contains('<') {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    Cow::Owned(out)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
