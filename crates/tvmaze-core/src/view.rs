//! View state derived from controller state
//!
//! Nothing here fetches or mutates show data. The tab selection and the
//! episode filter are the only state owned by the view; everything else is
//! computed from the snapshots the controllers publish.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::markup::optional_summary_text;
use crate::season::filter_seasons;
use crate::types::{CastEntry, Episode, Image, SeasonGroup, Show};

/// Sub-view shown below the show detail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Episodes,
    Cast,
}

/// Tab selection and episode filter.
///
/// Both survive show selections; they only reset when a new `ViewState`
/// is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    tab: Tab,
    filter: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected tab
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch to `tab`. Any tab can be selected from any state.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Current episode-name filter
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Season groups that pass the current filter
    pub fn visible_seasons<'a>(&self, seasons: &'a [SeasonGroup]) -> Vec<&'a SeasonGroup> {
        filter_seasons(seasons, &self.filter)
    }

    /// Render the tabbed sub-view for the given show data.
    ///
    /// The tab bar is hidden while there are no seasons to show.
    pub fn render(&self, seasons: &[SeasonGroup], cast: &[CastEntry]) -> SummaryView {
        if seasons.is_empty() {
            return SummaryView::Hidden;
        }

        match self.tab {
            Tab::Episodes => SummaryView::Episodes {
                filter: self.filter.clone(),
                seasons: self
                    .visible_seasons(seasons)
                    .into_iter()
                    .map(|group| SeasonView::new(group, &self.filter))
                    .collect(),
            },
            Tab::Cast => SummaryView::Cast {
                cast: cast.iter().map(CastView::from).collect(),
            },
        }
    }
}

/// Whether the search form may be submitted
pub fn can_submit(query: &str) -> bool {
    !query.is_empty()
}

/// Byte ranges of `text` matching `filter`, ignoring case.
///
/// Matches do not overlap and never split a character. An empty filter
/// highlights nothing.
pub fn highlight_ranges(text: &str, filter: &str) -> Vec<Range<usize>> {
    if filter.is_empty() {
        return Vec::new();
    }

    let needle: Vec<char> = filter.chars().flat_map(char::to_lowercase).collect();
    let mut ranges = Vec::new();
    let mut next_start = 0;

    for (start, _) in text.char_indices() {
        if start < next_start {
            continue;
        }
        if let Some(len) = match_len(&text[start..], &needle) {
            ranges.push(start..start + len);
            next_start = start + len;
        }
    }

    ranges
}

fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;

    for (offset, ch) in haystack.char_indices() {
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }

    None
}

fn medium_image(image: Option<&Image>) -> Option<String> {
    image.and_then(|image| image.medium.clone())
}

/// Show detail pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetailView {
    pub name: String,
    pub image: Option<String>,
    /// Summary as plain text
    pub summary: String,
    pub premiered: Option<String>,
    pub network: Option<String>,
    /// Country code of the network, for flag rendering
    pub country_code: Option<String>,
    pub show_type: Option<String>,
    pub language: Option<String>,
    /// Genres joined with ", "
    pub genres: String,
    pub status: Option<String>,
    pub runtime: Option<u32>,
    pub official_site: Option<String>,
    /// `(site, id)` pairs for the externals list
    pub externals: Vec<(String, String)>,
}

impl From<&Show> for ShowDetailView {
    fn from(show: &Show) -> Self {
        Self {
            name: show.name.clone(),
            image: medium_image(show.image.as_ref()),
            summary: optional_summary_text(show.summary.as_deref()),
            premiered: show.premiered.clone(),
            network: show.network.as_ref().map(|n| n.name.clone()),
            country_code: show
                .network
                .as_ref()
                .and_then(|n| n.country.as_ref())
                .map(|c| c.code.clone()),
            show_type: show.show_type.clone(),
            language: show.language.clone(),
            genres: show.genres.join(", "),
            status: show.status.clone(),
            runtime: show.runtime,
            official_site: show.official_site.clone(),
            externals: show.external_ids(),
        }
    }
}

/// Tabbed area below the show detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum SummaryView {
    /// No episodes loaded; neither tabs nor content are shown
    Hidden,
    Episodes {
        filter: String,
        seasons: Vec<SeasonView>,
    },
    Cast {
        cast: Vec<CastView>,
    },
}

/// One collapsible season in the episodes tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonView {
    pub season: u32,
    /// Seasons start expanded while a filter is active
    pub open: bool,
    pub episodes: Vec<EpisodeView>,
}

impl SeasonView {
    fn new(group: &SeasonGroup, filter: &str) -> Self {
        Self {
            season: group.season,
            open: !filter.is_empty(),
            episodes: group
                .episodes
                .iter()
                .map(|episode| EpisodeView::new(episode, filter))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeView {
    pub id: u32,
    pub name: String,
    /// Byte ranges of `name` to highlight
    pub highlights: Vec<Range<usize>>,
    pub image: Option<String>,
    pub summary: String,
}

impl EpisodeView {
    fn new(episode: &Episode, filter: &str) -> Self {
        Self {
            id: episode.id,
            name: episode.name.clone(),
            highlights: highlight_ranges(&episode.name, filter),
            image: medium_image(episode.image.as_ref()),
            summary: optional_summary_text(episode.summary.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastView {
    pub person: String,
    pub character: String,
    pub image: Option<String>,
}

impl From<&CastEntry> for CastView {
    fn from(entry: &CastEntry) -> Self {
        Self {
            person: entry.person.name.clone(),
            character: entry.character.name.clone(),
            image: medium_image(entry.character.image.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::group_by_season;
    use crate::types::{Character, Person};

    fn episode(id: u32, season: u32, name: &str) -> Episode {
        Episode {
            id,
            season,
            number: Some(id),
            name: name.to_string(),
            image: None,
            summary: Some("<p>About <b>it</b></p>".to_string()),
        }
    }

    fn cast_entry(person: &str, character: &str) -> CastEntry {
        CastEntry {
            person: Person {
                id: 1,
                name: person.to_string(),
            },
            character: Character {
                id: 2,
                name: character.to_string(),
                image: Some(Image {
                    medium: Some("c.jpg".to_string()),
                    original: None,
                }),
            },
        }
    }

    #[test]
    fn test_tab_initial_state_is_episodes() {
        assert_eq!(ViewState::new().tab(), Tab::Episodes);
    }

    #[test]
    fn test_tab_transitions_without_data() {
        let mut view = ViewState::new();

        view.select_tab(Tab::Cast);
        assert_eq!(view.tab(), Tab::Cast);

        view.select_tab(Tab::Episodes);
        assert_eq!(view.tab(), Tab::Episodes);
    }

    #[test]
    fn test_render_follows_tab() {
        let seasons = group_by_season(&[episode(1, 1, "Pilot")]);
        let cast = vec![cast_entry("Bryan Cranston", "Walter White")];
        let mut view = ViewState::new();

        assert!(matches!(view.render(&seasons, &cast), SummaryView::Episodes { .. }));

        view.select_tab(Tab::Cast);
        match view.render(&seasons, &cast) {
            SummaryView::Cast { cast } => {
                assert_eq!(cast[0].person, "Bryan Cranston");
                assert_eq!(cast[0].character, "Walter White");
                assert_eq!(cast[0].image.as_deref(), Some("c.jpg"));
            }
            other => panic!("Expected cast view, got {:?}", other),
        }

        view.select_tab(Tab::Episodes);
        assert!(matches!(view.render(&seasons, &cast), SummaryView::Episodes { .. }));
    }

    #[test]
    fn test_render_hidden_without_seasons() {
        let mut view = ViewState::new();
        view.select_tab(Tab::Cast);
        assert_eq!(view.render(&[], &[]), SummaryView::Hidden);
    }

    #[test]
    fn test_render_episodes_filtered_and_highlighted() {
        let seasons = group_by_season(&[
            episode(1, 1, "Pilot"),
            episode(2, 1, "Cat's in the Bag"),
            episode(3, 2, "Seven Thirty-Seven"),
        ]);
        let mut view = ViewState::new();
        view.set_filter("cat");

        match view.render(&seasons, &[]) {
            SummaryView::Episodes { filter, seasons } => {
                assert_eq!(filter, "cat");
                assert_eq!(seasons.len(), 1);
                assert!(seasons[0].open);
                assert_eq!(seasons[0].episodes.len(), 2);
                assert!(seasons[0].episodes[0].highlights.is_empty());
                assert_eq!(seasons[0].episodes[1].highlights, vec![0..3]);
                assert_eq!(seasons[0].episodes[1].summary, "About it");
            }
            other => panic!("Expected episodes view, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_persists_across_tab_switches() {
        let mut view = ViewState::new();
        view.set_filter("fire");
        view.select_tab(Tab::Cast);
        view.select_tab(Tab::Episodes);
        assert_eq!(view.filter(), "fire");
    }

    #[test]
    fn test_can_submit() {
        assert!(!can_submit(""));
        assert!(can_submit("batman"));
    }

    #[test]
    fn test_highlight_ranges_case_insensitive() {
        assert_eq!(highlight_ranges("The Fire and fire", "FIRE"), vec![4..8, 13..17]);
    }

    #[test]
    fn test_highlight_ranges_non_overlapping() {
        assert_eq!(highlight_ranges("aaaa", "aa"), vec![0..2, 2..4]);
    }

    #[test]
    fn test_highlight_ranges_unicode() {
        let text = "Ärger im Öl";
        let ranges = highlight_ranges(text, "öl");
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "Öl");
    }

    #[test]
    fn test_highlight_ranges_empty_filter() {
        assert!(highlight_ranges("Pilot", "").is_empty());
        assert!(highlight_ranges("", "x").is_empty());
    }

    #[test]
    fn test_show_detail_view() {
        let show: Show = serde_json::from_str(
            r#"{
                "id": 169, "name": "Breaking Bad", "type": "Scripted", "language": "English",
                "genres": ["Drama", "Crime", "Thriller"], "status": "Ended", "runtime": 60,
                "premiered": "2008-01-20", "officialSite": "http://www.amc.com/shows/breaking-bad",
                "network": {"id": 20, "name": "AMC", "country": {"name": "United States", "code": "US"}},
                "externals": {"tvrage": 18164, "thetvdb": 81189, "imdb": null},
                "image": {"medium": "m.jpg", "original": "o.jpg"},
                "summary": "<p><b>Breaking Bad</b> follows Walter White.</p>"
            }"#,
        )
        .unwrap();

        let view = ShowDetailView::from(&show);

        assert_eq!(view.genres, "Drama, Crime, Thriller");
        assert_eq!(view.network.as_deref(), Some("AMC"));
        assert_eq!(view.country_code.as_deref(), Some("US"));
        assert_eq!(view.image.as_deref(), Some("m.jpg"));
        assert_eq!(view.summary, "Breaking Bad follows Walter White.");
        assert_eq!(view.externals.len(), 2);
    }
}
