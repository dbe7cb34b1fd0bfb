//! Season grouping and episode-name filtering
//!
//! TVmaze returns a show's episodes as one flat, chronologically ordered
//! list. The viewer presents them bucketed by season and lets the user
//! narrow the seasons down by episode name.

use crate::types::{Episode, SeasonGroup};

/// Partition episodes into season groups.
///
/// Groups appear in the order their season is first seen in `episodes`,
/// and each group keeps the relative order of its episodes. Season
/// numbers are bucketed, not sorted.
pub fn group_by_season(episodes: &[Episode]) -> Vec<SeasonGroup> {
    let mut groups: Vec<SeasonGroup> = Vec::new();

    for episode in episodes {
        match groups.iter_mut().find(|g| g.season == episode.season) {
            Some(group) => group.episodes.push(episode.clone()),
            None => groups.push(SeasonGroup {
                season: episode.season,
                episodes: vec![episode.clone()],
            }),
        }
    }

    groups
}

impl SeasonGroup {
    /// Whether any episode name contains `filter`, ignoring case.
    ///
    /// An empty filter matches every group.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        self.episodes
            .iter()
            .any(|episode| episode.name.to_lowercase().contains(&needle))
    }
}

/// Season groups to display for an episode-name filter.
///
/// Only group inclusion is filtered: a matching group is returned with all
/// of its episodes.
pub fn filter_seasons<'a>(groups: &'a [SeasonGroup], filter: &str) -> Vec<&'a SeasonGroup> {
    groups.iter().filter(|group| group.matches(filter)).collect()
}
