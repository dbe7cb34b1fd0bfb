//! Data types for the TVmaze client
//!
//! This module contains all the core data structures used throughout the library.
//! All types implement Serialize and Deserialize so they can be cached on disk
//! and handed to the Tauri frontend unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image URLs attached to shows, episodes and characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Medium-sized image URL
    pub medium: Option<String>,
    /// Original-resolution image URL
    pub original: Option<String>,
}

/// Minimal show record used for listing search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowSummary {
    /// Unique TVmaze identifier
    pub id: u32,
    /// Display name of the show
    pub name: String,
    pub image: Option<Image>,
    /// Premiere date (YYYY-MM-DD)
    pub premiered: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub language: Option<String>,
}

/// One entry of a `/search/shows` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Relevance score assigned by TVmaze
    #[serde(default)]
    pub score: f64,
    pub show: ShowSummary,
}

/// Country a network broadcasts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    /// ISO 3166-1 alpha-2 code, used for flag rendering
    pub code: String,
}

/// Broadcasting network of a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: u32,
    pub name: String,
    pub country: Option<Country>,
}

/// Full show record from `/shows/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    /// Unique TVmaze identifier
    pub id: u32,
    /// Display name of the show
    pub name: String,
    /// HTML summary as delivered by TVmaze (untrusted markup)
    pub summary: Option<String>,
    pub image: Option<Image>,
    /// Premiere date (YYYY-MM-DD)
    pub premiered: Option<String>,
    pub network: Option<Network>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Running status, e.g. "Ended" or "Running"
    pub status: Option<String>,
    /// Episode runtime in minutes
    pub runtime: Option<u32>,
    pub official_site: Option<String>,
    /// External site identifiers keyed by site name, in upstream order.
    /// Values are numbers or strings; unknown ids are `null`.
    #[serde(default)]
    pub externals: Map<String, Value>,
    /// Show type, e.g. "Scripted" or "Animation"
    #[serde(rename = "type")]
    pub show_type: Option<String>,
    pub language: Option<String>,
}

impl Show {
    /// External identifiers that are actually set, in the order TVmaze
    /// lists them.
    pub fn external_ids(&self) -> Vec<(String, String)> {
        self.externals
            .iter()
            .filter_map(|(site, id)| match id {
                Value::Null => None,
                Value::String(text) => Some((site.clone(), text.clone())),
                other => Some((site.clone(), other.to_string())),
            })
            .collect()
    }
}

/// Episode information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique TVmaze identifier for this episode
    pub id: u32,
    /// Season number (1-based)
    pub season: u32,
    /// Episode number within the season, absent for specials
    pub number: Option<u32>,
    /// Display name of the episode
    pub name: String,
    pub image: Option<Image>,
    /// HTML summary as delivered by TVmaze (untrusted markup)
    pub summary: Option<String>,
}

/// A real person appearing in a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub name: String,
}

/// A character portrayed in a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub image: Option<Image>,
}

/// Pairing of a person and the character they play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastEntry {
    pub person: Person,
    pub character: Character,
}

/// Show detail, episodes and cast fetched together for one show.
///
/// This is also the unit stored in the local cache; it is always written
/// and replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowBundle {
    pub show: Show,
    pub episodes: Vec<Episode>,
    pub cast: Vec<CastEntry>,
}

/// Episodes of one season, in the order they were fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonGroup {
    /// Season number shared by all episodes of the group
    pub season: u32,
    pub episodes: Vec<Episode>,
}
