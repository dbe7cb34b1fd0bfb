//! TVmaze Viewer Core Library
//!
//! This crate provides the data layer of a viewer for the public TVmaze
//! show metadata API (<https://api.tvmaze.com>).
//!
//! # Features
//! - Search for shows by title
//! - Load a show's detail, episodes and cast concurrently
//! - Group episodes by season and filter them by name
//! - Cache viewed shows in memory or in a JSON file
//! - Rate-limited HTTP client to stay within the API's limits

pub mod api;
pub mod cache;
pub mod client;
pub mod controller;
pub mod error;
pub mod markup;
pub mod season;
pub mod types;
pub mod view;

// Re-export main types for convenience
pub use api::TvMazeApi;
pub use cache::{JsonFileCache, MemoryCache, ShowCache};
pub use client::{ClientConfig, RateLimiter, TvMazeClient};
pub use controller::{DetailController, DetailState, SearchController, SearchState};
pub use error::{Result, TvMazeError};
pub use season::{filter_seasons, group_by_season};
pub use types::{CastEntry, Episode, SeasonGroup, Show, ShowBundle, ShowSummary};
pub use view::{SummaryView, Tab, ViewState};
