//! Controllers owning the viewer's show state
//!
//! - `search`: runs show searches and holds the result list
//! - `detail`: loads a selected show's detail, episodes and cast
//!
//! Each controller publishes its state through a `tokio::sync::watch`
//! channel. Readers get snapshots; only the controller mutates.

pub mod detail;
pub mod search;

pub use detail::{DetailController, DetailState};
pub use search::{SearchController, SearchState};
