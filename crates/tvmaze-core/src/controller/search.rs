//! Show search controller

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::TvMazeApi;
use crate::error::Result;
use crate::types::ShowSummary;

/// Observable state of the search pane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// A search is in flight
    pub loading: bool,
    /// The last search failed
    pub error: bool,
    /// Results of the last successful search
    pub shows: Vec<ShowSummary>,
}

/// Runs show searches and publishes their results.
///
/// Every search is numbered. When searches overlap, only the newest one is
/// allowed to touch the state; responses to older searches are dropped
/// whenever they arrive.
pub struct SearchController {
    api: Arc<TvMazeApi>,
    state: watch::Sender<SearchState>,
    generation: AtomicU64,
}

impl SearchController {
    pub fn new(api: Arc<TvMazeApi>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            api,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Search shows matching `query`.
    ///
    /// On success the result list is replaced; on failure the error flag
    /// is raised and the previous results stay as they were. The error is
    /// also returned for diagnostics.
    pub async fn search(&self, query: &str) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.state.send_modify(|state| {
            state.loading = true;
            state.error = false;
        });

        let result = self.api.search(query).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(query, generation, "discarding superseded search response");
            return result.map(|_| ());
        }

        match result {
            Ok(shows) => {
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.shows = shows;
                });
                Ok(())
            }
            Err(e) => {
                warn!(query, error = %e, "show search failed");
                self.state.send_modify(|state| {
                    state.error = true;
                    state.loading = false;
                });
                Err(e)
            }
        }
    }
}
