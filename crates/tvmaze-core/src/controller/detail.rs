//! Show detail controller
//!
//! Selecting a show loads its detail, episodes and cast as one unit. A
//! configured cache is consulted first; on a miss the three requests run
//! concurrently and the combined result is cached before it is published.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::TvMazeApi;
use crate::cache::ShowCache;
use crate::error::Result;
use crate::season::group_by_season;
use crate::types::{CastEntry, Episode, SeasonGroup, Show, ShowBundle};

/// Observable state of the detail pane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailState {
    /// A show is being loaded
    pub loading: bool,
    /// The last selection failed to load
    pub error: bool,
    /// Show, episodes and cast of the last successful selection
    pub current: Option<ShowBundle>,
    /// Episodes of `current` grouped by season
    pub seasons: Vec<SeasonGroup>,
}

impl DetailState {
    pub fn show(&self) -> Option<&Show> {
        self.current.as_ref().map(|bundle| &bundle.show)
    }

    pub fn episodes(&self) -> &[Episode] {
        self.current
            .as_ref()
            .map(|bundle| bundle.episodes.as_slice())
            .unwrap_or_default()
    }

    pub fn cast(&self) -> &[CastEntry] {
        self.current
            .as_ref()
            .map(|bundle| bundle.cast.as_slice())
            .unwrap_or_default()
    }
}

/// Loads the selected show and owns the current show bundle.
pub struct DetailController {
    api: Arc<TvMazeApi>,
    cache: Option<Arc<dyn ShowCache>>,
    state: watch::Sender<DetailState>,
}

impl DetailController {
    /// Create a controller that always fetches from the network.
    pub fn new(api: Arc<TvMazeApi>) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            api,
            cache: None,
            state,
        }
    }

    /// Create a controller backed by `cache`.
    pub fn with_cache(api: Arc<TvMazeApi>, cache: Arc<dyn ShowCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Self::new(api)
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    /// Load the show with the given id.
    ///
    /// A cached record is published immediately without touching the
    /// network. Otherwise detail, episodes and cast are fetched
    /// concurrently; if any of them fails the error flag is raised, nothing
    /// is cached, and the previously shown bundle is kept.
    pub async fn select_show(&self, id: u32) -> Result<()> {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = false;
        });

        if let Some(bundle) = self.cache.as_ref().and_then(|cache| cache.get(id)) {
            debug!(id, "show served from cache");
            self.publish(bundle);
            return Ok(());
        }

        match self.api.get_bundle(id).await {
            Ok(bundle) => {
                info!(
                    id,
                    episodes = bundle.episodes.len(),
                    cast = bundle.cast.len(),
                    "loaded show"
                );
                self.state.send_modify(|state| state.loading = false);

                if let Some(cache) = &self.cache {
                    Self::store(Arc::clone(cache), id, bundle.clone()).await;
                }

                self.publish(bundle);
                Ok(())
            }
            Err(e) => {
                warn!(id, error = %e, "failed to load show");
                self.state.send_modify(|state| {
                    state.error = true;
                    state.loading = false;
                });
                Err(e)
            }
        }
    }

    /// Write `bundle` to the cache off the async workers.
    ///
    /// A failed write only costs a refetch later, so it is logged and
    /// the load still succeeds.
    async fn store(cache: Arc<dyn ShowCache>, id: u32, bundle: ShowBundle) {
        match tokio::task::spawn_blocking(move || cache.put(id, bundle)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(id, error = %e, "failed to cache show"),
            Err(e) => warn!(id, error = %e, "cache write task failed"),
        }
    }

    fn publish(&self, bundle: ShowBundle) {
        let seasons = group_by_season(&bundle.episodes);
        self.state.send_modify(|state| {
            state.loading = false;
            state.seasons = seasons;
            state.current = Some(bundle);
        });
    }
}
