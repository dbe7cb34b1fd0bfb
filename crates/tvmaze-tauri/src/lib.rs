//! TVmaze Viewer Tauri Integration
//!
//! This crate exposes the TVmaze viewer controllers as Tauri commands so a
//! webview frontend can render the search form, result list, show detail
//! and the episodes/cast tabs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tvmaze_tauri::{ViewerConfig, ViewerState};
//! use tauri::Manager;
//!
//! fn main() {
//!     tvmaze_tauri::init_tracing();
//!
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             let cache_dir = app.path().app_cache_dir()?;
//!             app.manage(ViewerState::new(ViewerConfig::with_cache_dir(cache_dir))?);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             tvmaze_tauri::commands::search_shows,
//!             tvmaze_tauri::commands::get_search_state,
//!             tvmaze_tauri::commands::select_show,
//!             tvmaze_tauri::commands::get_detail_state,
//!             tvmaze_tauri::commands::select_tab,
//!             tvmaze_tauri::commands::set_episode_filter,
//!             tvmaze_tauri::commands::get_view,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `search_shows` - Search for shows by title
//! - `get_search_state` - Current search results and flags
//! - `select_show` - Load a show's detail, episodes and cast
//! - `get_detail_state` - Current show detail and flags
//! - `select_tab` - Switch between the episodes and cast tabs
//! - `set_episode_filter` - Filter seasons by episode name
//! - `get_view` - Everything the frontend renders, in one snapshot

pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tvmaze_core::cache::DEFAULT_CACHE_FILE;
use tvmaze_core::view::{can_submit, ShowDetailView};
use tvmaze_core::{
    ClientConfig, DetailController, JsonFileCache, SearchController, SearchState, SummaryView,
    Tab, TvMazeApi, ViewState,
};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls log levels; by default this crate and the core
/// library log at debug and everything else at warn. Calling this more
/// than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tvmaze_core=debug,tvmaze_tauri=debug,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Settings for building a `ViewerState`
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    /// HTTP client settings
    pub client: ClientConfig,
    /// File backing the show cache; `None` disables caching
    pub cache_path: Option<PathBuf>,
}

impl ViewerConfig {
    /// Default client settings with the cache file placed in `dir`.
    pub fn with_cache_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            client: ClientConfig::default(),
            cache_path: Some(dir.into().join(DEFAULT_CACHE_FILE)),
        }
    }
}

/// Detail pane as the frontend renders it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub loading: bool,
    pub error: bool,
    pub show: Option<ShowDetailView>,
}

/// Everything the frontend renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSnapshot {
    pub search: SearchState,
    pub detail: DetailView,
    pub tab: Tab,
    pub summary: SummaryView,
}

/// Application state managed by Tauri.
///
/// The controllers synchronize their own state, so commands share them
/// without an outer lock. The tab/filter state is guarded separately.
pub struct ViewerState {
    search: SearchController,
    detail: DetailController,
    view: Mutex<ViewState>,
}

impl ViewerState {
    /// Create the viewer state from `config`.
    ///
    /// # Errors
    /// Returns an error string if the HTTP client cannot be created.
    pub fn new(config: ViewerConfig) -> Result<Self, String> {
        info!(base_url = %config.client.base_url, cache = ?config.cache_path, "creating viewer state");
        let api = Arc::new(TvMazeApi::with_config(config.client).map_err(|e| e.to_string())?);

        let detail = match config.cache_path {
            Some(path) => {
                DetailController::with_cache(Arc::clone(&api), Arc::new(JsonFileCache::open(path)))
            }
            None => DetailController::new(Arc::clone(&api)),
        };

        Ok(Self {
            search: SearchController::new(api),
            detail,
            view: Mutex::new(ViewState::new()),
        })
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn detail(&self) -> &DetailController {
        &self.detail
    }

    /// Run a search unless the query is empty.
    ///
    /// Failures are reflected in the returned state's error flag.
    pub async fn submit_search(&self, query: &str) -> SearchState {
        if can_submit(query) {
            // Already logged by the controller; the flag is what the view shows.
            let _ = self.search.search(query).await;
        }
        self.search.state()
    }

    /// Load a show; failures are reflected in the returned view's error flag.
    pub async fn select_show(&self, id: u32) -> DetailView {
        let _ = self.detail.select_show(id).await;
        self.detail_view()
    }

    pub fn detail_view(&self) -> DetailView {
        let state = self.detail.state();
        DetailView {
            loading: state.loading,
            error: state.error,
            show: state.show().map(ShowDetailView::from),
        }
    }

    pub async fn select_tab(&self, tab: Tab) -> SummaryView {
        let mut view = self.view.lock().await;
        view.select_tab(tab);
        self.render(&view)
    }

    pub async fn set_episode_filter(&self, filter: String) -> SummaryView {
        let mut view = self.view.lock().await;
        view.set_filter(filter);
        self.render(&view)
    }

    pub async fn snapshot(&self) -> ViewerSnapshot {
        let view = self.view.lock().await;
        ViewerSnapshot {
            search: self.search.state(),
            detail: self.detail_view(),
            tab: view.tab(),
            summary: self.render(&view),
        }
    }

    fn render(&self, view: &ViewState) -> SummaryView {
        let state = self.detail.state();
        view.render(&state.seasons, state.cast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_breaking_bad(server: &MockServer) {
        mount(
            server,
            "/search/shows",
            json!([{"score": 1.0, "show": {"id": 169, "name": "Breaking Bad"}}]),
        )
        .await;
        mount(
            server,
            "/shows/169",
            json!({"id": 169, "name": "Breaking Bad", "genres": ["Drama", "Crime"], "summary": "<p><b>Breaking Bad</b></p>"}),
        )
        .await;
        mount(
            server,
            "/shows/169/episodes",
            json!([
                {"id": 1, "season": 1, "number": 1, "name": "Pilot"},
                {"id": 2, "season": 2, "number": 1, "name": "Seven Thirty-Seven"}
            ]),
        )
        .await;
        mount(
            server,
            "/shows/169/cast",
            json!([{"person": {"id": 1, "name": "Bryan Cranston"}, "character": {"id": 1, "name": "Walter White"}}]),
        )
        .await;
    }

    fn config(server: &MockServer, dir: &TempDir) -> ViewerConfig {
        ViewerConfig {
            client: ClientConfig {
                requests_per_second: 100.0,
                ..ClientConfig::with_base_url(server.uri())
            },
            cache_path: Some(dir.path().join(DEFAULT_CACHE_FILE)),
        }
    }

    #[test]
    fn test_viewer_config_with_cache_dir() {
        let config = ViewerConfig::with_cache_dir("/tmp/viewer");
        assert_eq!(
            config.cache_path,
            Some(PathBuf::from("/tmp/viewer").join(DEFAULT_CACHE_FILE))
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_not_submitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();

        let state = ViewerState::new(config(&server, &dir)).unwrap();
        let search = state.submit_search("").await;

        assert!(!search.loading);
        assert!(search.shows.is_empty());
    }

    #[tokio::test]
    async fn test_search_select_and_tabs() {
        let server = MockServer::start().await;
        mount_breaking_bad(&server).await;
        let dir = TempDir::new().unwrap();
        let state = ViewerState::new(config(&server, &dir)).unwrap();

        let search = state.submit_search("breaking bad").await;
        assert_eq!(search.shows[0].id, 169);

        let detail = state.select_show(169).await;
        assert!(!detail.error);
        let show = detail.show.unwrap();
        assert_eq!(show.genres, "Drama, Crime");
        assert_eq!(show.summary, "Breaking Bad");

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.tab, Tab::Episodes);
        match snapshot.summary {
            SummaryView::Episodes { seasons, .. } => assert_eq!(seasons.len(), 2),
            other => panic!("Expected episodes view, got {:?}", other),
        }

        match state.select_tab(Tab::Cast).await {
            SummaryView::Cast { cast } => assert_eq!(cast[0].person, "Bryan Cranston"),
            other => panic!("Expected cast view, got {:?}", other),
        }

        state.select_tab(Tab::Episodes).await;
        match state.set_episode_filter("seven".to_string()).await {
            SummaryView::Episodes { seasons, .. } => {
                assert_eq!(seasons.len(), 1);
                assert_eq!(seasons[0].season, 2);
            }
            other => panic!("Expected episodes view, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_selection_persists_in_cache_file() {
        let server = MockServer::start().await;
        mount_breaking_bad(&server).await;
        let dir = TempDir::new().unwrap();

        ViewerState::new(config(&server, &dir))
            .unwrap()
            .select_show(169)
            .await;

        let cache = JsonFileCache::open(dir.path().join(DEFAULT_CACHE_FILE));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_selection_sets_error_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let state = ViewerState::new(config(&server, &dir)).unwrap();

        let detail = state.select_show(1).await;
        assert!(detail.error);
        assert!(!detail.loading);
        assert!(detail.show.is_none());
        assert_eq!(state.snapshot().await.summary, SummaryView::Hidden);
    }
}
