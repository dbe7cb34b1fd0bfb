//! Tauri commands for the TVmaze viewer
//!
//! This module contains all Tauri commands that can be invoked from the frontend.
//! Load failures are not returned as errors; they show up as the `error`
//! flags of the returned state.

use tauri::State;

use crate::{DetailView, ViewerSnapshot, ViewerState};
use tvmaze_core::{SearchState, SummaryView, Tab};

/// Search for shows by title.
///
/// An empty query is ignored and the current state returned unchanged.
#[tauri::command]
pub async fn search_shows(
    state: State<'_, ViewerState>,
    query: String,
) -> Result<SearchState, String> {
    Ok(state.submit_search(&query).await)
}

/// Current search results and flags.
#[tauri::command]
pub async fn get_search_state(state: State<'_, ViewerState>) -> Result<SearchState, String> {
    Ok(state.search().state())
}

/// Load a show's detail, episodes and cast.
///
/// # Arguments
/// * `id` - TVmaze ID of the show
#[tauri::command]
pub async fn select_show(state: State<'_, ViewerState>, id: u32) -> Result<DetailView, String> {
    Ok(state.select_show(id).await)
}

/// Current show detail and flags.
#[tauri::command]
pub async fn get_detail_state(state: State<'_, ViewerState>) -> Result<DetailView, String> {
    Ok(state.detail_view())
}

/// Switch between the episodes and cast tabs.
#[tauri::command]
pub async fn select_tab(state: State<'_, ViewerState>, tab: Tab) -> Result<SummaryView, String> {
    Ok(state.select_tab(tab).await)
}

/// Filter seasons by episode name.
#[tauri::command]
pub async fn set_episode_filter(
    state: State<'_, ViewerState>,
    filter: String,
) -> Result<SummaryView, String> {
    Ok(state.set_episode_filter(filter).await)
}

/// Everything the frontend renders, in one snapshot.
#[tauri::command]
pub async fn get_view(state: State<'_, ViewerState>) -> Result<ViewerSnapshot, String> {
    Ok(state.snapshot().await)
}
