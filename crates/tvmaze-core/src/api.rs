//! Typed TVmaze endpoints
//!
//! This module combines the HTTP client with the data types to provide a
//! simple interface for searching shows and loading a show's detail,
//! episodes and cast.

use tracing::debug;

use crate::client::{ClientConfig, TvMazeClient};
use crate::error::{Result, TvMazeError};
use crate::types::{CastEntry, Episode, SearchEntry, Show, ShowBundle, ShowSummary};

/// Endpoint-level API for TVmaze
///
/// # Example
/// ```no_run
/// use tvmaze_core::TvMazeApi;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = TvMazeApi::new()?;
///
///     let shows = api.search("batman").await?;
///     println!("Found {} shows", shows.len());
///
///     Ok(())
/// }
/// ```
pub struct TvMazeApi {
    client: TvMazeClient,
}

impl TvMazeApi {
    /// Create a new API handle with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(TvMazeClient::new()?))
    }

    /// Create a new API handle from a client configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(TvMazeClient::with_config(config)?))
    }

    /// Create a new API handle around an existing client.
    pub fn with_client(client: TvMazeClient) -> Self {
        Self { client }
    }

    /// Search for shows by name.
    ///
    /// Returns the `show` part of every result entry, in the order TVmaze
    /// ranked them. The query is sent as-is (percent-encoded); an empty
    /// query is not rejected here.
    ///
    /// # Example
    /// ```no_run
    /// use tvmaze_core::TvMazeApi;
    ///
    /// # async fn example() -> Result<(), tvmaze_core::TvMazeError> {
    /// let api = TvMazeApi::new()?;
    /// for show in api.search("Breaking Bad").await? {
    ///     println!("{} ({})", show.name, show.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &str) -> Result<Vec<ShowSummary>> {
        let path = format!("/search/shows?q={}", urlencoding::encode(query));
        let entries: Vec<SearchEntry> = self.client.fetch_json(&path).await?;

        debug!(query, results = entries.len(), "search finished");
        Ok(entries.into_iter().map(|entry| entry.show).collect())
    }

    /// Get the full record of a show.
    ///
    /// # Errors
    /// * `TvMazeError::InvalidId` if `id` is 0
    /// * `TvMazeError::NotFound` if the show doesn't exist
    pub async fn get_show(&self, id: u32) -> Result<Show> {
        validate_id(id)?;
        self.client.fetch_json(&format!("/shows/{}", id)).await
    }

    /// Get all episodes of a show, in airing order.
    pub async fn get_episodes(&self, id: u32) -> Result<Vec<Episode>> {
        validate_id(id)?;
        self.client.fetch_json(&format!("/shows/{}/episodes", id)).await
    }

    /// Get the main cast of a show.
    pub async fn get_cast(&self, id: u32) -> Result<Vec<CastEntry>> {
        validate_id(id)?;
        self.client.fetch_json(&format!("/shows/{}/cast", id)).await
    }

    /// Fetch detail, episodes and cast of a show concurrently.
    ///
    /// All three requests must succeed. The first failure completes the
    /// combined request with that error; requests still in flight are
    /// dropped and their results discarded.
    ///
    /// # Example
    /// ```no_run
    /// use tvmaze_core::TvMazeApi;
    ///
    /// # async fn example() -> Result<(), tvmaze_core::TvMazeError> {
    /// let api = TvMazeApi::new()?;
    /// let bundle = api.get_bundle(1).await?;
    /// println!("{}: {} episodes", bundle.show.name, bundle.episodes.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_bundle(&self, id: u32) -> Result<ShowBundle> {
        validate_id(id)?;

        let (show, episodes, cast) =
            tokio::try_join!(self.get_show(id), self.get_episodes(id), self.get_cast(id))?;

        Ok(ShowBundle {
            show,
            episodes,
            cast,
        })
    }
}

fn validate_id(id: u32) -> Result<()> {
    if id == 0 {
        return Err(TvMazeError::InvalidId(id));
    }
    Ok(())
}
