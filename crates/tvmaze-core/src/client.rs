//! Rate-limited HTTP client for the TVmaze API
//!
//! This module provides the fetch client used by every endpoint: it issues
//! GET requests against the configured base URL, maps error statuses, and
//! decodes JSON bodies. Requests go through a token bucket sized to TVmaze's
//! published rate limit (20 calls per 10 seconds), so short bursts such as
//! the three detail requests of a show are sent together.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{Result, TvMazeError};

/// Base URL of the public TVmaze API
pub const TVMAZE_BASE_URL: &str = "https://api.tvmaze.com";

/// Default User-Agent identifying this client
const DEFAULT_USER_AGENT: &str = concat!("tvmaze-core/", env!("CARGO_PKG_VERSION"));

/// Lowest request rate a limiter accepts; smaller or non-finite rates are raised to it
const MIN_REQUESTS_PER_SECOND: f64 = 0.001;

/// Token-bucket rate limiter
///
/// Up to `burst` requests may be sent at once; after that, tokens refill
/// at one every `min_interval`.
pub struct RateLimiter {
    /// Time needed to refill one token
    min_interval: Duration,
    /// Bucket capacity
    burst: u32,
    bucket: Arc<Mutex<Bucket>>,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified sustained rate and burst size
    ///
    /// The bucket starts full. A burst of 0 is treated as 1.
    ///
    /// # Example
    /// ```
    /// use tvmaze_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0, 20); // 20 requests per 10 seconds
    /// ```
    pub fn new(requests_per_second: f64, burst: u32) -> Self {
        let rate = requests_per_second.max(MIN_REQUESTS_PER_SECOND);
        let burst = burst.max(1);
        Self {
            min_interval: Duration::from_secs_f64(1.0 / rate),
            burst,
            bucket: Arc::new(Mutex::new(Bucket {
                tokens: f64::from(burst),
                last_refill: Instant::now(),
            })),
        }
    }

    /// Acquire permission to make a request
    ///
    /// Returns immediately while tokens are left, otherwise waits for the
    /// next token to refill.
    pub async fn acquire(&self) {
        let mut bucket = self.bucket.lock().await;

        let now = Instant::now();
        let refilled = now.duration_since(bucket.last_refill).as_secs_f64()
            / self.min_interval.as_secs_f64();
        bucket.tokens = (bucket.tokens + refilled).min(f64::from(self.burst));
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            return;
        }

        let missing = 1.0 - bucket.tokens;
        sleep(self.min_interval.mul_f64(missing)).await;

        bucket.tokens = 0.0;
        bucket.last_refill = Instant::now();
    }

    /// Get the time needed to refill one token
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Get the number of requests allowed at once
    pub fn burst(&self) -> u32 {
        self.burst
    }
}

/// Configuration for the TVmaze HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL without trailing slash (default: https://api.tvmaze.com)
    pub base_url: String,
    /// Sustained requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Requests allowed at once before the sustained rate applies (default: 20)
    pub burst: u32,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TVMAZE_BASE_URL.to_string(),
            requests_per_second: 2.0,
            burst: 20,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at a different base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// HTTP client for the TVmaze API
///
/// Requests are rate limited and never retried; a failed request is
/// reported to the caller as-is.
pub struct TvMazeClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl TvMazeClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(config.requests_per_second, config.burst),
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a path and decode its JSON body
    ///
    /// # Arguments
    /// * `path` - Path relative to the base URL (e.g., "/shows/1")
    ///
    /// # Errors
    /// - `TvMazeError::NotFound` - Server returned 404
    /// - `TvMazeError::RateLimited` - Server returned 429
    /// - `TvMazeError::HttpError` - Network error or any other non-success status
    /// - `TvMazeError::ParseError` - Body is not the expected JSON
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        self.rate_limiter.acquire().await;
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TvMazeError::NotFound(path.to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TvMazeError::RateLimited);
        }

        let body = response.error_for_status()?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Get a reference to the rate limiter (for testing)
    #[cfg(test)]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
