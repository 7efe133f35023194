//! HTTP client and rate limiting for the Search Console API
//!
//! This module provides the service seam consumed by the query and
//! inspection builders, a `reqwest` implementation of it, and the shared
//! rate limiter that spaces every outbound call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use crate::error::{GscError, Result, TransportError};
use crate::query::QueryState;
use crate::report::RowOrder;
use crate::types::{
    InspectionRequest, InspectionResponse, SearchAnalyticsResponse, SiteEntry, SitesListResponse,
};

/// Base URL of the Search Console API
const DEFAULT_BASE_URL: &str = "https://searchconsole.googleapis.com";

/// User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = concat!("gsc-core/", env!("CARGO_PKG_VERSION"));

/// Seconds an inspection result stays fresh
const DEFAULT_INSPECTION_TTL_SECS: u64 = 450;

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
/// Clones share the same clock, so one limiter handed to several builders
/// gates all of them together.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Start time of the last request, `None` before the first one
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// A non-positive rate disables the limiter.
    ///
    /// # Example
    /// ```
    /// use gsc_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(1.0); // 1 request per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second > 0.0 && requests_per_second.is_finite() {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// Waits if necessary so the minimum interval between requests is
    /// respected, then records the current time. Returns the time waited.
    pub async fn acquire(&self) -> Duration {
        let mut last = self.last_request.lock().await;

        let wait = match *last {
            Some(at) => self.min_interval.saturating_sub(at.elapsed()),
            None => Duration::ZERO,
        };

        if !wait.is_zero() {
            debug!("rate limiter: waiting {:?}", wait);
            sleep(wait).await;
        }

        *last = Some(Instant::now());
        wait
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(ClientConfig::default().requests_per_second)
    }
}

/// Configuration for the Search Console client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 1.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// API root (default: `https://searchconsole.googleapis.com`)
    pub base_url: String,
    /// Freshness window of cached inspection results (default: 450)
    pub inspection_ttl_secs: u64,
    /// Order in which reports materialize their rows
    pub row_order: RowOrder,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 1.0,
            timeout_secs: 30,
            base_url: DEFAULT_BASE_URL.to_string(),
            inspection_ttl_secs: DEFAULT_INSPECTION_TTL_SECS,
            row_order: RowOrder::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `GSC_BASE_URL`, `GSC_TIMEOUT_SECS` and
    /// `GSC_REQUESTS_PER_SECOND` when they are set and parse.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("GSC_BASE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        if let Some(secs) = env_parse("GSC_TIMEOUT_SECS") {
            config.timeout_secs = secs;
        }
        if let Some(rps) = env_parse("GSC_REQUESTS_PER_SECOND") {
            config.requests_per_second = rps;
        }

        config
    }

    /// Inspection TTL as a duration
    pub fn inspection_ttl(&self) -> Duration {
        Duration::from_secs(self.inspection_ttl_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Operations the core needs from an authenticated Search Console session.
///
/// Implemented over HTTP by [`SearchConsoleClient`]; tests substitute
/// in-memory fakes.
pub trait SearchConsoleService: Send + Sync {
    /// List the web properties visible to the session
    fn list_sites(
        &self,
    ) -> impl Future<Output = std::result::Result<Vec<SiteEntry>, TransportError>> + Send;

    /// Run one bounded Search Analytics query
    fn query_search_analytics(
        &self,
        site_url: &str,
        body: &QueryState,
    ) -> impl Future<Output = std::result::Result<SearchAnalyticsResponse, TransportError>> + Send;

    /// Inspect the index status of a single URL
    fn inspect_url(
        &self,
        request: &InspectionRequest,
    ) -> impl Future<Output = std::result::Result<InspectionResponse, TransportError>> + Send;
}

/// HTTP client for the Search Console API
///
/// Authenticates every request with an opaque OAuth access token. Failures
/// are returned as [`TransportError`] without retrying.
pub struct SearchConsoleClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// API root without trailing slash
    base_url: String,
}

impl SearchConsoleClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client cannot be created
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_config(access_token, &ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client cannot be created
    pub fn with_config(access_token: &str, config: &ClientConfig) -> Result<Self> {
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|_| {
                GscError::InvalidArgumentType(
                    "access token contains characters not allowed in a header".to_string(),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a request and decode the JSON body of a successful response
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<T, TransportError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            message: extract_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string()),
        })
    }
}

impl SearchConsoleService for SearchConsoleClient {
    async fn list_sites(&self) -> std::result::Result<Vec<SiteEntry>, TransportError> {
        let url = format!("{}/webmasters/v3/sites", self.base_url);
        debug!("GET {}", url);
        let list: SitesListResponse = self.send(self.client.get(&url)).await?;
        Ok(list.site_entry)
    }

    async fn query_search_analytics(
        &self,
        site_url: &str,
        body: &QueryState,
    ) -> std::result::Result<SearchAnalyticsResponse, TransportError> {
        let url = format!(
            "{}/webmasters/v3/sites/{}/searchAnalytics/query",
            self.base_url,
            urlencoding::encode(site_url)
        );
        debug!("POST {} (startRow={}, rowLimit={})", url, body.start_row, body.row_limit);
        self.send(self.client.post(&url).json(body)).await
    }

    async fn inspect_url(
        &self,
        request: &InspectionRequest,
    ) -> std::result::Result<InspectionResponse, TransportError> {
        let url = format!("{}/v1/urlInspection/index:inspect", self.base_url);
        debug!("POST {} ({})", url, request.inspection_url);
        self.send(self.client.post(&url).json(request)).await
    }
}

/// Pull `error.message` out of a Google API error envelope
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.get("message")?.as_str().map(str::to_string)
}
