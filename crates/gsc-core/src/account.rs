//! Authenticated account and its web properties
//!
//! [`Account`] is the entry point: it lists the web properties the session
//! can see and hands out query and inspection builders bound to one of
//! them. Every builder shares the account's rate limiter.

use std::sync::Arc;

use log::debug;

use crate::client::{ClientConfig, RateLimiter, SearchConsoleClient, SearchConsoleService};
use crate::enums::PermissionLevel;
use crate::error::{GscError, Result};
use crate::inspection::InspectUrl;
use crate::query::Query;
use crate::types::SiteEntry;

/// A verified site and the user's access level on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebProperty {
    url: String,
    permission: PermissionLevel,
}

impl WebProperty {
    pub fn new(url: impl Into<String>, permission: PermissionLevel) -> Self {
        Self {
            url: url.into(),
            permission,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn permission(&self) -> PermissionLevel {
        self.permission
    }
}

impl From<SiteEntry> for WebProperty {
    fn from(entry: SiteEntry) -> Self {
        Self::new(entry.site_url, entry.permission_level)
    }
}

/// Search Console account
///
/// # Example
/// ```no_run
/// use gsc_core::{Account, Dimension};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut account = Account::connect("ya29.token")?;
///     for property in account.webproperties().await? {
///         println!("{} ({})", property.url(), property.permission());
///     }
///
///     let mut query = account.query("https://www.example.com/").await?;
///     let report = query.dimensions(&[Dimension::Query]).get().await?;
///     println!("{} rows", report.len());
///     Ok(())
/// }
/// ```
pub struct Account<S> {
    service: Arc<S>,
    limiter: RateLimiter,
    config: ClientConfig,
    properties: Option<Vec<WebProperty>>,
}

impl Account<SearchConsoleClient> {
    /// Connect over HTTP with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn connect(access_token: &str) -> Result<Self> {
        Self::connect_with_config(access_token, ClientConfig::default())
    }

    /// Connect over HTTP with custom configuration.
    pub fn connect_with_config(access_token: &str, config: ClientConfig) -> Result<Self> {
        let client = SearchConsoleClient::with_config(access_token, &config)?;
        Ok(Self::new(Arc::new(client), config))
    }
}

impl<S: SearchConsoleService> Account<S> {
    /// Build an account over any service implementation.
    pub fn new(service: Arc<S>, config: ClientConfig) -> Self {
        Self {
            service,
            limiter: RateLimiter::new(config.requests_per_second),
            config,
            properties: None,
        }
    }

    /// The limiter shared by every builder of this account
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Web properties visible to the account.
    ///
    /// Fetched on first use and cached afterwards.
    pub async fn webproperties(&mut self) -> Result<&[WebProperty]> {
        if self.properties.is_none() {
            self.limiter.acquire().await;
            let sites = self.service.list_sites().await?;
            debug!("account has {} web properties", sites.len());
            self.properties = Some(sites.into_iter().map(WebProperty::from).collect());
        }
        Ok(self.properties.as_deref().unwrap_or_default())
    }

    /// Web property at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` when `index` is past the end of the list.
    pub async fn get(&mut self, index: usize) -> Result<&WebProperty> {
        let properties = self.webproperties().await?;
        let len = properties.len();
        properties
            .get(index)
            .ok_or(GscError::IndexOutOfRange { index, len })
    }

    /// Web property whose URL equals `url` exactly
    pub async fn by_url(&mut self, url: &str) -> Result<Option<&WebProperty>> {
        Ok(self.webproperties().await?.iter().find(|p| p.url == url))
    }

    async fn require(&mut self, url: &str) -> Result<String> {
        self.by_url(url)
            .await?
            .map(|property| property.url.clone())
            .ok_or_else(|| {
                GscError::MissingWebProperty(format!("'{}' is not a web property of this account", url))
            })
    }

    /// Query builder for the web property `url`.
    ///
    /// # Errors
    /// `MissingWebProperty` when the account has no such property.
    pub async fn query(&mut self, url: &str) -> Result<Query<S>> {
        let site_url = self.require(url).await?;
        let mut query = Query::new(self.service.clone(), self.limiter.clone(), site_url)?;
        query.row_order(self.config.row_order);
        Ok(query)
    }

    /// Inspection builder for the web property `url`.
    ///
    /// # Errors
    /// `MissingWebProperty` when the account has no such property.
    pub async fn inspect(&mut self, url: &str) -> Result<InspectUrl<S>> {
        let site_url = self.require(url).await?;
        let mut inspect = InspectUrl::new(self.service.clone(), self.limiter.clone(), site_url)?;
        inspect
            .ttl(self.config.inspection_ttl())
            .row_order(self.config.row_order);
        Ok(inspect)
    }
}
