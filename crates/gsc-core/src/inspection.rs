//! URL inspection builder
//!
//! Keeps an ordered bag of URLs for one web property. Each URL caches its
//! last result; a result younger than the TTL is served without a call.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde_json::Value;
use tokio::time::Instant;

use crate::client::{ClientConfig, RateLimiter, SearchConsoleService};
use crate::error::{GscError, Result};
use crate::report::inspection::INSPECTION_URL_KEY;
use crate::report::{InspectionReport, RowOrder};
use crate::types::InspectionRequest;

/// One URL of the bag and its cached result
#[derive(Debug, Clone)]
pub struct UrlEntry {
    url: String,
    cached: Option<Value>,
    fetched_at: Option<Instant>,
}

impl UrlEntry {
    fn new(url: String) -> Self {
        Self {
            url,
            cached: None,
            fetched_at: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Last result fetched for this URL, if any
    pub fn cached(&self) -> Option<&Value> {
        self.cached.as_ref()
    }

    fn fresh_result(&self, ttl: Duration) -> Option<&Value> {
        match (&self.cached, self.fetched_at) {
            (Some(value), Some(at)) if at.elapsed() <= ttl => Some(value),
            _ => None,
        }
    }
}

/// URLs to add
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlInput {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for UrlInput {
    fn from(url: &str) -> Self {
        UrlInput::Single(url.to_string())
    }
}

impl From<String> for UrlInput {
    fn from(url: String) -> Self {
        UrlInput::Single(url)
    }
}

impl From<Vec<String>> for UrlInput {
    fn from(urls: Vec<String>) -> Self {
        UrlInput::List(urls)
    }
}

impl From<&[&str]> for UrlInput {
    fn from(urls: &[&str]) -> Self {
        UrlInput::List(urls.iter().map(|u| u.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for UrlInput {
    fn from(urls: [&str; N]) -> Self {
        UrlInput::List(urls.iter().map(|u| u.to_string()).collect())
    }
}

/// URLs to remove, by value or by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSelector {
    Single(String),
    List(Vec<String>),
    Index(usize),
}

impl From<&str> for UrlSelector {
    fn from(url: &str) -> Self {
        UrlSelector::Single(url.to_string())
    }
}

impl From<String> for UrlSelector {
    fn from(url: String) -> Self {
        UrlSelector::Single(url)
    }
}

impl From<Vec<String>> for UrlSelector {
    fn from(urls: Vec<String>) -> Self {
        UrlSelector::List(urls)
    }
}

impl<const N: usize> From<[&str; N]> for UrlSelector {
    fn from(urls: [&str; N]) -> Self {
        UrlSelector::List(urls.iter().map(|u| u.to_string()).collect())
    }
}

impl From<usize> for UrlSelector {
    fn from(index: usize) -> Self {
        UrlSelector::Index(index)
    }
}

/// Fluent builder for URL inspections of one web property
pub struct InspectUrl<S> {
    service: Arc<S>,
    limiter: RateLimiter,
    site_url: String,
    urls: Vec<UrlEntry>,
    ttl: Duration,
    row_order: RowOrder,
}

impl<S: SearchConsoleService> InspectUrl<S> {
    /// Create an empty bag for `site_url`.
    ///
    /// # Errors
    /// `MissingWebProperty` when `site_url` is empty.
    pub fn new(service: Arc<S>, limiter: RateLimiter, site_url: impl Into<String>) -> Result<Self> {
        let site_url = site_url.into();
        if site_url.trim().is_empty() {
            return Err(GscError::MissingWebProperty(
                "a web property is required before inspecting URLs".to_string(),
            ));
        }

        Ok(Self {
            service,
            limiter,
            site_url,
            urls: Vec::new(),
            ttl: ClientConfig::default().inspection_ttl(),
            row_order: RowOrder::default(),
        })
    }

    /// How long a fetched result is reused
    pub fn ttl(&mut self, ttl: Duration) -> &mut Self {
        self.ttl = ttl;
        self
    }

    pub fn row_order(&mut self, order: RowOrder) -> &mut Self {
        self.row_order = order;
        self
    }

    /// Add one or more URLs.
    ///
    /// A URL already in the bag is left alone, unless `overwrite` is set:
    /// then its entry is replaced in place and its cached result dropped.
    pub fn add_url(&mut self, input: impl Into<UrlInput>, overwrite: bool) -> &mut Self {
        match input.into() {
            UrlInput::Single(url) => self.add_one(url, overwrite),
            UrlInput::List(urls) => {
                for url in urls {
                    self.add_one(url, overwrite);
                }
            }
        }
        self
    }

    fn add_one(&mut self, url: String, overwrite: bool) {
        match self.urls.iter().position(|entry| entry.url == url) {
            Some(index) if overwrite => self.urls[index] = UrlEntry::new(url),
            Some(_) => {}
            None => self.urls.push(UrlEntry::new(url)),
        }
    }

    /// Remove URLs by value (unknown ones are ignored) or by position.
    ///
    /// # Errors
    /// `IndexOutOfRange` when the index is past the end of the bag.
    pub fn remove_url(&mut self, selector: impl Into<UrlSelector>) -> Result<&mut Self> {
        match selector.into() {
            UrlSelector::Single(url) => self.urls.retain(|entry| entry.url != url),
            UrlSelector::List(urls) => self.urls.retain(|entry| !urls.contains(&entry.url)),
            UrlSelector::Index(index) => {
                if index >= self.urls.len() {
                    return Err(GscError::IndexOutOfRange {
                        index,
                        len: self.urls.len(),
                    });
                }
                self.urls.remove(index);
            }
        }
        Ok(self)
    }

    pub fn remove_all_urls(&mut self) -> &mut Self {
        self.urls.clear();
        self
    }

    /// URLs in the bag, in insertion order
    pub fn urls(&self) -> Vec<&str> {
        self.urls.iter().map(UrlEntry::url).collect()
    }

    pub fn entries(&self) -> &[UrlEntry] {
        &self.urls
    }

    pub fn urls_to_inspect(&self) -> usize {
        self.urls.len()
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Inspect every URL in the bag, reusing fresh cached results.
    ///
    /// Each fetched result gets an `inspectionUrl` field naming the URL.
    /// Results are returned in bag order.
    ///
    /// # Errors
    /// The first transport failure aborts the run. Results fetched before
    /// it stay cached.
    pub async fn execute(&mut self) -> Result<Vec<Value>> {
        let mut results = Vec::with_capacity(self.urls.len());

        for entry in &mut self.urls {
            if let Some(value) = entry.fresh_result(self.ttl) {
                debug!("inspection cache hit: {}", entry.url);
                results.push(value.clone());
                continue;
            }

            debug!("inspection cache miss: {}", entry.url);
            self.limiter.acquire().await;
            let request = InspectionRequest {
                inspection_url: entry.url.clone(),
                site_url: self.site_url.clone(),
            };
            let response = self.service.inspect_url(&request).await?;

            let value = response
                .inspection_result
                .map(|mut result| {
                    result.insert(INSPECTION_URL_KEY.to_string(), Value::from(entry.url.as_str()));
                    Value::Object(result)
                })
                .unwrap_or(Value::Null);

            entry.cached = Some(value.clone());
            entry.fetched_at = Some(Instant::now());
            results.push(value);
        }

        Ok(results)
    }

    /// [`InspectUrl::execute`] wrapped into an [`InspectionReport`].
    pub async fn get(&mut self) -> Result<InspectionReport> {
        let results = self.execute().await?;
        Ok(InspectionReport::with_order(
            self.site_url.clone(),
            results,
            self.row_order,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockService;
    use serde_json::json;

    const A: &str = "https://www.example.com/a";
    const B: &str = "https://www.example.com/b";
    const C: &str = "https://www.example.com/c";

    fn builder(service: &Arc<MockService>) -> InspectUrl<MockService> {
        InspectUrl::new(service.clone(), RateLimiter::new(0.0), "https://www.example.com/").unwrap()
    }

    #[test]
    fn test_missing_web_property() {
        let service = Arc::new(MockService::default());
        assert!(matches!(
            InspectUrl::new(service, RateLimiter::new(0.0), "  "),
            Err(GscError::MissingWebProperty(_))
        ));
    }

    #[test]
    fn test_add_url_keeps_order_and_skips_duplicates() {
        let service = Arc::new(MockService::default());
        let mut inspect = builder(&service);
        inspect.add_url(A, false).add_url([B, A, C], false);

        assert_eq!(inspect.urls(), vec![A, B, C]);
        assert_eq!(inspect.urls_to_inspect(), 3);
    }

    #[test]
    fn test_remove_url_variants() {
        let service = Arc::new(MockService::default());
        let mut inspect = builder(&service);
        inspect.add_url([A, B, C], false);

        inspect.remove_url("https://www.example.com/zzz").unwrap();
        assert_eq!(inspect.urls_to_inspect(), 3);

        inspect.remove_url(1usize).unwrap();
        assert_eq!(inspect.urls(), vec![A, C]);

        inspect.remove_url([A, "https://www.example.com/zzz"]).unwrap();
        assert_eq!(inspect.urls(), vec![C]);

        inspect.remove_url(C).unwrap();
        assert!(inspect.urls().is_empty());
    }

    #[test]
    fn test_remove_url_index_out_of_range() {
        let service = Arc::new(MockService::default());
        let mut inspect = builder(&service);
        inspect.add_url([A, B], false);

        match inspect.remove_url(2usize) {
            Err(GscError::IndexOutOfRange { index, len }) => assert_eq!((index, len), (2, 2)),
            other => panic!("Expected IndexOutOfRange, got {:?}", other.map(|i| i.urls_to_inspect())),
        }
        assert_eq!(inspect.urls_to_inspect(), 2);
    }

    #[test]
    fn test_remove_all_urls() {
        let service = Arc::new(MockService::default());
        let mut inspect = builder(&service);
        inspect.add_url([A, B], false).remove_all_urls();
        assert_eq!(inspect.urls_to_inspect(), 0);
    }

    #[tokio::test]
    async fn test_execute_adds_inspection_url() {
        let service = Arc::new(MockService::default());
        service.set_inspection(A, json!({"indexStatusResult": {"verdict": "FAIL"}}));
        let mut inspect = builder(&service);
        inspect.add_url([A, B], false);

        let results = inspect.execute().await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["inspectionUrl"], A);
        assert_eq!(results[0]["indexStatusResult"]["verdict"], "FAIL");
        assert_eq!(results[1]["inspectionUrl"], B);

        let calls = service.inspect_calls();
        assert_eq!(calls[0].site_url, "https://www.example.com/");
        assert_eq!(calls[1].inspection_url, B);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_twice_within_ttl_hits_cache() {
        let service = Arc::new(MockService::default());
        let mut inspect = builder(&service);
        inspect.add_url([A, B], false);

        let first = inspect.get().await.unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        let second = inspect.get().await.unwrap();

        assert_eq!(service.inspect_calls().len(), 2);
        assert_eq!(first.rows(), second.rows());
        assert_eq!(second.first().unwrap().inspection_url(), Some(B));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_results_are_refetched() {
        let service = Arc::new(MockService::default());
        let mut inspect = builder(&service);
        inspect.add_url(A, false);

        inspect.execute().await.unwrap();
        tokio::time::advance(Duration::from_secs(451)).await;
        inspect.execute().await.unwrap();

        assert_eq!(service.inspect_calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_ttl() {
        let service = Arc::new(MockService::default());
        let mut inspect = builder(&service);
        inspect.ttl(Duration::from_secs(5)).add_url(A, false);

        inspect.execute().await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;
        inspect.execute().await.unwrap();

        assert_eq!(service.inspect_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_overwrite_resets_cache_in_place() {
        let service = Arc::new(MockService::default());
        let mut inspect = builder(&service);
        inspect.add_url([A, B], false);
        inspect.execute().await.unwrap();

        inspect.add_url(A, true);
        assert_eq!(inspect.urls(), vec![A, B]);
        assert!(inspect.entries()[0].cached().is_none());
        assert!(inspect.entries()[1].cached().is_some());

        inspect.execute().await.unwrap();
        let urls: Vec<String> = service
            .inspect_calls()
            .into_iter()
            .map(|request| request.inspection_url)
            .collect();
        assert_eq!(urls, vec![A, B, A]);
    }

    #[tokio::test]
    async fn test_failure_aborts_but_keeps_earlier_cache() {
        let service = Arc::new(MockService::default());
        service.fail_inspection(B);
        let mut inspect = builder(&service);
        inspect.add_url([A, B], false);

        assert!(matches!(inspect.get().await, Err(GscError::Transport(_))));
        assert!(inspect.entries()[0].cached().is_some());
        assert!(inspect.entries()[1].cached().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_are_rate_limited() {
        let service = Arc::new(MockService::default());
        let mut inspect =
            InspectUrl::new(service.clone(), RateLimiter::new(1.0), "https://www.example.com/").unwrap();
        inspect.add_url([A, B, C], false);

        let start = Instant::now();
        inspect.execute().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
