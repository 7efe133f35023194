//! In-memory service used by builder tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::{json, Map, Value};

use crate::client::SearchConsoleService;
use crate::enums::PermissionLevel;
use crate::error::TransportError;
use crate::query::QueryState;
use crate::types::{
    ApiRow, InspectionRequest, InspectionResponse, SearchAnalyticsResponse, SiteEntry,
};

type Outcome<T> = std::result::Result<T, TransportError>;

/// Serves queued analytics pages (an empty page once the queue is drained)
/// and canned inspection results, recording every call.
#[derive(Default)]
pub(crate) struct MockService {
    sites: Mutex<Vec<SiteEntry>>,
    pages: Mutex<VecDeque<Outcome<Vec<ApiRow>>>>,
    inspections: Mutex<HashMap<String, Map<String, Value>>>,
    failing_urls: Mutex<Vec<String>>,
    query_calls: Mutex<Vec<(String, QueryState)>>,
    inspect_calls: Mutex<Vec<InspectionRequest>>,
    site_calls: AtomicUsize,
}

impl MockService {
    pub fn with_sites(sites: &[(&str, PermissionLevel)]) -> Self {
        let service = Self::default();
        *service.sites.lock().unwrap() = sites
            .iter()
            .map(|(url, level)| SiteEntry {
                site_url: url.to_string(),
                permission_level: *level,
            })
            .collect();
        service
    }

    pub fn push_page(&self, rows: Vec<ApiRow>) {
        self.pages.lock().unwrap().push_back(Ok(rows));
    }

    pub fn push_error(&self, error: TransportError) {
        self.pages.lock().unwrap().push_back(Err(error));
    }

    pub fn set_inspection(&self, url: &str, result: Value) {
        if let Value::Object(map) = result {
            self.inspections.lock().unwrap().insert(url.to_string(), map);
        }
    }

    pub fn fail_inspection(&self, url: &str) {
        self.failing_urls.lock().unwrap().push(url.to_string());
    }

    pub fn query_calls(&self) -> Vec<(String, QueryState)> {
        self.query_calls.lock().unwrap().clone()
    }

    pub fn inspect_calls(&self) -> Vec<InspectionRequest> {
        self.inspect_calls.lock().unwrap().clone()
    }

    pub fn site_calls(&self) -> usize {
        self.site_calls.load(Ordering::SeqCst)
    }
}

impl SearchConsoleService for MockService {
    async fn list_sites(&self) -> Outcome<Vec<SiteEntry>> {
        self.site_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.sites.lock().unwrap().clone())
    }

    async fn query_search_analytics(
        &self,
        site_url: &str,
        body: &QueryState,
    ) -> Outcome<SearchAnalyticsResponse> {
        self.query_calls
            .lock()
            .unwrap()
            .push((site_url.to_string(), body.clone()));
        let next = self.pages.lock().unwrap().pop_front();
        match next {
            Some(Ok(rows)) => Ok(SearchAnalyticsResponse::with_rows(rows)),
            Some(Err(error)) => Err(error),
            None => Ok(SearchAnalyticsResponse::default()),
        }
    }

    async fn inspect_url(&self, request: &InspectionRequest) -> Outcome<InspectionResponse> {
        self.inspect_calls.lock().unwrap().push(request.clone());
        if self.failing_urls.lock().unwrap().contains(&request.inspection_url) {
            return Err(TransportError::Status {
                status: 500,
                message: "inspection failed".to_string(),
            });
        }

        let result = self
            .inspections
            .lock()
            .unwrap()
            .get(&request.inspection_url)
            .cloned()
            .or_else(|| {
                json!({"indexStatusResult": {"verdict": "PASS", "coverageState": "Submitted and indexed"}})
                    .as_object()
                    .cloned()
            });
        Ok(InspectionResponse {
            inspection_result: result,
        })
    }
}

/// `count` rows keyed `/page-0`, `/page-1`, ...
pub(crate) fn api_rows(count: usize) -> Vec<ApiRow> {
    (0..count)
        .map(|i| ApiRow {
            keys: vec![format!("/page-{}", i)],
            clicks: i as f64,
            impressions: (i * 10) as f64,
            ctr: 0.1,
            position: Some(1.0 + i as f64),
        })
        .collect()
}
