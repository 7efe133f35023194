//! Wire types for the Search Console API
//!
//! Request and response shapes exchanged with the service. Field names
//! follow the API's camelCase JSON exactly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::PermissionLevel;

/// One entry of the `sites.list` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    /// Property URL, e.g. `https://www.example.com/` or `sc-domain:example.com`
    pub site_url: String,
    /// Access level of the authenticated user
    pub permission_level: PermissionLevel,
}

/// Body of the `sites.list` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitesListResponse {
    #[serde(default)]
    pub site_entry: Vec<SiteEntry>,
}

/// A single row of a Search Analytics response.
///
/// `keys` holds one value per requested dimension, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRow {
    #[serde(default)]
    pub keys: Vec<String>,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

/// One page returned by `searchAnalytics.query`.
///
/// The API omits `rows` entirely when the page is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsResponse {
    #[serde(default)]
    pub rows: Vec<ApiRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_aggregation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl SearchAnalyticsResponse {
    /// Create a response holding only rows
    pub fn with_rows(rows: Vec<ApiRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }
}

/// Body of a `urlInspection.index.inspect` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRequest {
    pub inspection_url: String,
    pub site_url: String,
}

/// Body of a `urlInspection.index.inspect` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResponse {
    #[serde(default)]
    pub inspection_result: Option<Map<String, Value>>,
}
