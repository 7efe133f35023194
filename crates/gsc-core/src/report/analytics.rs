//! Search Analytics report
//!
//! Each row has one column per requested dimension, in request order,
//! followed by the metrics. `position` is not part of the row shape for
//! search types that do not report it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::persistence;
use super::RowOrder;
use crate::enums::{CodeEnum, Dimension};
use crate::error::Result;
use crate::query::QueryState;
use crate::types::ApiRow;

/// Metric columns, in output order
pub const METRICS: [&str; 4] = ["clicks", "impressions", "ctr", "position"];

/// Provenance record stored in front of the raw rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryProvenance {
    pub url: String,
    pub query: QueryState,
    /// Absent in blobs written before the order was recorded
    #[serde(default)]
    pub row_order: RowOrder,
}

/// A materialized Search Analytics row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// `(dimension, key)` pairs in request order
    pub dimensions: Vec<(Dimension, String)>,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    /// `None` when the search type does not report a position
    pub position: Option<f64>,
}

impl Row {
    fn from_api(raw: &ApiRow, dimensions: &[Dimension], with_position: bool) -> Self {
        Self {
            dimensions: dimensions
                .iter()
                .copied()
                .zip(raw.keys.iter().cloned())
                .collect(),
            clicks: raw.clicks,
            impressions: raw.impressions,
            ctr: raw.ctr,
            position: if with_position { raw.position } else { None },
        }
    }

    /// Key of `dimension` in this row
    pub fn dimension(&self, dimension: Dimension) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, key)| key.as_str())
    }
}

/// Immutable result of a Search Analytics query
#[derive(Debug, Clone)]
pub struct Report {
    site_url: String,
    query: QueryState,
    raw: Vec<ApiRow>,
    with_position: bool,
    order: RowOrder,
    rows: Vec<Row>,
}

impl Report {
    /// Materialize `raw` rows produced by `query` on `site_url`.
    pub fn new(site_url: impl Into<String>, query: QueryState, raw: Vec<ApiRow>) -> Self {
        Self::with_order(site_url, query, raw, RowOrder::default())
    }

    /// Like [`Report::new`] with an explicit row order.
    pub fn with_order(
        site_url: impl Into<String>,
        query: QueryState,
        raw: Vec<ApiRow>,
        order: RowOrder,
    ) -> Self {
        let with_position = query.search_type.map_or(true, |t| t.reports_position());
        let rows = order.collect(
            raw.iter()
                .map(|r| Row::from_api(r, &query.dimensions, with_position)),
        );

        Self {
            site_url: site_url.into(),
            query,
            raw,
            with_position,
            order,
            rows,
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Snapshot of the query that produced the report
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Rows as returned by the API
    pub fn raw(&self) -> &[ApiRow] {
        &self.raw
    }

    pub fn row_order(&self) -> RowOrder {
        self.order
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    /// Column names: dimensions, then metrics
    pub fn columns(&self) -> Vec<&'static str> {
        self.query
            .dimensions
            .iter()
            .map(|d| d.value())
            .chain(METRICS.iter().copied().filter(|m| self.with_position || *m != "position"))
            .collect()
    }

    /// Rows as ordered JSON objects keyed by column name
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                for (dimension, key) in &row.dimensions {
                    record.insert(dimension.value().to_string(), Value::from(key.as_str()));
                }
                record.insert("clicks".to_string(), Value::from(row.clicks));
                record.insert("impressions".to_string(), Value::from(row.impressions));
                record.insert("ctr".to_string(), Value::from(row.ctr));
                if self.with_position {
                    record.insert(
                        "position".to_string(),
                        row.position.map_or(Value::Null, Value::from),
                    );
                }
                record
            })
            .collect()
    }

    /// Encode provenance and raw rows.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let provenance = QueryProvenance {
            url: self.site_url.clone(),
            query: self.query.clone(),
            row_order: self.order,
        };
        persistence::encode(&(provenance, &self.raw))
    }

    /// Rebuild a report from bytes produced by [`Report::to_bytes`].
    pub fn from_datastream(bytes: &[u8]) -> Result<Self> {
        let (provenance, raw): (QueryProvenance, Vec<ApiRow>) = persistence::decode(bytes)?;
        Ok(Self::with_order(
            provenance.url,
            provenance.query,
            raw,
            provenance.row_order,
        ))
    }

    /// Save into the working directory; see [`Report::to_disk_in`].
    pub fn to_disk(&self, filename: &str) -> Result<PathBuf> {
        self.to_disk_in(&persistence::working_dir()?, filename)
    }

    /// Save under `dir` without overwriting existing files.
    ///
    /// An empty `filename` becomes `YYYYMMDD_<site>_query.pck`.
    pub fn to_disk_in(&self, dir: &Path, filename: &str) -> Result<PathBuf> {
        let fallback = persistence::default_filename(
            &self.site_url,
            "query",
            chrono::Local::now().date_naive(),
        );
        persistence::write_report(dir, filename, &fallback, &self.to_bytes()?)
    }

    /// Load a report saved with [`Report::to_disk`].
    pub fn from_disk(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_datastream(&persistence::read_report(path.as_ref())?)
    }
}

impl std::ops::Index<usize> for Report {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::SearchType;
    use crate::error::GscError;

    fn api_row(keys: &[&str], clicks: f64, position: Option<f64>) -> ApiRow {
        ApiRow {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            clicks,
            impressions: clicks * 10.0,
            ctr: 0.1,
            position,
        }
    }

    fn query(dimensions: Vec<Dimension>, search_type: Option<SearchType>) -> QueryState {
        QueryState {
            dimensions,
            search_type,
            ..QueryState::default()
        }
    }

    fn sample_raw() -> Vec<ApiRow> {
        vec![
            api_row(&["2024-01-01", "/a"], 1.0, Some(3.5)),
            api_row(&["2024-01-02", "/b"], 2.0, Some(4.5)),
            api_row(&["2024-01-03", "/c"], 3.0, Some(5.5)),
        ]
    }

    #[test]
    fn test_keys_zip_onto_dimensions() {
        let report = Report::with_order(
            "https://www.example.com/",
            query(vec![Dimension::Date, Dimension::Page], None),
            sample_raw(),
            RowOrder::Arrival,
        );

        let row = &report[0];
        assert_eq!(row.dimension(Dimension::Date), Some("2024-01-01"));
        assert_eq!(row.dimension(Dimension::Page), Some("/a"));
        assert_eq!(row.dimension(Dimension::Query), None);
        assert_eq!(row.position, Some(3.5));
    }

    #[test]
    fn test_rows_reversed_by_default() {
        let report = Report::new(
            "https://www.example.com/",
            query(vec![Dimension::Date, Dimension::Page], None),
            sample_raw(),
        );

        let pages: Vec<&str> = report.iter().filter_map(|r| r.dimension(Dimension::Page)).collect();
        assert_eq!(pages, vec!["/c", "/b", "/a"]);
        assert_eq!(report.first().unwrap().clicks, 3.0);
        assert_eq!(report.last().unwrap().clicks, 1.0);
        assert_eq!(report.raw()[0].keys[1], "/a");
    }

    #[test]
    fn test_columns_with_position() {
        let report = Report::new("s", query(vec![Dimension::Query], Some(SearchType::Web)), vec![]);
        assert_eq!(report.columns(), vec!["query", "clicks", "impressions", "ctr", "position"]);
        assert!(report.is_empty());
        assert!(report.first().is_none());
    }

    #[test]
    fn test_position_dropped_for_discover() {
        let report = Report::new(
            "s",
            query(vec![Dimension::Page], Some(SearchType::Discover)),
            vec![api_row(&["/a"], 1.0, Some(2.0))],
        );

        assert_eq!(report.columns(), vec!["page", "clicks", "impressions", "ctr"]);
        assert_eq!(report[0].position, None);

        let record = &report.to_records()[0];
        assert!(!record.contains_key("position"));
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["page", "clicks", "impressions", "ctr"]);
    }

    #[test]
    fn test_records_keep_column_order() {
        let report = Report::new(
            "s",
            query(vec![Dimension::Page, Dimension::Date], None),
            vec![api_row(&["/a", "2024-01-01"], 1.0, Some(2.0))],
        );
        let record = &report.to_records()[0];
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["page", "date", "clicks", "impressions", "ctr", "position"]);
        assert_eq!(record["position"], 2.0);
    }

    #[test]
    fn test_datastream_round_trip() {
        let saved = Report::new(
            "https://www.example.com/",
            query(vec![Dimension::Date, Dimension::Page], Some(SearchType::Image)),
            sample_raw(),
        );

        let restored = Report::from_datastream(&saved.to_bytes().unwrap()).unwrap();

        assert_eq!(restored.site_url(), saved.site_url());
        assert_eq!(restored.query(), saved.query());
        assert_eq!(restored.rows(), saved.rows());
        assert_eq!(restored.raw(), saved.raw());
    }

    #[test]
    fn test_datastream_keeps_arrival_order() {
        let saved = Report::with_order(
            "https://www.example.com/",
            query(vec![Dimension::Page], None),
            vec![
                api_row(&["/p0"], 1.0, Some(1.0)),
                api_row(&["/p1"], 2.0, Some(2.0)),
                api_row(&["/p2"], 3.0, Some(3.0)),
            ],
            RowOrder::Arrival,
        );

        let restored = Report::from_datastream(&saved.to_bytes().unwrap()).unwrap();

        let pages: Vec<&str> = restored.iter().filter_map(|r| r.dimension(Dimension::Page)).collect();
        assert_eq!(pages, vec!["/p0", "/p1", "/p2"]);
        assert_eq!(restored.row_order(), RowOrder::Arrival);
        assert_eq!(restored.rows(), saved.rows());
    }

    #[test]
    fn test_datastream_without_order_reverses() {
        let blob = persistence::encode(&(
            serde_json::json!({"url": "s", "query": QueryState::default()}),
            vec![api_row(&[], 1.0, None), api_row(&[], 2.0, None)],
        ))
        .unwrap();

        let restored = Report::from_datastream(&blob).unwrap();
        assert_eq!(restored.row_order(), RowOrder::Reversed);
        assert_eq!(restored.first().unwrap().clicks, 2.0);
    }

    #[test]
    fn test_disk_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let saved = Report::new(
            "https://www.example.com/",
            query(vec![Dimension::Date], Some(SearchType::GoogleNews)),
            vec![api_row(&["2024-01-01"], 7.0, None)],
        );

        let path = saved.to_disk_in(dir.path(), "").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("_https_www_example_com__query.pck"));

        let restored = Report::from_disk(&path).unwrap();
        assert_eq!(restored.rows(), saved.rows());
        assert_eq!(restored.columns(), saved.columns());
    }

    #[test]
    fn test_disk_collision_gets_counter() {
        let dir = tempfile::tempdir().unwrap();
        let report = Report::new("s", query(vec![], None), vec![]);

        let first = report.to_disk_in(dir.path(), "site.pck").unwrap();
        let second = report.to_disk_in(dir.path(), "site.pck").unwrap();

        assert_eq!(first, dir.path().join("site.pck"));
        assert_eq!(second, dir.path().join("site001.pck"));
    }

    #[test]
    fn test_from_disk_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Report::from_disk(dir.path().join("missing.pck")),
            Err(GscError::Storage { .. })
        ));
    }

    #[test]
    fn test_from_datastream_rejects_inspection_blob() {
        let blob = persistence::encode(&(
            crate::report::InspectionProvenance {
                url: "s".to_string(),
                row_order: RowOrder::Reversed,
            },
            vec![serde_json::json!({"inspectionUrl": "x"})],
        ))
        .unwrap();
        assert!(matches!(
            Report::from_datastream(&blob),
            Err(GscError::Deserialization(_))
        ));
    }
}
