//! URL inspection report
//!
//! Rows keep the nested shape of the API payload. Coded fields stay raw in
//! the rows and are translated to readable text only when flattened.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::persistence;
use super::RowOrder;
use crate::enums::{
    CodeEnum, CrawlerAgent, IndexingState, MobileUsabilityIssueType, PageFetchState,
    RobotsTxtState, Severity, Verdict,
};
use crate::error::Result;

/// Key added to every fetched result holding the inspected URL
pub const INSPECTION_URL_KEY: &str = "inspectionUrl";

/// Provenance record stored in front of the raw results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionProvenance {
    pub url: String,
    /// Absent in blobs written before the order was recorded
    #[serde(default)]
    pub row_order: RowOrder,
}

/// A node of an inspection record
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Record(Record),
    List(Vec<Node>),
    Scalar(Value),
}

impl Node {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Node::Record(Record::from_map(map)),
            Value::Array(items) => Node::List(items.iter().map(Node::from_value).collect()),
            scalar => Node::Scalar(scalar.clone()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Node::Record(record) => Value::Object(record.to_map()),
            Node::List(items) => Value::Array(items.iter().map(Node::to_value).collect()),
            Node::Scalar(value) => value.clone(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Node::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Value::as_str)
    }
}

/// Ordered mapping from field names to nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Node)>,
}

impl Record {
    /// Convert a JSON object, keeping key order.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            fields: map
                .iter()
                .map(|(key, value)| (key.clone(), Node::from_value(value)))
                .collect(),
        }
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(key, node)| (key.clone(), node.to_value()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn fields(&self) -> &[(String, Node)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Follow a dotted path such as `indexStatusResult.verdict` or
    /// `mobileUsabilityResult.issues.0.severity`; numeric segments index
    /// into lists.
    pub fn path(&self, dotted: &str) -> Option<&Node> {
        let mut segments = dotted.split('.');
        let mut node = self.get(segments.next()?)?;
        for segment in segments {
            node = match node {
                Node::Record(record) => record.get(segment)?,
                Node::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                Node::Scalar(_) => return None,
            };
        }
        Some(node)
    }
}

/// One inspected URL
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionRow {
    record: Record,
}

impl InspectionRow {
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// The URL this result belongs to
    pub fn inspection_url(&self) -> Option<&str> {
        self.record.get(INSPECTION_URL_KEY).and_then(Node::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.record.get(key)
    }

    pub fn path(&self, dotted: &str) -> Option<&Node> {
        self.record.path(dotted)
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.record.to_map()
    }
}

type Translate = fn(&str) -> Option<&'static str>;

fn text<E: CodeEnum>(code: &str) -> Option<&'static str> {
    E::variants()
        .iter()
        .find(|member| member.name() == code)
        .map(|member| member.value())
}

/// Coded fields, keyed by dotted path without list indices
const CODE_TABLE: &[(&str, Translate)] = &[
    ("indexStatusResult.verdict", text::<Verdict>),
    ("indexStatusResult.robotsTxtState", text::<RobotsTxtState>),
    ("indexStatusResult.indexingState", text::<IndexingState>),
    ("indexStatusResult.pageFetchState", text::<PageFetchState>),
    ("indexStatusResult.crawledAs", text::<CrawlerAgent>),
    ("mobileUsabilityResult.verdict", text::<Verdict>),
    ("mobileUsabilityResult.issues.issueType", text::<MobileUsabilityIssueType>),
    ("mobileUsabilityResult.issues.severity", text::<Severity>),
    ("ampResult.verdict", text::<Verdict>),
    ("ampResult.ampIndexStatusVerdict", text::<Verdict>),
    ("ampResult.robotsTxtState", text::<RobotsTxtState>),
    ("ampResult.indexingState", text::<IndexingState>),
    ("ampResult.pageFetchState", text::<PageFetchState>),
    ("ampResult.issues.severity", text::<Severity>),
    ("richResultsResult.verdict", text::<Verdict>),
    ("richResultsResult.detectedItems.items.issues.severity", text::<Severity>),
];

fn translate(key: &str, value: &Value) -> Option<Value> {
    let code = value.as_str()?;
    let table_key = key
        .split('.')
        .filter(|segment| segment.parse::<usize>().is_err())
        .collect::<Vec<_>>()
        .join(".");

    CODE_TABLE
        .iter()
        .find(|(path, _)| *path == table_key)
        .and_then(|(_, translate)| translate(code))
        .map(Value::from)
}

fn flatten_into(out: &mut Map<String, Value>, key: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (child, value) in map {
                flatten_into(out, format!("{}.{}", key, child), value);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_into(out, format!("{}.{}", key, index), value);
            }
        }
        scalar => {
            let value = translate(&key, scalar).unwrap_or_else(|| scalar.clone());
            out.insert(key, value);
        }
    }
}

/// Flatten a nested result into dotted keys.
///
/// List elements are keyed by index (`issues.0.severity`). Known coded
/// fields are replaced by their readable text; unknown codes are kept.
///
/// # Examples
/// ```
/// use gsc_core::report::inspection::flatten;
/// use serde_json::json;
///
/// let nested = json!({"indexStatusResult": {"verdict": "PASS", "sitemap": ["a", "b"]}});
/// let flat = flatten(nested.as_object().unwrap());
/// assert_eq!(flat["indexStatusResult.verdict"], "Page is in GSC");
/// assert_eq!(flat["indexStatusResult.sitemap.1"], "b");
/// ```
pub fn flatten(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in map {
        flatten_into(&mut out, key.clone(), value);
    }
    out
}

/// Immutable result of a URL inspection run
#[derive(Debug, Clone)]
pub struct InspectionReport {
    site_url: String,
    raw: Vec<Value>,
    order: RowOrder,
    rows: Vec<InspectionRow>,
}

impl InspectionReport {
    /// Materialize the per-URL results fetched for `site_url`.
    ///
    /// Null and empty results are skipped.
    pub fn new(site_url: impl Into<String>, raw: Vec<Value>) -> Self {
        Self::with_order(site_url, raw, RowOrder::default())
    }

    pub fn with_order(site_url: impl Into<String>, raw: Vec<Value>, order: RowOrder) -> Self {
        let rows = order.collect(raw.iter().filter_map(|value| match value {
            Value::Object(map) if !map.is_empty() => Some(InspectionRow {
                record: Record::from_map(map),
            }),
            _ => None,
        }));

        Self {
            site_url: site_url.into(),
            raw,
            order,
            rows,
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Results as returned by the API, in bag order
    pub fn raw(&self) -> &[Value] {
        &self.raw
    }

    pub fn row_order(&self) -> RowOrder {
        self.order
    }

    pub fn rows(&self) -> &[InspectionRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InspectionRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&InspectionRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&InspectionRow> {
        self.rows.last()
    }

    /// Rows as nested JSON objects with raw codes
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows.iter().map(InspectionRow::to_map).collect()
    }

    /// Rows flattened with [`flatten`], ready for tabular use
    pub fn to_flat_records(&self) -> Vec<Map<String, Value>> {
        self.rows.iter().map(|row| flatten(&row.to_map())).collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let provenance = InspectionProvenance {
            url: self.site_url.clone(),
            row_order: self.order,
        };
        persistence::encode(&(provenance, &self.raw))
    }

    pub fn from_datastream(bytes: &[u8]) -> Result<Self> {
        let (provenance, raw): (InspectionProvenance, Vec<Value>) = persistence::decode(bytes)?;
        Ok(Self::with_order(provenance.url, raw, provenance.row_order))
    }

    /// Save into the working directory; see [`InspectionReport::to_disk_in`].
    pub fn to_disk(&self, filename: &str) -> Result<PathBuf> {
        self.to_disk_in(&persistence::working_dir()?, filename)
    }

    /// Save under `dir` without overwriting existing files.
    ///
    /// An empty `filename` becomes `YYYYMMDD_<site>_inspection.pck`.
    pub fn to_disk_in(&self, dir: &Path, filename: &str) -> Result<PathBuf> {
        let fallback = persistence::default_filename(
            &self.site_url,
            "inspection",
            chrono::Local::now().date_naive(),
        );
        persistence::write_report(dir, filename, &fallback, &self.to_bytes()?)
    }

    pub fn from_disk(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_datastream(&persistence::read_report(path.as_ref())?)
    }
}

impl std::ops::Index<usize> for InspectionReport {
    type Output = InspectionRow;

    fn index(&self, index: usize) -> &InspectionRow {
        &self.rows[index]
    }
}

impl<'a> IntoIterator for &'a InspectionReport {
    type Item = &'a InspectionRow;
    type IntoIter = std::slice::Iter<'a, InspectionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
