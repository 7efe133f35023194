//! Search Analytics query builder
//!
//! [`Query`] mutates a [`QueryState`] in place through chained `&mut self`
//! calls, then either sends one bounded request ([`Query::execute`]) or
//! pages through the whole result set ([`Query::get`]).
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use gsc_core::{Dimension, Operator, Query, RateLimiter, SearchConsoleClient};
//!
//! # async fn run() -> gsc_core::Result<()> {
//! let client = Arc::new(SearchConsoleClient::new("ya29.token")?);
//! let mut query = Query::new(client, RateLimiter::new(1.0), "https://www.example.com/")?;
//! query
//!     .range_str("2024-01-01", "2024-01-31")?
//!     .dimensions(&[Dimension::Date, Dimension::Page])
//!     .filter(Dimension::Page, "/blog/", Operator::Contains, false);
//!
//! let report = query.get().await?;
//! println!("{} rows", report.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::client::{RateLimiter, SearchConsoleService};
use crate::enums::{AggregationType, Country, DataState, Dimension, Operator, SearchType};
use crate::error::{GscError, Result};
use crate::filter::{ExpressionMatch, FilterEntry, FilterSet};
use crate::range::{self, DateRange};
use crate::report::{Report, RowOrder};
use crate::types::{ApiRow, SearchAnalyticsResponse};

/// Largest page the API serves
pub const MAX_ROW_LIMIT: u32 = 25_000;

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Body of a `searchAnalytics.query` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub data_state: DataState,
    #[serde(default)]
    pub aggregation_type: AggregationType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "FilterSet::is_empty")]
    pub dimension_filter_groups: FilterSet,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,
    #[serde(default)]
    pub start_row: u32,
    pub row_limit: u32,
}

impl QueryState {
    /// Default body relative to `today`: the two days before it, final
    /// data, automatic aggregation, first full page.
    pub fn starting(today: NaiveDate) -> Self {
        let day_before = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
        Self {
            start_date: day_before(2),
            end_date: day_before(1),
            data_state: DataState::default(),
            aggregation_type: AggregationType::default(),
            dimensions: Vec::new(),
            dimension_filter_groups: FilterSet::new(),
            search_type: None,
            start_row: 0,
            row_limit: MAX_ROW_LIMIT,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    fn set_range(&mut self, range: DateRange) {
        self.start_date = range.start;
        self.end_date = range.end;
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::starting(today())
    }
}

/// Fluent builder for one Search Analytics query
pub struct Query<S> {
    service: Arc<S>,
    limiter: RateLimiter,
    site_url: String,
    state: QueryState,
    row_order: RowOrder,
}

impl<S: SearchConsoleService> Query<S> {
    /// Create a builder for `site_url`.
    ///
    /// # Errors
    /// `MissingWebProperty` when `site_url` is empty.
    pub fn new(service: Arc<S>, limiter: RateLimiter, site_url: impl Into<String>) -> Result<Self> {
        let site_url = site_url.into();
        if site_url.trim().is_empty() {
            return Err(GscError::MissingWebProperty(
                "a web property is required before querying data".to_string(),
            ));
        }

        Ok(Self {
            service,
            limiter,
            site_url,
            state: QueryState::default(),
            row_order: RowOrder::default(),
        })
    }

    /// Row order of reports produced by [`Query::get`]
    pub fn row_order(&mut self, order: RowOrder) -> &mut Self {
        self.row_order = order;
        self
    }

    /// Set the date range; see [`range::normalize`].
    pub fn range(&mut self, start: NaiveDate, end: NaiveDate) -> &mut Self {
        let range = range::normalize(start, end, self.state.data_state, today());
        self.state.set_range(range);
        self
    }

    /// Set the date range from ISO dates; an empty start means today.
    ///
    /// # Errors
    /// `InvalidDateFormat`; the state is left untouched.
    pub fn range_str(&mut self, start: &str, end: &str) -> Result<&mut Self> {
        let today = today();
        let start = range::parse_date(start, today)?;
        let end = range::parse_date(end, today)?;
        Ok(self.range(start, end))
    }

    /// Set the range to `start` shifted by `months` then `days`.
    ///
    /// # Errors
    /// `InvalidArgumentType` when the shifted date leaves the calendar; the
    /// state is left untouched.
    pub fn range_relative(&mut self, start: NaiveDate, days: i32, months: i32) -> Result<&mut Self> {
        let range =
            range::normalize_relative(start, days, months, self.state.data_state, today())?;
        self.state.set_range(range);
        Ok(self)
    }

    /// [`Query::range_relative`] with an ISO start date; an empty start
    /// means today.
    ///
    /// # Errors
    /// `InvalidDateFormat` for a malformed start, otherwise as
    /// [`Query::range_relative`].
    pub fn range_relative_str(&mut self, start: &str, days: i32, months: i32) -> Result<&mut Self> {
        let start = range::parse_date(start, today())?;
        self.range_relative(start, days, months)
    }

    /// Finalized-only or fresh data. The current range is normalized again
    /// so `Final` never includes today.
    pub fn data_state(&mut self, data_state: DataState) -> &mut Self {
        self.state.data_state = data_state;
        let DateRange { start, end } = self.state.range();
        self.range(start, end)
    }

    pub fn aggregation_type(&mut self, aggregation_type: AggregationType) -> &mut Self {
        self.state.aggregation_type = aggregation_type;
        self
    }

    /// Report on one search type, replacing any previous choice.
    pub fn search_type(&mut self, search_type: SearchType) -> &mut Self {
        self.state.search_type = Some(search_type);
        self
    }

    /// Group rows by `dimensions`, in order.
    ///
    /// `SearchAppearance` cannot be combined with other dimensions and is
    /// dropped when it is.
    pub fn dimensions(&mut self, dimensions: &[Dimension]) -> &mut Self {
        let mut list = dimensions.to_vec();
        if list.len() > 1 && list.contains(&Dimension::SearchAppearance) {
            warn!("searchAppearance cannot be combined with other dimensions; dropping it");
            list.retain(|d| *d != Dimension::SearchAppearance);
        }
        self.state.dimensions = list;
        self
    }

    /// Dimensions from untyped names.
    ///
    /// # Errors
    /// `InvalidArgumentType` when a name is not a dimension; nothing changes.
    pub fn dimensions_str(&mut self, names: &[&str]) -> Result<&mut Self> {
        let dimensions = names
            .iter()
            .map(|name| name.parse::<Dimension>())
            .collect::<Result<Vec<_>>>()?;
        Ok(self.dimensions(&dimensions))
    }

    /// Filter on a dimension; see [`FilterSet::add`].
    pub fn filter(
        &mut self,
        dimension: Dimension,
        expression: impl Into<String>,
        operator: Operator,
        append: bool,
    ) -> &mut Self {
        self.state
            .dimension_filter_groups
            .add(dimension, expression, operator, append);
        self
    }

    /// Filter on a country; stored as its alpha-3 code.
    pub fn filter_country(&mut self, country: Country, operator: Operator, append: bool) -> &mut Self {
        self.state
            .dimension_filter_groups
            .add_country(country, operator, append);
        self
    }

    /// Filter from untyped input; see [`FilterEntry::parse`].
    pub fn filter_raw(
        &mut self,
        dimension: &str,
        expression: &str,
        operator: &str,
        append: bool,
    ) -> Result<&mut Self> {
        let entry = FilterEntry::parse(dimension, expression, operator)?;
        self.state.dimension_filter_groups.add_entry(entry, append);
        Ok(self)
    }

    /// Remove filters on `dimension`, all of them or one expression.
    pub fn filter_remove(
        &mut self,
        dimension: Dimension,
        expression: impl Into<ExpressionMatch>,
    ) -> &mut Self {
        self.state.dimension_filter_groups.remove(dimension, expression);
        self
    }

    pub fn filter_remove_country(&mut self, country: Country) -> &mut Self {
        self.state.dimension_filter_groups.remove_country(country);
        self
    }

    /// Page size from the first row; clamped to `1..=25000`.
    pub fn limit(&mut self, max: u32) -> &mut Self {
        self.limit_offset(0, max)
    }

    /// Page size and offset; the size is clamped to `1..=25000`.
    pub fn limit_offset(&mut self, start: u32, max: u32) -> &mut Self {
        self.state.start_row = start;
        self.state.row_limit = max.clamp(1, MAX_ROW_LIMIT);
        self
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn start_date(&self) -> NaiveDate {
        self.state.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.state.end_date
    }

    /// Active filters across groups, in insertion order
    pub fn filters(&self) -> Vec<&FilterEntry> {
        self.state.dimension_filter_groups.as_ordered_list()
    }

    /// Request body as it would be sent
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Drop filters the chosen search type rejects.
    fn validate(&mut self) {
        if self.state.search_type == Some(SearchType::GoogleNews) {
            let removed = self
                .state
                .dimension_filter_groups
                .remove(Dimension::Query, ExpressionMatch::All);
            if removed > 0 {
                warn!("googleNews does not accept query filters; removed {}", removed);
            }
        }
    }

    /// Send one bounded request using the current `startRow`/`rowLimit`.
    ///
    /// # Errors
    /// Transport failures are returned unchanged and never retried.
    pub async fn execute(&mut self) -> Result<SearchAnalyticsResponse> {
        self.validate();
        self.limiter.acquire().await;

        let page = self
            .service
            .query_search_analytics(&self.site_url, &self.state)
            .await?;
        debug!(
            "{}: {} rows at startRow={}",
            self.site_url,
            page.rows.len(),
            self.state.start_row
        );
        Ok(page)
    }

    /// Fetch every page and wrap the rows into a [`Report`].
    ///
    /// Pages are requested until one comes back empty, advancing `startRow`
    /// by `rowLimit` each time. `startRow` and `rowLimit` are restored
    /// afterwards, also on failure. The report's query snapshot carries
    /// the starting `startRow` and the number of rows retrieved as
    /// `rowLimit`.
    ///
    /// # Errors
    /// The first failing page aborts the run; no partial report is built.
    pub async fn get(&mut self) -> Result<Report> {
        let start_row = self.state.start_row;
        let step = self.state.row_limit;

        let fetched = self.fetch_all(step).await;
        self.state.start_row = start_row;
        self.state.row_limit = step;
        let rows = fetched?;

        let mut snapshot = self.state.clone();
        snapshot.row_limit = u32::try_from(rows.len()).unwrap_or(u32::MAX);

        Ok(Report::with_order(
            self.site_url.clone(),
            snapshot,
            rows,
            self.row_order,
        ))
    }

    async fn fetch_all(&mut self, step: u32) -> Result<Vec<ApiRow>> {
        let mut rows = Vec::new();
        loop {
            let page = self.execute().await?;
            let done = page.rows.is_empty();
            rows.extend(page.rows);
            self.state.start_row = self.state.start_row.saturating_add(step);
            if done {
                return Ok(rows);
            }
        }
    }
}
