//! Google Search Console Core Library
//!
//! This crate wraps the Search Console API for bulk reporting: Search
//! Analytics queries and URL inspection.
//!
//! # Features
//! - Fluent query builder with date range normalization and filter groups
//! - Automatic pagination of Search Analytics results
//! - URL inspection with a per-URL result cache
//! - A rate limiter shared by every request of an account
//! - Reports that can be flattened, saved to disk and reloaded

pub mod account;
pub mod client;
pub mod enums;
pub mod error;
pub mod filter;
pub mod inspection;
pub mod query;
pub mod range;
pub mod report;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use account::{Account, WebProperty};
pub use client::{ClientConfig, RateLimiter, SearchConsoleClient, SearchConsoleService};
pub use enums::{
    AggregationType, CodeEnum, Country, DataState, Dimension, Operator, PermissionLevel,
    SearchType,
};
pub use error::{GscError, Result, TransportError};
pub use filter::{ExpressionMatch, FilterEntry, FilterSet};
pub use inspection::{InspectUrl, UrlInput, UrlSelector};
pub use query::{Query, QueryState};
pub use range::DateRange;
pub use report::{InspectionReport, Report, RowOrder};
