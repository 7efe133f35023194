//! Reports built from raw API payloads
//!
//! - `analytics`: fixed-column rows from Search Analytics queries
//! - `inspection`: nested records from URL inspection, with flattening
//! - `persistence`: on-disk and in-memory round trip of either report

pub mod analytics;
pub mod inspection;
pub mod persistence;

use serde::{Deserialize, Serialize};

pub use analytics::{QueryProvenance, Report, Row};
pub use inspection::{InspectionProvenance, InspectionReport, InspectionRow, Node, Record};

/// Order in which raw rows are materialized.
///
/// Reports have always listed rows last-received first, and persisted
/// reports rely on that order; `Arrival` keeps the API order instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOrder {
    #[default]
    Reversed,
    Arrival,
}

impl RowOrder {
    /// Collect `items` in this order.
    pub fn collect<I>(self, items: I) -> Vec<I::Item>
    where
        I: DoubleEndedIterator,
    {
        match self {
            RowOrder::Reversed => items.rev().collect(),
            RowOrder::Arrival => items.collect(),
        }
    }
}
