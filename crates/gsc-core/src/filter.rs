//! Dimension filter groups
//!
//! The API keeps a row when it satisfies at least one group, and a group is
//! satisfied when all its filters match. Every filter added here becomes its
//! own single-filter group, so several filters on the same dimension
//! (added with `append`) are alternatives.

use serde::{Deserialize, Serialize};

use crate::enums::{CodeEnum, Country, Dimension, Operator};
use crate::error::Result;

/// One filter condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub dimension: Dimension,
    pub expression: String,
    pub operator: Operator,
}

impl FilterEntry {
    pub fn new(dimension: Dimension, expression: impl Into<String>, operator: Operator) -> Self {
        Self {
            dimension,
            expression: expression.into(),
            operator,
        }
    }

    /// Build a filter from untyped input.
    ///
    /// Dimension and operator accept the canonical value or the symbolic
    /// name. A `country` filter must name a known country; it is stored as
    /// the alpha-3 code.
    ///
    /// # Errors
    /// `InvalidArgumentType` when any part is outside its value set.
    pub fn parse(dimension: &str, expression: &str, operator: &str) -> Result<Self> {
        let dimension = Dimension::parse(dimension)?;
        let operator = Operator::parse(operator)?;
        let expression = match dimension {
            Dimension::Country => Country::parse(expression)?.value().to_string(),
            _ => expression.to_string(),
        };
        Ok(Self::new(dimension, expression, operator))
    }
}

/// How filters inside a group combine. The API only supports `and`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    #[default]
    And,
}

/// A conjunction of filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    #[serde(default)]
    pub group_type: GroupType,
    pub filters: Vec<FilterEntry>,
}

impl FilterGroup {
    fn single(entry: FilterEntry) -> Self {
        Self {
            group_type: GroupType::And,
            filters: vec![entry],
        }
    }
}

/// Selects which filters of a dimension a removal affects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionMatch {
    /// Every filter on the dimension
    All,
    /// Only filters with exactly this expression
    Exact(String),
}

impl From<&str> for ExpressionMatch {
    fn from(expression: &str) -> Self {
        ExpressionMatch::Exact(expression.to_string())
    }
}

impl From<String> for ExpressionMatch {
    fn from(expression: String) -> Self {
        ExpressionMatch::Exact(expression)
    }
}

/// Ordered list of filter groups, serialized as `dimensionFilterGroups`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    groups: Vec<FilterGroup>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter on `dimension`.
    ///
    /// Without `append`, existing filters on the same dimension are removed
    /// first. Filtering on `SearchAppearance` is ignored. Returns whether a
    /// filter was added.
    pub fn add(
        &mut self,
        dimension: Dimension,
        expression: impl Into<String>,
        operator: Operator,
        append: bool,
    ) -> bool {
        self.add_entry(FilterEntry::new(dimension, expression, operator), append)
    }

    /// Add a country filter, keyed on the `country` dimension.
    pub fn add_country(&mut self, country: Country, operator: Operator, append: bool) -> bool {
        self.add(Dimension::Country, country.value(), operator, append)
    }

    /// Add a prepared entry with the same rules as [`FilterSet::add`].
    pub fn add_entry(&mut self, entry: FilterEntry, append: bool) -> bool {
        if entry.dimension == Dimension::SearchAppearance {
            return false;
        }
        if !append {
            self.remove(entry.dimension, ExpressionMatch::All);
        }
        self.groups.push(FilterGroup::single(entry));
        true
    }

    /// Remove filters on `dimension` matching `expression`.
    ///
    /// Matches are dropped from every group, wherever they sit in it, and
    /// groups left empty are pruned. Returns the number of filters removed.
    pub fn remove(&mut self, dimension: Dimension, expression: impl Into<ExpressionMatch>) -> usize {
        let expression = expression.into();
        let matches = |entry: &FilterEntry| {
            entry.dimension == dimension
                && match &expression {
                    ExpressionMatch::All => true,
                    ExpressionMatch::Exact(value) => &entry.expression == value,
                }
        };

        let mut removed = 0;
        for group in &mut self.groups {
            let before = group.filters.len();
            group.filters.retain(|entry| !matches(entry));
            removed += before - group.filters.len();
        }
        self.groups.retain(|group| !group.filters.is_empty());
        removed
    }

    /// Remove the filter on one country.
    pub fn remove_country(&mut self, country: Country) -> usize {
        self.remove(Dimension::Country, country.value())
    }

    /// Drop every group.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// All filters across groups, in insertion order
    pub fn as_ordered_list(&self) -> Vec<&FilterEntry> {
        self.groups.iter().flat_map(|g| g.filters.iter()).collect()
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
