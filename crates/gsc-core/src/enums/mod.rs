//! Closed value sets accepted by the Search Console API
//!
//! Every enum carries two spellings per member: a symbolic name
//! (`SEARCH_APPEARANCE`, `ITALY`, `PASS`) and the canonical value that goes
//! on the wire or is shown to a human (`searchAppearance`, `ITA`,
//! `Page is in GSC`). Parsing accepts either spelling.
//!
//! - `country`: ISO 3166-1 alpha-3 country codes
//! - `inspection`: code tables for URL inspection results

pub mod country;
pub mod inspection;

pub use country::Country;
pub use inspection::{
    CrawlerAgent, IndexingState, MobileUsabilityIssueType, PageFetchState, RobotsTxtState,
    Severity, Verdict,
};

use crate::error::{GscError, Result};

/// Shared behaviour of the closed value sets.
pub trait CodeEnum: Copy + Sized + 'static {
    /// Human readable name of the set, used in error messages
    const KIND: &'static str;

    /// Every member of the set, in declaration order
    fn variants() -> &'static [Self];

    /// Symbolic identifier, e.g. `SEARCH_APPEARANCE`
    fn name(&self) -> &'static str;

    /// Canonical value, e.g. `searchAppearance`
    fn value(&self) -> &'static str;

    /// Find the member whose value or name equals `raw`.
    fn lookup(raw: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .find(|v| v.value() == raw || v.name() == raw)
            .copied()
    }

    /// Membership test tolerant of both spellings.
    fn contains(raw: &str) -> bool {
        Self::lookup(raw).is_some()
    }

    /// Like [`CodeEnum::lookup`], failing with `InvalidArgumentType`.
    fn parse(raw: &str) -> Result<Self> {
        Self::lookup(raw).ok_or_else(|| {
            GscError::InvalidArgumentType(format!("'{}' is not a valid {}", raw, Self::KIND))
        })
    }
}

/// Declare a closed value set.
///
/// Each member is written as `Variant => ("SYMBOLIC_NAME", "value")`.
/// Serialization always emits the value; deserialization and `FromStr`
/// accept either spelling.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => ($sym:literal, $value:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::enums::CodeEnum for $name {
            const KIND: &'static str = $kind;

            fn variants() -> &'static [Self] {
                Self::ALL
            }

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $sym),+
                }
            }

            fn value(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::enums::CodeEnum::value(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::GscError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <$name as $crate::enums::CodeEnum>::parse(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str($crate::enums::CodeEnum::value(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::enums::CodeEnum>::lookup(&raw).ok_or_else(|| {
                    ::serde::de::Error::custom(format!("'{}' is not a valid {}", raw, $kind))
                })
            }
        }
    };
}

pub(crate) use code_enum;

code_enum! {
    /// Categorical axis used to group report rows
    pub enum Dimension: "dimension" {
        Date => ("DATE", "date"),
        Query => ("QUERY", "query"),
        Page => ("PAGE", "page"),
        Country => ("COUNTRY", "country"),
        Device => ("DEVICE", "device"),
        /// Display-only; cannot be combined with other dimensions or filtered on
        SearchAppearance => ("SEARCH_APPEARANCE", "searchAppearance"),
    }
}

code_enum! {
    /// Comparison applied by a dimension filter
    pub enum Operator: "operator" {
        Equals => ("EQUALS", "equals"),
        NotEquals => ("NOT_EQUALS", "notEquals"),
        Contains => ("CONTAINS", "contains"),
        NotContains => ("NOT_CONTAINS", "notContains"),
        IncludingRegex => ("INCLUDING_REGEX", "includingRegex"),
        ExcludingRegex => ("EXCLUDING_REGEX", "excludingRegex"),
    }
}

impl Default for Operator {
    fn default() -> Self {
        Operator::Equals
    }
}

code_enum! {
    /// Search result type a query reports on
    pub enum SearchType: "search type" {
        Web => ("WEB", "web"),
        Image => ("IMAGE", "image"),
        Video => ("VIDEO", "video"),
        News => ("NEWS", "news"),
        Discover => ("DISCOVER", "discover"),
        GoogleNews => ("GOOGLE_NEWS", "googleNews"),
    }
}

impl SearchType {
    /// Whether rows of this type carry an average `position` metric.
    pub fn reports_position(&self) -> bool {
        !matches!(self, SearchType::Discover | SearchType::GoogleNews)
    }
}

code_enum! {
    /// Finalized-only data or finalized plus fresh data
    pub enum DataState: "data state" {
        All => ("ALL", "all"),
        Final => ("FINAL", "final"),
    }
}

impl Default for DataState {
    fn default() -> Self {
        DataState::Final
    }
}

code_enum! {
    /// How the API aggregates rows
    pub enum AggregationType: "aggregation type" {
        Auto => ("AUTO", "auto"),
        ByPage => ("BY_PAGE", "byPage"),
        ByProperty => ("BY_PROPERTY", "byProperty"),
        ByNewsShowcasePanel => ("BY_NEWS_SHOWCASE_PANEL", "byNewsShowcasePanel"),
    }
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::Auto
    }
}

code_enum! {
    /// Access level of the authenticated user on a web property.
    ///
    /// Ordered from most to least privileged as reported by the API.
    #[derive(PartialOrd, Ord)]
    pub enum PermissionLevel: "permission level" {
        FullUser => ("SITE_FULL_USER", "siteFullUser"),
        Owner => ("SITE_OWNER", "siteOwner"),
        RestrictedUser => ("SITE_RESTRICTED_USER", "siteRestrictedUser"),
        UnverifiedUser => ("SITE_UNVERIFIED_USER", "siteUnverifiedUser"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_accepts_value_and_name() {
        assert_eq!(Dimension::lookup("searchAppearance"), Some(Dimension::SearchAppearance));
        assert_eq!(Dimension::lookup("SEARCH_APPEARANCE"), Some(Dimension::SearchAppearance));
        assert_eq!(Operator::lookup("notContains"), Some(Operator::NotContains));
        assert_eq!(Operator::lookup("NOT_CONTAINS"), Some(Operator::NotContains));
        assert_eq!(Dimension::lookup("Date"), None);
    }

    #[test]
    fn test_contains() {
        assert!(SearchType::contains("googleNews"));
        assert!(SearchType::contains("GOOGLE_NEWS"));
        assert!(!SearchType::contains("google_news"));
    }

    #[test]
    fn test_parse_rejects_unknown_member() {
        let err = Dimension::parse("region").unwrap_err();
        match err {
            GscError::InvalidArgumentType(msg) => {
                assert!(msg.contains("region"));
                assert!(msg.contains("dimension"));
            }
            other => panic!("Expected InvalidArgumentType, got {:?}", other),
        }
    }

    #[test]
    fn test_from_str_and_display() {
        let op: Operator = "INCLUDING_REGEX".parse().unwrap();
        assert_eq!(op, Operator::IncludingRegex);
        assert_eq!(op.to_string(), "includingRegex");
    }

    #[test]
    fn test_serialize_as_value() {
        let json = serde_json::to_string(&Dimension::SearchAppearance).unwrap();
        assert_eq!(json, "\"searchAppearance\"");
        let json = serde_json::to_string(&DataState::Final).unwrap();
        assert_eq!(json, "\"final\"");
    }

    #[test]
    fn test_deserialize_either_spelling() {
        let a: SearchType = serde_json::from_str("\"discover\"").unwrap();
        let b: SearchType = serde_json::from_str("\"DISCOVER\"").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<SearchType>("\"podcast\"").is_err());
    }

    #[test]
    fn test_permission_level_ordering() {
        assert!(PermissionLevel::FullUser < PermissionLevel::Owner);
        assert!(PermissionLevel::Owner < PermissionLevel::RestrictedUser);
        assert!(PermissionLevel::RestrictedUser < PermissionLevel::UnverifiedUser);
    }

    #[test]
    fn test_search_type_position_support() {
        assert!(SearchType::Web.reports_position());
        assert!(SearchType::Image.reports_position());
        assert!(!SearchType::Discover.reports_position());
        assert!(!SearchType::GoogleNews.reports_position());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Operator::default(), Operator::Equals);
        assert_eq!(DataState::default(), DataState::Final);
        assert_eq!(AggregationType::default(), AggregationType::Auto);
    }
}
