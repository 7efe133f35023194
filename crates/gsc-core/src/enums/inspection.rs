//! Code tables for URL inspection results
//!
//! The API reports these fields as symbolic codes (`PASS`, `DISALLOWED`).
//! The value side holds the human readable text used when a report is
//! flattened.

use super::code_enum;

code_enum! {
    /// Overall verdict of an inspection section
    pub enum Verdict: "verdict" {
        Unspecified => ("VERDICT_UNSPECIFIED", "unspecified"),
        Pass => ("PASS", "Page is in GSC"),
        Fail => ("FAIL", "Page is not in GSC"),
        Neutral => ("NEUTRAL", "Excluded from GSC"),
        Partial => ("PARTIAL", "Page is partially in GSC"),
    }
}

code_enum! {
    pub enum RobotsTxtState: "robots.txt state" {
        Unspecified => ("ROBOTS_TXT_STATE_UNSPECIFIED", "State unknown, page not fetched"),
        Allowed => ("ALLOWED", "Allowed"),
        Disallowed => ("DISALLOWED", "Disallowed"),
    }
}

code_enum! {
    pub enum IndexingState: "indexing state" {
        Unspecified => ("INDEXING_STATE_UNSPECIFIED", "State unknown"),
        IndexingAllowed => ("INDEXING_ALLOWED", "Indexing allowed"),
        BlockedByMetaTag => ("BLOCKED_BY_META_TAG", "Noindex detected in robots meta tag"),
        BlockedDueToNoindex => ("BLOCKED_DUE_TO_NOINDEX", "Noindex detected in robots meta tag"),
        BlockedByHttpHeader => ("BLOCKED_BY_HTTP_HEADER", "Noindex detected in X-Robots-Tag"),
        BlockedDueToExpiredUnavailableAfter => (
            "BLOCKED_DUE_TO_EXPIRED_UNAVAILABLE_AFTER",
            "Indexing not allowed due to 'unavailable_after' date expired"
        ),
    }
}

code_enum! {
    pub enum PageFetchState: "page fetch state" {
        Unspecified => ("PAGE_FETCH_STATE_UNSPECIFIED", "State unknown"),
        Successful => ("SUCCESSFUL", "Success"),
        BlockedRobotsTxt => ("BLOCKED_ROBOTS_TXT", "Blocked by robots.txt"),
        RedirectError => ("REDIRECT_ERROR", "Redirection error"),
        AccessDenied => ("ACCESS_DENIED", "Access denied (401)"),
        NotFound => ("NOT_FOUND", "Page Not found (404)"),
        AccessForbidden => ("ACCESS_FORBIDDEN", "Access forbidden (403)"),
        Blocked4xx => ("BLOCKED_4XX", "Other 4xx issue (not 403, 404)"),
        Soft404 => ("SOFT_404", "Soft 404"),
        ServerError => ("SERVER_ERROR", "Server error (5xx)"),
        InternalCrawlError => ("INTERNAL_CRAWL_ERROR", "Internal error"),
        InvalidUrl => ("INVALID_URL", "Invalid URL"),
    }
}

code_enum! {
    pub enum CrawlerAgent: "crawler agent" {
        Unspecified => ("CRAWLING_USER_AGENT_UNSPECIFIED", "Unknown"),
        Desktop => ("DESKTOP", "Desktop"),
        Mobile => ("MOBILE", "Mobile"),
    }
}

code_enum! {
    pub enum Severity: "severity" {
        Unspecified => ("SEVERITY_UNSPECIFIED", "Unknown severity"),
        Warning => ("WARNING", "Warning"),
        Error => ("ERROR", "Error"),
    }
}

code_enum! {
    pub enum MobileUsabilityIssueType: "mobile usability issue type" {
        Unspecified => ("MOBILE_USABILITY_ISSUE_TYPE_UNSPECIFIED", "Unknown issue"),
        UsesIncompatiblePlugins => (
            "USES_INCOMPATIBLE_PLUGINS",
            "Site uses incompatible plugins for mobile devices"
        ),
        ConfigureViewport => ("CONFIGURE_VIEWPORT", "Viewport is not specified"),
        FixedWidthViewport => ("FIXED_WIDTH_VIEWPORT", "Viewport defined to a fixed width"),
        SizeContentToViewport => ("SIZE_CONTENT_TO_VIEWPORT", "Content not sized to viewport"),
        UseLegibleFontSizes => ("USE_LEGIBLE_FONT_SIZES", "Font size is too small for mobile devices"),
        TapTargetsTooClose => ("TAP_TARGETS_TOO_CLOSE", "Touch elements are too close"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::CodeEnum;

    #[test]
    fn test_code_to_text() {
        assert_eq!(Verdict::parse("PASS").unwrap().value(), "Page is in GSC");
        assert_eq!(PageFetchState::parse("SOFT_404").unwrap().value(), "Soft 404");
        assert_eq!(CrawlerAgent::parse("MOBILE").unwrap().value(), "Mobile");
    }

    #[test]
    fn test_noindex_alias_shares_text() {
        assert_eq!(
            IndexingState::BlockedDueToNoindex.value(),
            IndexingState::BlockedByMetaTag.value()
        );
    }

    #[test]
    fn test_unknown_code() {
        assert!(Severity::lookup("FATAL").is_none());
    }
}
