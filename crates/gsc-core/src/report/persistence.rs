//! Report persistence
//!
//! A saved report is a MessagePack blob holding a two element sequence:
//! the provenance record and the raw rows exactly as the API returned them.
//! Reloading replays the same materialization as a live query.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use log::info;
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{GscError, Result};

/// Extension of persisted reports
pub const REPORT_EXTENSION: &str = "pck";

fn site_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[./]").expect("static pattern"))
}

/// Turn a property URL into a filename fragment.
///
/// # Examples
/// ```
/// use gsc_core::report::persistence::sanitize_site;
///
/// assert_eq!(sanitize_site("https://www.example.com/"), "https_www_example_com_");
/// assert_eq!(sanitize_site("sc-domain:example.com"), "sc-domainexample_com");
/// ```
pub fn sanitize_site(site_url: &str) -> String {
    site_separators()
        .replace_all(site_url, "_")
        .replace("__", "_")
        .replace(':', "")
}

/// `YYYYMMDD_<sanitized site>_<suffix>.pck`
pub fn default_filename(site_url: &str, suffix: &str, today: NaiveDate) -> String {
    format!(
        "{}_{}_{}.{}",
        today.format("%Y%m%d"),
        sanitize_site(site_url),
        suffix,
        REPORT_EXTENSION
    )
}

/// First path in `dir` that does not exist yet.
///
/// `name.pck` is used as is when free; otherwise `name001.pck`,
/// `name002.pck`, ... are tried in order.
pub fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };

    (1u32..)
        .map(|counter| match extension {
            Some(ext) => dir.join(format!("{}{:03}.{}", stem, counter, ext)),
            None => dir.join(format!("{}{:03}", stem, counter)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Encode a payload; structs are written as maps so optional fields survive.
pub fn encode<T: Serialize>(payload: &T) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(payload)?)
}

/// Decode a payload produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(rmp_serde::from_slice(bytes)?)
}

/// Write `bytes` under `dir`, never overwriting an existing file.
///
/// An empty `filename` is replaced by `fallback`. Returns the path written.
pub fn write_report(dir: &Path, filename: &str, fallback: &str, bytes: &[u8]) -> Result<PathBuf> {
    let name = if filename.is_empty() { fallback } else { filename };
    let path = unique_path(dir, name);

    std::fs::write(&path, bytes).map_err(|source| GscError::Storage {
        path: path.clone(),
        source,
    })?;

    info!("report saved to {}", path.display());
    Ok(path)
}

/// Read a persisted report.
pub fn read_report(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|source| GscError::Storage {
        path: path.to_path_buf(),
        source,
    })?;
    info!("report loaded from {}", path.display());
    Ok(bytes)
}

/// Current working directory, as a storage error on failure
pub(crate) fn working_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| GscError::Storage {
        path: PathBuf::from("."),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_site() {
        assert_eq!(sanitize_site("https://www.andreamoro.eu/"), "https_www_andreamoro_eu_");
        assert_eq!(sanitize_site("www.test1.com"), "www_test1_com");
    }

    #[test]
    fn test_default_filename() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            default_filename("https://www.example.com/", "query", today),
            "20240307_https_www_example_com__query.pck"
        );
    }

    #[test]
    fn test_unique_path_free_slot() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_path(dir.path(), "a.pck"), dir.path().join("a.pck"));
    }

    #[test]
    fn test_unique_path_counts_from_one() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pck"), b"x").unwrap();
        assert_eq!(unique_path(dir.path(), "a.pck"), dir.path().join("a001.pck"));

        std::fs::write(dir.path().join("a001.pck"), b"x").unwrap();
        std::fs::write(dir.path().join("a002.pck"), b"x").unwrap();
        assert_eq!(unique_path(dir.path(), "a.pck"), dir.path().join("a003.pck"));
    }

    #[test]
    fn test_unique_path_first_gap_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pck"), b"x").unwrap();
        std::fs::write(dir.path().join("a002.pck"), b"x").unwrap();
        assert_eq!(unique_path(dir.path(), "a.pck"), dir.path().join("a001.pck"));
    }

    #[test]
    fn test_write_report_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_report(dir.path(), "r.pck", "unused.pck", b"one").unwrap();
        let second = write_report(dir.path(), "r.pck", "unused.pck", b"two").unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }

    #[test]
    fn test_write_report_uses_fallback_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(dir.path(), "", "fallback.pck", b"x").unwrap();
        assert_eq!(path, dir.path().join("fallback.pck"));
    }

    #[test]
    fn test_write_report_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            write_report(&missing, "r.pck", "f.pck", b"x"),
            Err(GscError::Storage { .. })
        ));
    }

    #[test]
    fn test_read_report_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        match read_report(&dir.path().join("absent.pck")) {
            Err(GscError::Storage { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("Expected Storage error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_foreign_blob() {
        let result: Result<(String, Vec<String>)> = decode(b"not a report");
        assert!(matches!(result, Err(GscError::Deserialization(_))));
    }
}
