//! Utility functions for keyword splitting, string casing, date parameters
//! and file system checks.

use chrono::NaiveDate;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Split a comma-separated keyword string, trimming each entry and
/// dropping empties.
///
/// ```ignore
/// assert_eq!(split_keywords(" AI, ,data "), vec!["AI", "data"]);
/// ```
pub fn split_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Title-case every word: a letter is upper-cased when it follows a
/// non-letter and lower-cased otherwise.
///
/// ```ignore
/// assert_eq!(title_case("tech talks PUNE"), "Tech Talks Pune");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}

/// Format a calendar date the way Meetup's `customStartDate` /
/// `customEndDate` parameters expect: midnight with a fixed `-05:00` offset.
pub fn meetup_date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00-05:00").to_string()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a marker file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let marker_path = format!("{}/..__write_check__", path.trim_end_matches('/'));
    match stdfs::File::create(&marker_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&marker_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keywords() {
        assert_eq!(split_keywords("AI, data"), vec!["AI", "data"]);
        assert_eq!(split_keywords(" machine learning ,, ,rust"), vec!["machine learning", "rust"]);
        assert!(split_keywords(" , ").is_empty());
        assert!(split_keywords("").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("tech talks pune"), "Tech Talks Pune");
        assert_eq!(title_case("PUNE ai"), "Pune Ai");
        assert_eq!(title_case("rust2go"), "Rust2Go");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_meetup_date_param() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(meetup_date_param(date), "2025-06-10T00:00:00-05:00");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_directory() {
        let mut dir = std::env::temp_dir();
        dir.push("event_finder_writable_dir");
        let path = dir.to_string_lossy().to_string();
        ensure_writable_dir(&path).await.unwrap();
        assert!(dir.is_dir());
    }
}
