//! Help Center article-view counts from an exported Zendesk Explore CSV.
//!
//! Explore cannot be queried for this number directly, so the report is
//! scheduled to export a CSV and we read the file from disk. The numeric
//! column is named inconsistently between dashboards ("Count", "Views",
//! "Count (Articles viewed)"), so every column whose header mentions
//! views or counts is summed.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where the weekly Help Center view count comes from.
pub trait ViewsSource {
    /// Total article views for the reporting week, or `None` when the
    /// source has nothing usable.
    fn weekly_views(&self) -> Option<u64>;
}

/// Reads the view count out of a CSV file on disk.
pub struct CsvViews {
    path: PathBuf,
}

impl CsvViews {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvViews { path: path.into() }
    }
}

impl ViewsSource for CsvViews {
    fn weekly_views(&self) -> Option<u64> {
        match read_views_csv(&self.path) {
            Ok(views) => Some(views),
            Err(e) => {
                log::warn!(
                    "Skipping Help Center views from {}: {e}",
                    self.path.display()
                );
                None
            }
        }
    }
}

fn read_views_csv(path: &Path) -> Result<u64> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Views(format!("{}: {e}", path.display())))?;
    parse_views_csv(&content)
}

/// Sum every cell in columns whose header mentions views or counts.
/// Cells that do not parse as numbers are skipped; Explore mixes blank
/// rows and subtotal labels into its exports.
pub fn parse_views_csv(content: &str) -> Result<u64> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let wanted: Vec<usize> = reader
        .headers()
        .map_err(|e| Error::Views(format!("bad CSV header: {e}")))?
        .iter()
        .enumerate()
        .filter(|(_, header)| {
            let header = header.to_lowercase();
            header.contains("count") || header.contains("view")
        })
        .map(|(i, _)| i)
        .collect();
    if wanted.is_empty() {
        return Err(Error::Views("no view or count column found".to_string()));
    }

    let mut total = 0u64;
    for record in reader.records() {
        let record = record.map_err(|e| Error::Views(format!("bad CSV row: {e}")))?;
        for &i in &wanted {
            if let Some(cell) = record.get(i) {
                if let Ok(value) = cell.trim().parse::<f64>() {
                    total += value as u64;
                }
            }
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sums_count_column() {
        let csv = "Article title,Count\nGetting started,120\nFAQ,35\n";
        assert_eq!(parse_views_csv(csv).unwrap(), 155);
    }

    #[test]
    fn test_matches_view_headers_case_insensitively() {
        let csv = "Article,Views (articles viewed)\nA,10\nB,2\n";
        assert_eq!(parse_views_csv(csv).unwrap(), 12);
    }

    #[test]
    fn test_skips_cells_that_are_not_numbers() {
        let csv = "Article,Count\nA,10\nSubtotal,-\nB,5\n";
        assert_eq!(parse_views_csv(csv).unwrap(), 15);
    }

    #[test]
    fn test_truncates_decimal_exports() {
        let csv = "Article,Count\nA,10.0\nB,2.9\n";
        assert_eq!(parse_views_csv(csv).unwrap(), 12);
    }

    #[test]
    fn test_rejects_csv_without_a_usable_column() {
        let csv = "Article,Author\nA,Jo\n";
        assert!(parse_views_csv(csv).is_err());
    }

    #[test]
    fn test_csv_views_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard_auto.csv");
        std::fs::write(&path, "Article title,Count\nGetting started,7\n").unwrap();

        let source = CsvViews::new(&path);
        assert_eq!(source.weekly_views(), Some(7));
    }

    #[test]
    fn test_csv_views_missing_file_is_none() {
        let source = CsvViews::new("/nonexistent/report.csv");
        assert_eq!(source.weekly_views(), None);
    }
}
