// src/report.rs
// =============================================================================
// This module writes the results of a crawl.
//
// Two outputs:
// - the run log: an append-only text file, one block per run
// - JSON: the same data, for scripts (printed with --json)
//
// A run-log block looks like:
//
//   start Monday, October 19, 2026, 02:03:04 PM +00:00
//   seed http://dev.test/
//   page counts
//   ===========
//
//   http://dev.test/: 1;
//   http://dev.test/a: 3;
//
//
//   sorted output
//   http://dev.test/: 1
//   http://dev.test/a: 3
//
//   stats: 2 fetched, 2 revisits, 0 failures, 0 out of scope, 0 unparsable
//
//   ============
//   exit Monday, October 19, 2026, 02:03:09 PM +00:00
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use crate::crawl::{CrawlStats, PageCounts};

/// Everything one run produced.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub seed: &'a str,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
    pub pages: &'a PageCounts,
    pub stats: &'a CrawlStats,
}

impl RunReport<'_> {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }
}

// The human-readable run-log block
impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start {}", timestamp(&self.started))?;
        writeln!(f, "seed {}", self.seed)?;
        writeln!(f, "page counts")?;
        writeln!(f, "===========")?;
        writeln!(f)?;
        for row in self.pages.iter() {
            writeln!(f, "{}: {};", row.url, row.count)?;
        }

        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "sorted output")?;
        for row in self.pages.sorted_by_count() {
            writeln!(f, "{}: {}", row.url, row.count)?;
        }

        let stats = self.stats;
        writeln!(f)?;
        writeln!(
            f,
            "stats: {} fetched, {} revisits, {} failures, {} out of scope, {} unparsable",
            stats.pages_fetched, stats.revisits, stats.failures, stats.out_of_scope, stats.unparsable
        )?;
        writeln!(f)?;
        writeln!(f, "============")?;
        writeln!(f, "exit {}", timestamp(&self.finished))?;
        writeln!(f)
    }
}

// Appends text to the run log, creating the file if needed
pub fn append_to_log(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open run log {}", path.display()))?;

    file.write_all(text.as_bytes())
        .with_context(|| format!("failed to write run log {}", path.display()))?;

    Ok(())
}

fn timestamp(time: &DateTime<Local>) -> String {
    time.format("%A, %B %-d, %Y, %I:%M:%S %p %:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_pages() -> PageCounts {
        let mut pages = PageCounts::new();
        pages.insert_new("http://dev.test/");
        pages.insert_new("http://dev.test/popular");
        pages.insert_new("http://dev.test/quiet");
        pages.increment("http://dev.test/popular");
        pages.increment("http://dev.test/popular");
        pages
    }

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, hour, 3, 4).unwrap()
    }

    #[test]
    fn test_text_block_layout() {
        let pages = sample_pages();
        let stats = CrawlStats {
            pages_fetched: 3,
            revisits: 2,
            ..CrawlStats::default()
        };
        let report = RunReport {
            seed: "http://dev.test/",
            started: at(14),
            finished: at(15),
            pages: &pages,
            stats: &stats,
        };

        let text = report.to_string();
        let expected_tables = "page counts\n\
            ===========\n\
            \n\
            http://dev.test/: 1;\n\
            http://dev.test/popular: 3;\n\
            http://dev.test/quiet: 1;\n\
            \n\
            \n\
            sorted output\n\
            http://dev.test/: 1\n\
            http://dev.test/quiet: 1\n\
            http://dev.test/popular: 3\n";

        assert!(text.starts_with("start Monday, October 19, 2026, 02:03:04 PM"));
        assert!(text.contains("seed http://dev.test/\n"));
        assert!(text.contains(expected_tables));
        assert!(text.contains("stats: 3 fetched, 2 revisits, 0 failures"));
        assert!(text.contains("============\nexit Monday, October 19, 2026, 03:03:04 PM"));
    }

    #[test]
    fn test_json_lists_pages_in_order() {
        let pages = sample_pages();
        let stats = CrawlStats::default();
        let report = RunReport {
            seed: "http://dev.test/",
            started: at(14),
            finished: at(15),
            pages: &pages,
            stats: &stats,
        };

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["seed"], "http://dev.test/");
        assert_eq!(value["pages"][1]["url"], "http://dev.test/popular");
        assert_eq!(value["pages"][1]["count"], 3);
        assert_eq!(value["stats"]["pages_fetched"], 0);
    }

    #[test]
    fn test_log_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl.log");

        append_to_log(&path, "first run\n").unwrap();
        append_to_log(&path, "second run\n").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first run\nsecond run\n");
    }

    #[test]
    fn test_report_block_appended_to_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl.log");
        let pages = sample_pages();
        let stats = CrawlStats::default();
        let report = RunReport {
            seed: "http://dev.test/",
            started: at(14),
            finished: at(15),
            pages: &pages,
            stats: &stats,
        };

        append_to_log(&path, &report.to_string()).unwrap();
        append_to_log(&path, &report.to_string()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("sorted output\n").count(), 2);
        assert_eq!(contents, format!("{}{}", report, report));
    }

    #[test]
    fn test_unwritable_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("crawl.log");
        assert!(append_to_log(&path, "x").is_err());
    }
}
