// src/crawl/pages.rs
// =============================================================================
// The page-count table built during one crawl.
//
// Keys are normalized URLs, values are how many times a link to that page
// was followed. IndexMap keeps the order in which pages were first seen,
// which is the order the run log prints them in.
// =============================================================================

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCount<'a> {
    pub url: &'a str,
    pub count: u32,
}

/// Insertion-ordered map from normalized URL to visit count.
#[derive(Debug, Default, Clone)]
pub struct PageCounts {
    counts: IndexMap<String, u32>,
}

impl PageCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<u32> {
        self.counts.get(url).copied()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.counts.contains_key(url)
    }

    /// Adds `url` with a count of 1. Returns false (and changes nothing)
    /// if the URL is already present.
    pub fn insert_new(&mut self, url: &str) -> bool {
        match self.counts.entry(url.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(1);
                true
            }
        }
    }

    /// Bumps the count of a known URL and returns the new count.
    /// Unknown URLs are left alone and yield None.
    pub fn increment(&mut self, url: &str) -> Option<u32> {
        let count = self.counts.get_mut(url)?;
        *count += 1;
        Some(*count)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Rows in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = PageCount<'_>> {
        self.counts.iter().map(|(url, &count)| PageCount { url, count })
    }

    /// Rows sorted by ascending count; ties keep first-seen order.
    pub fn sorted_by_count(&self) -> Vec<PageCount<'_>> {
        let mut rows: Vec<PageCount<'_>> = self.iter().collect();
        rows.sort_by_key(|row| row.count);
        rows
    }
}

// Serialized as a plain list of { url, count } rows, in first-seen order
impl Serialize for PageCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_increment() {
        let mut pages = PageCounts::new();
        assert!(pages.insert_new("http://dev.test/a"));
        assert!(!pages.insert_new("http://dev.test/a"));
        assert_eq!(pages.get("http://dev.test/a"), Some(1));

        assert_eq!(pages.increment("http://dev.test/a"), Some(2));
        assert_eq!(pages.get("http://dev.test/a"), Some(2));
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_increment_unknown_url() {
        let mut pages = PageCounts::new();
        assert_eq!(pages.increment("http://dev.test/missing"), None);
        assert!(pages.is_empty());
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut pages = PageCounts::new();
        for url in ["http://dev.test/c", "http://dev.test/a", "http://dev.test/b"] {
            pages.insert_new(url);
        }
        pages.increment("http://dev.test/c");

        let urls: Vec<&str> = pages.iter().map(|row| row.url).collect();
        assert_eq!(urls, vec!["http://dev.test/c", "http://dev.test/a", "http://dev.test/b"]);
    }

    #[test]
    fn test_sorted_by_count_is_stable() {
        let mut pages = PageCounts::new();
        pages.insert_new("http://dev.test/busy");
        pages.insert_new("http://dev.test/one");
        pages.insert_new("http://dev.test/two");
        pages.increment("http://dev.test/busy");
        pages.increment("http://dev.test/busy");

        let sorted: Vec<(&str, u32)> = pages
            .sorted_by_count()
            .into_iter()
            .map(|row| (row.url, row.count))
            .collect();
        assert_eq!(
            sorted,
            vec![
                ("http://dev.test/one", 1),
                ("http://dev.test/two", 1),
                ("http://dev.test/busy", 3),
            ]
        );
    }

    #[test]
    fn test_serializes_as_row_list() {
        let mut pages = PageCounts::new();
        pages.insert_new("http://dev.test/");
        let json = serde_json::to_string(&pages).unwrap();
        assert_eq!(json, r#"[{"url":"http://dev.test/","count":1}]"#);
    }
}
