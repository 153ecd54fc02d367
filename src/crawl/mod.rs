// src/crawl/mod.rs
// =============================================================================
// This module crawls a single website and counts page visits.
//
// Submodules:
// - engine: the depth-first traversal and its bookkeeping
// - fetch: HTTP fetching and response validation
// - links: <a href> extraction from HTML
// - pages: the insertion-ordered page-count table
//
// Features:
// - Same-host restriction (other hosts are never fetched)
// - Canonical URL keys, so /a, /a/ and /a#top count as one page
// - One fetch at a time, strictly depth-first
// - A failing page stops only its own branch of the crawl
// =============================================================================

mod engine;
mod fetch;
mod links;
mod pages;

// Re-export the public API so callers can write `crawl::Crawler`
pub use engine::{BranchOutcome, CrawlError, CrawlStats, Crawler};
pub use fetch::{validate, Fetch, FetchError, HttpFetcher, PageResponse};
pub use links::extract_links;
pub use pages::{PageCount, PageCounts};
