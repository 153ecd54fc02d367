// src/lib.rs
// =============================================================================
// page-tally: crawl one website and count how often each page is linked.
//
// Modules:
// - normalize: canonical URL form (the keys of the page table)
// - crawl: fetching, link extraction and the traversal itself
// - report: run log and JSON output
//
// The binary in main.rs only parses arguments and wires these together.
// =============================================================================

pub mod crawl;
pub mod normalize;
pub mod report;
