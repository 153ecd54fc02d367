// src/crawl/engine.rs
// =============================================================================
// This module walks every page of one host, depth-first.
//
// How it works:
// 1. Push the seed URL onto a stack
// 2. Pop a URL and visit it:
//    - skip it if its host differs from the seed's host
//    - normalize it; if it was seen before, bump its count and stop there
//    - otherwise record it, fetch it, and collect its links
// 3. Push the links in reverse, so the first link is popped next and its
//    whole subtree is finished before the second link is looked at
// 4. Repeat until the stack is empty
//
// That is exactly the order a recursive crawl would use, but the depth of
// the site only grows the stack (a Vec on the heap), never the call stack.
//
// Every visit ends in a BranchOutcome. Failures are values, not panics:
// one broken page stops its own branch and nothing else.
// =============================================================================

use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::fetch::{validate, Fetch, FetchError, PageResponse};
use super::links::extract_links;
use super::pages::PageCounts;
use crate::normalize::{normalize_url, NormalizeError};
use serde::Serialize;

/// The seed URL cannot start a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL '{0}' has no host")]
    MissingHost(String),

    #[error("seed URL cannot be normalized: {0}")]
    Unnormalizable(#[from] NormalizeError),
}

/// How a single visit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    /// Host differs from the seed's host; nothing was recorded.
    OutOfScope { host: Option<String> },
    /// The URL could not be parsed or normalized; nothing was recorded.
    Unparsable(NormalizeError),
    /// Already counted: count bumped, no fetch, no further links.
    Revisited { url: String, count: u32 },
    /// Recorded, but the fetch was unusable.
    Failed(FetchError),
    /// Recorded and fetched; `links` are the children still to visit.
    Expanded { url: String, links: Vec<String> },
}

/// Tally of visit outcomes for one crawl.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub revisits: usize,
    pub failures: usize,
    pub out_of_scope: usize,
    pub unparsable: usize,
    /// Largest number of links waiting on the stack at once
    pub peak_frontier: usize,
}

impl CrawlStats {
    fn record(&mut self, outcome: &BranchOutcome) {
        match outcome {
            BranchOutcome::OutOfScope { .. } => self.out_of_scope += 1,
            BranchOutcome::Unparsable(_) => self.unparsable += 1,
            BranchOutcome::Revisited { .. } => self.revisits += 1,
            BranchOutcome::Failed(_) => self.failures += 1,
            BranchOutcome::Expanded { .. } => self.pages_fetched += 1,
        }
    }
}

pub struct Crawler<F> {
    fetcher: F,
    seed: String,
    seed_host: String,
}

impl<F: Fetch> Crawler<F> {
    // Checks the seed up front: it must parse, have a host, and normalize
    pub fn new(fetcher: F, seed: &str) -> Result<Self, CrawlError> {
        let parsed = Url::parse(seed).map_err(|source| CrawlError::InvalidSeed {
            url: seed.to_string(),
            source,
        })?;
        let seed_host = parsed
            .host_str()
            .ok_or_else(|| CrawlError::MissingHost(seed.to_string()))?
            .to_string();
        normalize_url(seed)?;

        Ok(Self {
            fetcher,
            seed: seed.to_string(),
            seed_host,
        })
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    // Crawls everything reachable from the seed, filling in `pages`
    //
    // Returns: counts of how each visit ended
    pub async fn crawl(&self, pages: &mut PageCounts) -> CrawlStats {
        let mut stats = CrawlStats::default();
        let mut stack = vec![self.seed.clone()];

        while let Some(current) = stack.pop() {
            let outcome = self.visit(&current, pages).await;
            stats.record(&outcome);

            match outcome {
                BranchOutcome::Expanded { url, links } => {
                    debug!("{} has {} link(s) to follow", url, links.len());
                    // Reversed so the first link is popped first
                    stack.extend(links.into_iter().rev());
                    stats.peak_frontier = stats.peak_frontier.max(stack.len());
                }
                BranchOutcome::Revisited { url, count } => {
                    debug!("already seen {} (count now {})", url, count);
                }
                BranchOutcome::OutOfScope { host } => {
                    info!(
                        "skipping {}: host {} is outside {}",
                        current,
                        host.as_deref().unwrap_or("<none>"),
                        self.seed_host
                    );
                }
                BranchOutcome::Unparsable(e) => {
                    warn!("skipping unparsable link: {}", e);
                }
                BranchOutcome::Failed(e) => {
                    warn!("fetch failed: {}", e);
                }
            }
        }

        info!(
            "crawl of {} finished: {} page(s) fetched, {} revisit(s), {} failure(s), {} out of scope, {} unparsable",
            self.seed,
            stats.pages_fetched,
            stats.revisits,
            stats.failures,
            stats.out_of_scope,
            stats.unparsable
        );
        stats
    }

    // Visits one URL and reports how that branch ended
    pub async fn visit(&self, current: &str, pages: &mut PageCounts) -> BranchOutcome {
        // Host scope
        let parsed = match Url::parse(current) {
            Ok(url) => url,
            Err(source) => {
                return BranchOutcome::Unparsable(NormalizeError::Parse {
                    input: current.to_string(),
                    source,
                })
            }
        };
        if parsed.host_str() != Some(self.seed_host.as_str()) {
            return BranchOutcome::OutOfScope {
                host: parsed.host_str().map(str::to_string),
            };
        }

        let normalized = match normalize_url(current) {
            Ok(url) => url,
            Err(e) => return BranchOutcome::Unparsable(e),
        };

        // Revisit check; the seed itself is only counted once, on entry
        let is_seed = current == self.seed;
        if !is_seed {
            if let Some(count) = pages.increment(&normalized) {
                return BranchOutcome::Revisited {
                    url: normalized,
                    count,
                };
            }
        }
        pages.insert_new(&normalized);

        info!("crawling {}", current);

        let response = match self.fetcher.get(current).await {
            Ok(response) => response,
            Err(e) => return BranchOutcome::Failed(e),
        };
        if let Err(e) = validate(current, &response) {
            return BranchOutcome::Failed(e);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("could not read body of {}: {:#}", current, e);
                String::new()
            }
        };

        // Self-loops and links back to the seed are never followed
        let links = extract_links(&body, &self.seed)
            .into_iter()
            .filter(|link| link != current && *link != self.seed)
            .collect();

        BranchOutcome::Expanded {
            url: normalized,
            links,
        }
    }
}
