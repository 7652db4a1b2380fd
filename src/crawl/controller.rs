// src/crawl/controller.rs
// =============================================================================
// This module implements the crawl loop itself.
//
// How it works:
// 1. Seed the frontier with the configured start URLs at depth 0
// 2. Pop the next URL (skipping any we already visited)
// 3. Render it in the fetcher; save the HTML through the store
// 4. If we're not at max depth yet, filter the discovered links and push
//    the accepted ones at depth + 1
// 5. Repeat until the frontier is empty or the page budget is reached
//
// Failure semantics:
// - A fetch or save failure is logged, counted, and the crawl moves on
// - A malformed discovered link is silently dropped (not a failure)
// - NOTHING a single page does can abort the run
//
// The controller is generic over the Fetcher and Store traits, so the
// tests below run the full loop against canned pages with no browser and
// no disk.
// =============================================================================

use anyhow::{anyhow, Result};
use serde::Serialize;
use url::Url;

use crate::crawl::frontier::{Frontier, FrontierEntry};
use crate::crawl::policy::{is_fetchable_scheme, is_same_domain, LinkPolicy};
use crate::fetcher::Fetcher;
use crate::store::{safe_identifier, Store};

// Configuration for one crawl run
//
// Built once, never mutated. The allowed domain is always derived from
// the first seed - it is deliberately not configurable on its own.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Start URLs, crawled in order (all at depth 0)
    pub seeds: Vec<String>,
    /// Hard cap on the number of pages SAVED (failures don't count)
    pub max_pages: usize,
    /// How many link hops from a seed we will expand
    pub max_depth: usize,
    /// Hostname of the first seed; all crawled links must match it exactly
    pub allowed_domain: String,
    /// Which discovered links are acceptable
    pub policy: LinkPolicy,
}

impl CrawlConfig {
    // Builds a config, deriving the allowed domain from the first seed
    //
    // Fails if there are no seeds or the first seed has no usable hostname
    pub fn new(
        seeds: Vec<String>,
        max_pages: usize,
        max_depth: usize,
        policy: LinkPolicy,
    ) -> Result<Self> {
        let first = seeds
            .first()
            .ok_or_else(|| anyhow!("at least one seed URL is required"))?;

        let parsed = Url::parse(first).map_err(|e| anyhow!("invalid seed URL '{}': {}", first, e))?;

        let allowed_domain = parsed
            .host_str()
            .ok_or_else(|| anyhow!("seed URL has no hostname: {}", first))?
            .to_string();

        Ok(Self {
            seeds,
            max_pages,
            max_depth,
            allowed_domain,
            policy,
        })
    }
}

// What happened to one page we tried to crawl
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Rendered and written to disk
    Saved { file: String },
    /// Fetch or save failed; the reason is human-readable
    Failed { reason: String },
}

// One row of the final report
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub depth: usize,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

impl PageRecord {
    /// Helper method to check if the page was saved
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, PageOutcome::Saved { .. })
    }
}

// The result of a whole crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub pages_saved: usize,
    pub pages_failed: usize,
    pub pages: Vec<PageRecord>,
}

// Runs a complete crawl
//
// Parameters:
//   config: seeds, limits and link policy for this run
//   fetcher: renders URLs to HTML (the browser in production)
//   store: persists rendered HTML (flat files in production)
//
// Returns: a CrawlSummary - per-URL failures never bubble up, they only
// show in the counts and records.
pub async fn run_crawl<F, S>(config: &CrawlConfig, fetcher: &F, store: &S) -> CrawlSummary
where
    F: Fetcher + Sync,
    S: Store + Sync,
{
    let mut frontier = Frontier::new();
    let mut summary = CrawlSummary {
        pages_saved: 0,
        pages_failed: 0,
        pages: Vec::new(),
    };

    // Seed the frontier in configuration order
    for seed in &config.seeds {
        frontier.push(FrontierEntry {
            url: seed.clone(),
            depth: 0,
        });
    }

    // Drain the frontier until it's empty or the budget is spent
    while summary.pages_saved < config.max_pages {
        let Some(entry) = frontier.pop() else {
            break;
        };

        // Collapse duplicate enqueues: a URL is processed at most once.
        // A skipped duplicate costs nothing against the budget.
        if frontier.is_visited(&entry.url) {
            continue;
        }
        frontier.mark_visited(&entry.url);

        println!("  Crawling [depth {}]: {}", entry.depth, entry.url);

        // Render the page; a failure here is recorded and the loop goes on
        let page = match fetcher.render(&entry.url).await {
            Ok(page) => page,
            Err(e) => {
                eprintln!("  Warning: Failed to fetch {}: {}", entry.url, e);
                summary.pages_failed += 1;
                summary.pages.push(PageRecord {
                    url: entry.url,
                    depth: entry.depth,
                    outcome: PageOutcome::Failed { reason: e.to_string() },
                });
                continue;
            }
        };

        // Persist the rendered HTML. A write failure also just counts
        // as a failed page - the crawl keeps going.
        let identifier = safe_identifier(&entry.url);
        if let Err(e) = store.save(&identifier, &page.html).await {
            eprintln!("  Warning: Failed to save {}: {}", entry.url, e);
            summary.pages_failed += 1;
            summary.pages.push(PageRecord {
                url: entry.url,
                depth: entry.depth,
                outcome: PageOutcome::Failed { reason: e.to_string() },
            });
            continue;
        }

        summary.pages_saved += 1;
        summary.pages.push(PageRecord {
            url: entry.url.clone(),
            depth: entry.depth,
            outcome: PageOutcome::Saved { file: identifier },
        });

        // Only expand links if this page is above the depth limit.
        // A page AT max depth still gets fetched and saved (we just did),
        // but its links are not explored.
        if entry.depth < config.max_depth {
            let next_depth = entry.depth + 1;
            for link in &page.links {
                if accept_link(link, next_depth, config, &frontier) {
                    frontier.push(FrontierEntry {
                        url: link.clone(),
                        depth: next_depth,
                    });
                }
            }
        }
    }

    summary
}

// Applies every acceptance check to one discovered link
//
// Malformed URLs return false without any logging - a page full of odd
// hrefs is normal, not an error condition.
fn accept_link(link: &str, depth: usize, config: &CrawlConfig, frontier: &Frontier) -> bool {
    let Ok(parsed) = Url::parse(link) else {
        return false;
    };

    is_fetchable_scheme(&parsed)
        && is_same_domain(&parsed, &config.allowed_domain)
        && !frontier.is_visited(link)
        && config.policy.accepts(&parsed, depth)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is run_crawl generic over Fetcher and Store?
//    - The production fetcher is a whole headless browser - slow and
//      non-deterministic, terrible for tests
//    - Generics let the tests below run the REAL loop against canned
//      pages and an in-memory store, with zero test-only code paths here
//
// 2. What is `let Some(entry) = frontier.pop() else { break; }`?
//    - A let-else: bind the pattern or run the else block
//    - Here it means "stop the loop when the frontier runs dry"
//
// 3. Why mark visited at pop time instead of push time?
//    - Two pages can discover the same link before either copy is popped
//    - Marking at push time would need a second "seen" set; marking at
//      pop time lets the queue hold duplicates and still fetch once
//
// 4. Why doesn't a failed page count against max_pages?
//    - The budget caps pages SAVED, because that's what costs disk and
//      downstream processing time
//    - A site with a flaky page shouldn't deliver fewer good pages
//
// 5. What is `matches!`?
//    - A macro that tests whether a value fits a pattern
//    - `matches!(x, PageOutcome::Saved { .. })` is shorthand for a match
//      returning true/false
// -----------------------------------------------------------------------------
