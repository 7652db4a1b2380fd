// src/crawl/mod.rs
// =============================================================================
// This module contains the crawl core.
//
// Submodules:
// - frontier: FIFO queue of pending pages + visited-URL tracking
// - policy: Which discovered links are acceptable (domain, suffix, excludes)
// - controller: The crawl loop that ties frontier, fetcher and store together
//
// This file (mod.rs) is the module root - it re-exports the public API so
// the rest of the application can write `crawl::run_crawl(...)` without
// knowing about our internal file layout.
// =============================================================================

mod controller;
mod frontier;
mod policy;

pub use controller::{run_crawl, CrawlConfig, CrawlSummary, PageOutcome, PageRecord};
pub use policy::{ExcludeRule, LinkPolicy};

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is mod.rs?
//    - When you have a directory as a module (like src/crawl/), the
//      mod.rs file inside it is the module root
//    - It's like index.js in JavaScript or __init__.py in Python
//
// 2. Why use 'pub use'?
//    - It re-exports items from submodules
//    - Makes the API cleaner for users of this module
//    - They don't need to know about our internal organization
//
// 3. Why isn't Frontier re-exported?
//    - The frontier is an implementation detail of the controller
//    - Callers configure a crawl and read the summary; the queue in the
//      middle is nobody else's business
// -----------------------------------------------------------------------------
