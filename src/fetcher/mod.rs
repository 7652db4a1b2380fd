// src/fetcher/mod.rs
// =============================================================================
// This module is responsible for turning a URL into rendered HTML.
//
// Submodules:
// - browser: Drives a headless Chromium to render JavaScript-heavy pages
// - links: Extracts candidate outgoing links from the rendered HTML
//
// The crawl controller only sees the `Fetcher` trait defined here. That
// keeps the controller testable (tests plug in a canned fetcher) and keeps
// all the browser plumbing in one place.
//
// Rust concepts:
// - Traits: The seam between the crawl loop and the browser
// - async-trait: Allows async methods in trait definitions
// =============================================================================

mod browser;
mod links;

pub use browser::BrowserFetcher;

use async_trait::async_trait;
use thiserror::Error;

// What we get back from rendering one page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The URL that was rendered
    pub url: String,
    /// The fully rendered HTML (after JavaScript ran)
    pub html: String,
    /// Candidate outgoing links found on the page (absolute URLs,
    /// unfiltered - the controller decides which ones to keep)
    pub links: Vec<String>,
}

// Errors a single page fetch can produce
//
// All of these are recoverable: the controller logs them, counts the page
// as failed, and moves on to the next URL. Only failing to START the
// browser aborts a run, and that happens before any fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Navigation did not finish within the allowed time
    #[error("navigation timed out after {0}ms")]
    Timeout(u64),

    /// The browser protocol reported an error (DNS failure, crash, ...)
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// Anything else worth reporting with the URL
    #[error("{0}")]
    Other(String),
}

// The rendering interface the crawl controller consumes
//
// render() must never panic and must never take the whole run down -
// every failure mode is expressed as a FetchError.
#[async_trait]
pub trait Fetcher {
    async fn render(&self, url: &str) -> Result<PageResult, FetchError>;
}
