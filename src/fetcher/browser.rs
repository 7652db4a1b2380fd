// src/fetcher/browser.rs
// =============================================================================
// This module renders pages in a real headless Chromium browser.
//
// Why a browser instead of a plain HTTP client?
// - The target sites build their content with JavaScript at load time
// - A plain GET returns an empty shell with a <script> tag
// - A browser executes the scripts, so page.content() gives us the real DOM
//
// Rendering one page:
// 1. Navigate and wait for the navigation to finish (bounded by a timeout)
// 2. Wait for a typical content container to appear (best effort - some
//    pages just don't have one, we fall back to whatever is in <body>)
// 3. Sleep a fixed "settle" delay so client-side frameworks finish painting
// 4. Capture the HTML and extract candidate links from it
//
// The browser process is started ONCE per run via launch() and must be
// shut down with close() on every exit path, otherwise a headless Chromium
// lingers on the machine.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::fetcher::links::extract_links;
use crate::fetcher::{FetchError, Fetcher, PageResult};

// How long we give a navigation before declaring the page dead
const NAVIGATION_TIMEOUT_MS: u64 = 60_000;

// How long we wait for a content container to show up
const SELECTOR_TIMEOUT_MS: u64 = 30_000;

// Where the page content usually lives. If none of these appear we still
// capture the page - the selector wait is an optimization, not a gate.
const CONTENT_SELECTOR: &str = "main, #content, .content, article";

// How often we poll for the content selector
const SELECTOR_POLL_MS: u64 = 250;

// The user agent we present. Some sites serve a degraded page (or nothing)
// to clients that look like bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// A headless Chromium plus the single tab we reuse for every page
pub struct BrowserFetcher {
    browser: Browser,
    page: Page,
    // The task that pumps browser protocol events; it exits on its own
    // once the browser closes
    handler_task: JoinHandle<()>,
    // Extra delay after navigation so client-side rendering can finish
    settle_ms: u64,
}

impl BrowserFetcher {
    // Starts a headless Chromium and opens one blank tab
    //
    // This is the only fatal failure point of a run: if the browser can't
    // start, no page can be rendered, so the caller should abort.
    pub async fn launch(settle_ms: u64) -> Result<Self> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(|e| anyhow!(e))
            .context("invalid browser configuration")?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch headless browser (is Chromium installed?)")?;

        // chromiumoxide requires someone to drive its event stream, or
        // every page command hangs forever. The task ends when the stream
        // does, which happens when the browser closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to open a browser tab")?;
        page.set_user_agent(USER_AGENT)
            .await
            .context("failed to set user agent")?;

        Ok(Self {
            browser,
            page,
            handler_task,
            settle_ms,
        })
    }

    // Shuts the browser down
    //
    // Must be called on every exit path - success, budget exhaustion, or
    // error - so no Chromium process outlives the run.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await.context("failed to close browser")?;
        // Reap the child process, then let the handler task finish - the
        // event stream ends once the browser connection drops
        let _ = self.browser.wait().await;
        let _ = self.handler_task.await;
        Ok(())
    }

    // Waits (best effort) until the page's content container exists
    //
    // Polls instead of subscribing to DOM events: simpler, and the worst
    // case is one poll interval of extra latency.
    async fn wait_for_content(&self) {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(SELECTOR_TIMEOUT_MS);

        while tokio::time::Instant::now() < deadline {
            if self.page.find_element(CONTENT_SELECTOR).await.is_ok() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
        }

        println!("  ⚠️  No standard content selector found, using body");
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn render(&self, url: &str) -> Result<PageResult, FetchError> {
        // Navigate, bounded by the navigation timeout. goto() resolves when
        // the main document loads; wait_for_navigation() waits for the
        // network to go quiet so lazy-loaded resources get a chance too.
        let navigation = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), chromiumoxide::error::CdpError>(())
        };

        tokio::time::timeout(Duration::from_millis(NAVIGATION_TIMEOUT_MS), navigation)
            .await
            .map_err(|_| FetchError::Timeout(NAVIGATION_TIMEOUT_MS))??;

        // Give client-side frameworks time to render
        self.wait_for_content().await;
        tokio::time::sleep(Duration::from_millis(self.settle_ms)).await;

        // Capture the rendered DOM as HTML
        let html = self.page.content().await?;
        if html.is_empty() {
            return Err(FetchError::Other("browser returned an empty page".to_string()));
        }

        let links = extract_links(&html, url);

        Ok(PageResult {
            url: url.to_string(),
            html,
            links,
        })
    }
}
