// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the crawl configuration for the chosen subcommand
// 3. Open the output store, launch the headless browser, run the crawl
// 4. Shut the browser down (on EVERY path - no zombie Chromium processes)
// 5. Print the summary and exit with a proper code
//
// Exit codes:
//   0 = every attempted page was saved
//   1 = at least one page failed (the run itself still completed)
//   2 = fatal error (bad arguments, browser would not start, ...)
//
// Rust concepts used:
// - async/await: The browser protocol and file writes are asynchronous
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - frontier, link policy, crawl loop
mod fetcher; // src/fetcher/ - headless browser rendering
mod store; // src/store/ - writing rendered HTML to disk

use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};
use crawl::{CrawlConfig, CrawlSummary, ExcludeRule, LinkPolicy, PageOutcome};
use fetcher::BrowserFetcher;
use serde::Deserialize;
use store::DiskStore;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = all pages saved
//   Ok(1) = some pages failed
//   Err = fatal error (mapped to exit code 2 in main)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let args = Cli::parse();

    match args.command {
        Commands::Crawl {
            url,
            seed,
            max_pages,
            max_depth,
            out_dir,
            settle_ms,
            allow_suffix,
            exclude,
            json,
        } => {
            // The positional URL is the first seed; --seed adds more
            let mut seeds = vec![url];
            seeds.extend(seed);

            let policy = build_policy(allow_suffix, exclude);
            let config = CrawlConfig::new(seeds, max_pages, max_depth, policy)?;

            println!("🔍 Crawling: {}", config.seeds[0]);
            println!("🌐 Allowed domain: {}", config.allowed_domain);
            println!("📊 Max pages: {}, max depth: {}", max_pages, max_depth);

            let summary = harvest(&config, &out_dir, settle_ms).await?;
            report(&summary, json)
        }
        Commands::Snapshot {
            config_file,
            out_dir,
            settle_ms,
            json,
        } => {
            let urls = read_snapshot_urls(&config_file)?;

            println!("📄 Snapshotting {} URL(s) from {}", urls.len(), config_file);

            // A snapshot is just a crawl that never expands: every URL is
            // a seed, depth 0, budget = the whole list
            let max_pages = urls.len();
            let config = CrawlConfig::new(urls, max_pages, 0, LinkPolicy::default())?;

            let summary = harvest(&config, &out_dir, settle_ms).await?;
            report(&summary, json)
        }
    }
}

// Opens the store, launches the browser, runs the crawl, closes the browser
//
// run_crawl cannot fail (per-page errors live in the summary), so once the
// browser is up the shutdown below runs no matter how the crawl went.
async fn harvest(config: &CrawlConfig, out_dir: &str, settle_ms: u64) -> Result<CrawlSummary> {
    // The store first: if the output directory can't be created there is
    // no point starting a browser
    let store = DiskStore::new(out_dir)
        .await
        .context("could not prepare the output directory")?;

    let browser = BrowserFetcher::launch(settle_ms)
        .await
        .context("could not start the rendering browser")?;

    // run_crawl never fails - per-page errors end up in the summary
    let summary = crawl::run_crawl(config, &browser, &store).await;

    browser.close().await?;

    Ok(summary)
}

// The shape of a snapshot config file: { "urls": [...] }
#[derive(Debug, Deserialize)]
struct SnapshotConfig {
    urls: Vec<String>,
}

// Reads the list of URLs to snapshot from a JSON file
fn read_snapshot_urls(path: &str) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path))?;
    let config: SnapshotConfig = serde_json::from_str(&content)
        .with_context(|| format!("invalid snapshot config in {}", path))?;

    if config.urls.is_empty() {
        anyhow::bail!("config file {} lists no URLs", path);
    }
    Ok(config.urls)
}

// Turns the CLI's policy flags into a LinkPolicy
fn build_policy(allow_suffix: Vec<String>, exclude: Vec<ExcludeRule>) -> LinkPolicy {
    let mut policy = LinkPolicy::default();
    if !allow_suffix.is_empty() {
        policy.allowed_suffixes = allow_suffix;
    }
    policy.exclusions = exclude;
    policy
}

// Prints the summary and picks the exit code
fn report(summary: &CrawlSummary, json: bool) -> Result<i32> {
    if json {
        // Serialize the summary to JSON and print
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        print_table(summary);
    }

    if summary.pages_failed > 0 {
        Ok(1) // Exit code 1 = some pages failed
    } else {
        Ok(0) // Exit code 0 = all good
    }
}

// Prints the run as a human-readable table in the terminal
fn print_table(summary: &CrawlSummary) {
    println!();
    println!("{:<60} {:<12} {:<30}", "URL", "OUTCOME", "DETAIL");
    println!("{}", "=".repeat(102));

    for record in &summary.pages {
        let (outcome, detail) = match &record.outcome {
            PageOutcome::Saved { file } => ("✅ SAVED", file.as_str()),
            PageOutcome::Failed { reason } => ("❌ FAILED", reason.as_str()),
        };

        let url_display = truncate_for_display(&record.url, 57);

        println!("{:<60} {:<12} {:<30}", url_display, outcome, detail);
    }

    println!();

    // Print summary counts
    println!("📊 Summary:");
    println!("   ✅ Saved: {}", summary.pages_saved);
    println!("   ❌ Failed: {}", summary.pages_failed);
    println!("   📋 Total: {}", summary.pages.len());
}

// Shortens a URL to at most `max_chars` characters for table display
//
// Counts CHARACTERS, not bytes: slicing a &str at a fixed byte index
// panics when the index lands inside a multi-byte UTF-8 character, and
// URLs can carry non-ASCII in paths and query strings.
fn truncate_for_display(url: &str, max_chars: usize) -> String {
    match url.char_indices().nth(max_chars) {
        // The URL has more than max_chars characters: cut at the byte
        // offset where character number max_chars begins
        Some((byte_index, _)) => format!("{}...", &url[..byte_index]),
        // Short enough already
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_url_unchanged() {
        assert_eq!(
            truncate_for_display("https://x.test/a.html", 57),
            "https://x.test/a.html"
        );
    }

    #[test]
    fn test_truncate_long_ascii_url() {
        let url = format!("https://x.test/{}", "a".repeat(100));
        let display = truncate_for_display(&url, 57);
        assert_eq!(display.chars().count(), 60); // 57 chars + "..."
        assert!(display.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte_url_does_not_panic() {
        // A URL whose 57th byte falls inside a multi-byte character -
        // byte slicing would panic here, character counting must not
        let url = format!("https://x.test/a{}", "ü".repeat(60));
        let display = truncate_for_display(&url, 57);
        assert!(display.ends_with("..."));
        assert_eq!(display.chars().count(), 60);
    }
}
