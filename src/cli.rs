// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Two subcommands:
// - crawl: start from a URL and follow same-domain links breadth-first
// - snapshot: render a fixed list of URLs from a config file, no crawling
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

use crate::crawl::ExcludeRule;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "page-harvest",
    version = "0.1.0",
    about = "Render JavaScript-heavy pages in a headless browser and save the HTML to disk",
    long_about = "page-harvest drives a headless Chromium to render pages the way a real \
                  browser sees them, optionally crawls same-domain links breadth-first, and \
                  writes the rendered HTML to flat files for later offline processing."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (crawl, snapshot)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website breadth-first and save every rendered page
    ///
    /// Example: page-harvest crawl https://docs.example.com/start.html --max-depth 2
    Crawl {
        /// Start URL. Its hostname becomes the allowed domain: the crawl
        /// never leaves it (subdomains included - they don't count)
        url: String,

        /// Additional seed URLs, crawled in order after the first
        ///
        /// Repeatable: --seed URL --seed URL
        #[arg(long)]
        seed: Vec<String>,

        /// Stop after saving this many pages
        #[arg(long, default_value_t = 100)]
        max_pages: usize,

        /// Maximum link distance from a seed (seeds are depth 0)
        ///
        /// Depth 0 = just the seeds themselves
        /// Depth 1 = seeds + every page they link to
        /// etc. Pages AT the limit are saved, their links are not followed.
        #[arg(long, default_value_t = 2)]
        max_depth: usize,

        /// Directory the rendered HTML files are written to
        #[arg(long, default_value = "raw/html")]
        out_dir: String,

        /// Extra delay (milliseconds) after navigation so client-side
        /// rendering can finish before the HTML is captured
        #[arg(long, default_value_t = 2000)]
        settle_ms: u64,

        /// Path suffixes worth crawling (default: .html and .htm)
        ///
        /// Repeatable: --allow-suffix .html --allow-suffix .php
        #[arg(long)]
        allow_suffix: Vec<String>,

        /// Skip links containing PATTERN, optionally only at one depth
        ///
        /// Repeatable. "Index.html" skips everywhere; "Index.html@1" skips
        /// only links that would be enqueued at depth 1.
        #[arg(long, value_name = "PATTERN[@DEPTH]")]
        exclude: Vec<ExcludeRule>,

        /// Output the run summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render a fixed list of URLs from a JSON config file (no crawling)
    ///
    /// Example: page-harvest snapshot config/source_urls.json
    Snapshot {
        /// JSON file of the form { "urls": ["https://...", ...] }
        config_file: String,

        /// Directory the rendered HTML files are written to
        #[arg(long, default_value = "raw/html")]
        out_dir: String,

        /// Extra delay (milliseconds) after navigation so client-side
        /// rendering can finish before the HTML is captured
        #[arg(long, default_value_t = 2000)]
        settle_ms: u64,

        /// Output the run summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
