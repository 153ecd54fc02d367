// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (exactly one seed URL)
// 2. Crawl the seed's host, one page at a time
// 3. Append the results to the run log
// 4. Print a table (or JSON) and exit with the right code
// =============================================================================

mod cli; // src/cli.rs - command-line parsing and exit codes
mod logging; // src/logging.rs - tracing subscriber setup

use anyhow::Result;
use chrono::Local;
use page_tally::crawl::{CrawlStats, Crawler, HttpFetcher, PageCounts};
use page_tally::report::{append_to_log, RunReport};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            cli::EXIT_RUNTIME_FAILURE
        }
    };

    std::process::exit(exit_code);
}

// Returns the process exit code (see cli.rs for the meaning of each)
async fn run() -> Result<i32> {
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            e.print();
            return Ok(e.exit_code());
        }
    };

    logging::init_logging();

    let crawler = match Crawler::new(HttpFetcher::new()?, &cli.seed_url) {
        Ok(crawler) => crawler,
        Err(e) => {
            error!("{}", e);
            return Ok(cli::EXIT_BAD_ARGUMENTS);
        }
    };

    let started = Local::now();
    info!("starting at {}", crawler.seed());

    let mut pages = PageCounts::new();
    let stats = crawler.crawl(&mut pages).await;
    let finished = Local::now();

    let report = RunReport {
        seed: crawler.seed(),
        started,
        finished,
        pages: &pages,
        stats: &stats,
    };
    append_to_log(&cli.log_file, &report.to_string())?;
    info!("results appended to {}", cli.log_file.display());

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print_table(&pages, &stats);
    }

    Ok(cli::EXIT_OK)
}

// Prints pages as a human-readable table, least linked first
fn print_table(pages: &PageCounts, stats: &CrawlStats) {
    println!("{:<70} {:>6}", "PAGE", "COUNT");
    println!("{}", "=".repeat(77));

    for row in pages.sorted_by_count() {
        // Truncate long URLs on a char boundary (decoded URLs may be non-ASCII)
        let url_display = if row.url.chars().count() > 70 {
            format!("{}...", row.url.chars().take(67).collect::<String>())
        } else {
            row.url.to_string()
        };

        println!("{:<70} {:>6}", url_display, row.count);
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages: {}", pages.len());
    println!("   🌐 Fetched: {}", stats.pages_fetched);
    println!("   🔁 Revisits: {}", stats.revisits);
    println!("   ❌ Failures: {}", stats.failures);
    println!("   🚧 Skipped: {}", stats.out_of_scope + stats.unparsable);
}
