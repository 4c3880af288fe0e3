// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, to stderr)
// 2. Parse command-line arguments using clap
// 3. Load the seed URLs and crawl them
// 4. Print a summary
// 5. Exit with proper code (0 = done, 1 = every seed failed, 2 = error)
// =============================================================================

mod cli;     // src/cli.rs - command-line parsing
mod crawl;   // src/crawl/ - fetching and orchestration
mod error;   // src/error.rs - typed errors
mod extract; // src/extract/ - href extraction
mod output;  // src/output/ - the shared results file
mod seeds;   // src/seeds.rs - seed file loading

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr; RUST_LOG overrides the default "info" level
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

// Returns:
//   Ok(0) = run completed
//   Ok(1) = run completed but no seed could be fetched
//   Err   = the run could not be carried out (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.crawl_config();

    let mut seeds = seeds::load_seeds(&cli.seeds_file).await?;
    if cli.dedup {
        seeds = seeds::dedup_seeds(seeds);
    }

    println!("🔍 Crawling {} seed URL(s)", seeds.len());
    println!("📝 Writing results to {}", cli.output.display());

    let summary = crawl::run(&seeds, &cli.output, &config).await?;

    print_summary(&summary, cli.json)?;

    if summary.all_failed() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn print_summary(summary: &crawl::RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   🌐 Seeds: {}", summary.seeds);
        println!("   ✅ Fetched: {}", summary.fetched);
        println!("   ❌ Failed: {}", summary.failed);
        println!("   🔗 Links written: {}", summary.links_written);
    }
    Ok(())
}
