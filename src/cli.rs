// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below *is* the CLI definition, and
// clap generates the parser, --help and --version from it.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::crawl::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "link-harvest",
    version,
    about = "Fetch a list of URLs concurrently and record every link they contain",
    long_about = "link-harvest fetches every URL in SEEDS_FILE at the same time, finds each \
                  href=\"...\" on the returned pages, resolves it to an absolute URL and \
                  writes one tab-separated (source, target) line per link to the output file."
)]
pub struct Cli {
    /// Text file with one seed URL per line
    pub seeds_file: PathBuf,

    /// Where to write the results (created or truncated)
    #[arg(short, long, default_value = "found_urls.txt")]
    pub output: PathBuf,

    /// Maximum number of pages fetched at the same time (default: all of them)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds (default: no timeout)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Fetch each distinct seed only once
    #[arg(long)]
    pub dedup: bool,

    /// Print the run summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// User-Agent header to send
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,
}

impl Cli {
    /// The crawl settings selected on the command line.
    pub fn crawl_config(&self) -> CrawlConfig {
        let defaults = CrawlConfig::default();
        CrawlConfig {
            concurrency: self.concurrency,
            timeout: self.timeout.map(Duration::from_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["link-harvest", "urls.txt"]).unwrap();
        assert_eq!(cli.seeds_file, PathBuf::from("urls.txt"));
        assert_eq!(cli.output, PathBuf::from("found_urls.txt"));
        assert!(!cli.dedup);
        assert!(!cli.json);

        let config = cli.crawl_config();
        assert_eq!(config.concurrency, None);
        assert_eq!(config.timeout, None);
        assert!(config.user_agent.starts_with("link-harvest/"));
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "link-harvest",
            "urls.txt",
            "-o",
            "out.tsv",
            "--concurrency",
            "8",
            "--timeout",
            "30",
            "--dedup",
            "--json",
            "--user-agent",
            "bot/2",
        ])
        .unwrap();
        assert_eq!(cli.output, PathBuf::from("out.tsv"));
        assert!(cli.dedup);
        assert!(cli.json);

        let config = cli.crawl_config();
        assert_eq!(config.concurrency, Some(8));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.user_agent, "bot/2");
    }

    #[test]
    fn test_seeds_file_is_required() {
        assert!(Cli::try_parse_from(["link-harvest"]).is_err());
    }
}
