// src/crawl/run.rs
// =============================================================================
// The orchestrator.
//
// How a run works:
// 1. Create the output file and write the header
// 2. Build one HTTP client for the whole run (connection pooling)
// 3. Launch one pipeline per seed, all on this task
// 4. Wait until every pipeline has finished
// 5. Flush and close the output file
//
// Every seed occurrence gets its own pipeline. Duplicates in the input are
// fetched again unless the caller de-duplicated them first.
//
// Rust concepts:
// - buffer_unordered: poll many futures at once, yield results as they finish
// - try_collect: stop at the first Err (here: only SinkError can get that far)
// =============================================================================

use std::path::Path;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Serialize;
use tokio::io::AsyncWrite;
use tracing::info;

use crate::error::{CrawlError, SinkError};
use crate::output::ResultSink;

use super::pipeline::{process_seed, PipelineOutcome};

/// Settings that shape a run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum pipelines in flight. `None` launches every seed at once.
    pub concurrency: Option<usize>,
    /// Per-request timeout. `None` lets a hung server stall its pipeline.
    pub timeout: Option<Duration>,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: None,
            timeout: None,
            user_agent: concat!("link-harvest/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CrawlConfig {
    /// Builds the client every pipeline shares.
    pub fn build_client(&self) -> reqwest::Result<Client> {
        let mut builder = Client::builder().user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

/// Counts for one finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Seeds launched (duplicates included)
    pub seeds: usize,
    /// Seeds fetched successfully
    pub fetched: usize,
    /// Seeds that could not be fetched
    pub failed: usize,
    /// Data lines written to the output file
    pub links_written: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: PipelineOutcome) {
        match outcome {
            PipelineOutcome::Written(lines) => {
                self.fetched += 1;
                self.links_written += lines;
            }
            PipelineOutcome::NoLinks => self.fetched += 1,
            PipelineOutcome::FetchFailed => self.failed += 1,
        }
    }

    /// True when there was at least one seed and none of them could be fetched.
    pub fn all_failed(&self) -> bool {
        self.seeds > 0 && self.failed == self.seeds
    }
}

// Crawls every seed and writes the results to `output`
//
// Parameters:
//   seeds: the seed URLs, one pipeline each
//   output: path of the results file (created or truncated)
//   config: concurrency, timeout and user agent
//
// Returns: the run summary, or the error that stopped the run
// (only an unusable client or output file can do that)
pub async fn run(seeds: &[String], output: &Path, config: &CrawlConfig) -> Result<RunSummary, CrawlError> {
    let sink = ResultSink::create(output).await?;
    let client = config.build_client().map_err(CrawlError::Client)?;

    info!(seeds = seeds.len(), output = %output.display(), "starting crawl");
    let summary = crawl_and_write(&client, seeds, &sink, config.concurrency).await?;
    sink.finish().await?;

    info!(
        fetched = summary.fetched,
        failed = summary.failed,
        links = summary.links_written,
        "crawl finished"
    );
    Ok(summary)
}

// Launches all pipelines against an already prepared sink and waits for them
//
// The header must already be written. A SinkError from any pipeline stops
// the run: pipelines still in flight are dropped and the error is returned.
pub async fn crawl_and_write<W>(
    client: &Client,
    seeds: &[String],
    sink: &ResultSink<W>,
    concurrency: Option<usize>,
) -> Result<RunSummary, SinkError>
where
    W: AsyncWrite + Unpin + Send,
{
    let limit = concurrency.unwrap_or(seeds.len()).max(1);

    let pipelines = seeds.iter().map(|seed| process_seed(client, sink, seed));
    let outcomes: Vec<PipelineOutcome> = stream::iter(pipelines)
        .buffer_unordered(limit)
        .try_collect()
        .await?;

    let mut summary = RunSummary {
        seeds: seeds.len(),
        ..RunSummary::default()
    };
    for outcome in outcomes {
        summary.record(outcome);
    }
    Ok(summary)
}
