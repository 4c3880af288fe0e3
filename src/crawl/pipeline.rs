// src/crawl/pipeline.rs
// =============================================================================
// The work done for a single seed URL.
//
//   Pending -> Fetching -> FetchFailed ----------------------------> Done
//                       -> Fetched -> Extracting -> Writing -------> Done
//
// Fetch strictly precedes extraction, which strictly precedes writing.
//
// Failure isolation: a fetch error is logged here, with the URL, and folded
// into `PipelineOutcome::FetchFailed`. It never reaches the orchestrator and
// never cancels other pipelines. The only error that escapes is SinkError,
// because once the output file is broken nothing else can be saved.
// =============================================================================

use reqwest::Client;
use tokio::io::AsyncWrite;
use tracing::{debug, error};

use crate::error::SinkError;
use crate::extract::extract_links;
use crate::output::ResultSink;

use super::fetch::{fetch, parse_seed};

/// How one pipeline ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The page was fetched and this many lines were written
    Written(usize),
    /// The page was fetched but contained no resolvable links
    NoLinks,
    /// The page could not be fetched; nothing was written
    FetchFailed,
}

// Runs fetch -> extract -> write for one seed
//
// Parameters:
//   client: the shared HTTP client
//   sink: the shared output file
//   seed: the seed URL exactly as it appeared in the input
pub async fn process_seed<W>(
    client: &Client,
    sink: &ResultSink<W>,
    seed: &str,
) -> Result<PipelineOutcome, SinkError>
where
    W: AsyncWrite + Unpin + Send,
{
    debug!(url = %seed, "fetching");
    let fetched = match parse_seed(seed) {
        Ok(page_url) => fetch(client, &page_url).await.map(|body| (page_url, body)),
        Err(e) => Err(e),
    };

    let (page_url, body) = match fetched {
        Ok(page) => page,
        Err(e) => {
            error!(
                url = %e.url(),
                status = ?e.status().map(|s| s.as_u16()),
                error = %e,
                "fetch failed"
            );
            return Ok(PipelineOutcome::FetchFailed);
        }
    };

    debug!(url = %seed, "extracting");
    let targets = extract_links(&page_url, &body);
    drop(body);

    if targets.is_empty() {
        debug!(url = %seed, "done, no links");
        return Ok(PipelineOutcome::NoLinks);
    }

    debug!(url = %seed, count = targets.len(), "writing");
    let written = sink.write_all(seed, &targets).await?;

    debug!(url = %seed, "done");
    Ok(PipelineOutcome::Written(written))
}
