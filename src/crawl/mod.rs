// src/crawl/mod.rs
// =============================================================================
// This module runs the crawl: one fetch -> extract -> write pipeline per seed.
//
// Submodules:
// - fetch: one HTTP GET per seed over the shared client
// - pipeline: the per-seed sequence and its tagged outcome
// - run: owns the client and the output file, fans out, waits for everyone
//
// Every pipeline runs on the same task. They overlap while waiting on the
// network or the output file, but only one of them executes at a time.
// =============================================================================

mod fetch;
mod pipeline;
mod run;

#[cfg(test)]
mod test_server;

pub use run::{run, CrawlConfig, RunSummary};
