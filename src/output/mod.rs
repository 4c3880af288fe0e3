// src/output/mod.rs
// =============================================================================
// This module owns the shared results file.
//
// Submodules:
// - sink: the tab-separated output stream shared by every pipeline
// =============================================================================

mod sink;

pub use sink::ResultSink;

#[cfg(test)]
pub(crate) use sink::{tests as sink_tests, HEADER};
