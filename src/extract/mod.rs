// src/extract/mod.rs
// =============================================================================
// This module pulls hyperlinks out of fetched page text.
//
// Submodules:
// - href: scans for href="..." and resolves each reference to an absolute URL
//
// Extraction is pure computation: no network, no file access, no await.
// =============================================================================

mod href;

pub use href::extract_links;
