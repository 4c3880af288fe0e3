// src/extract/href.rs
// =============================================================================
// This module finds href="..." references in a page and resolves them.
//
// We deliberately scan the raw text with a regex instead of building a DOM:
// - It is a best-effort heuristic, not a validating HTML parser
// - Only double-quoted references are seen (href='x' and href=x are missed)
// - A reference never spans a line break
//
// We use the `url` crate to resolve each reference against the page URL,
// exactly like a browser would:
//   base = "https://example.com/dir/page"
//   "/docs"            -> "https://example.com/docs"
//   "../up"            -> "https://example.com/up"
//   "//cdn.example/x"  -> "https://cdn.example/x"
//   "?q=1"             -> "https://example.com/dir/page?q=1"
//   "#top"             -> "https://example.com/dir/page#top"
//
// Rust concepts:
// - LazyLock: compile the regex once, on first use
// - BTreeSet: a sorted set, so duplicates collapse and output is stable
// =============================================================================

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};
use url::Url;

use crate::error::ResolutionError;

// Non-greedy capture between the quotes that follow href=
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(.*?)""#).expect("href pattern is a valid regex"));

// Extracts every link reference in `body` as an absolute URL
//
// Parameters:
//   page_url: the URL the body was fetched from (used as the base)
//   body: the page text
//
// Returns: the set of resolved URLs (possibly empty)
//
// A reference that cannot be resolved is logged and skipped, it never
// aborts the rest of the extraction.
pub fn extract_links(page_url: &Url, body: &str) -> BTreeSet<Url> {
    let mut found = BTreeSet::new();

    for capture in HREF_RE.captures_iter(body) {
        let reference = &capture[1];

        match resolve_reference(page_url, reference) {
            Ok(url) => {
                found.insert(url);
            }
            Err(e) => {
                warn!(page = %page_url, reference = %reference, error = %e, "could not resolve reference");
            }
        }
    }

    info!(url = %page_url, count = found.len(), "found links");
    found
}

// Resolves one (possibly relative) reference against the page URL
//
// Url::join handles absolute references too: if `reference` has its own
// scheme the base is ignored.
pub fn resolve_reference(base: &Url, reference: &str) -> Result<Url, ResolutionError> {
    base.join(reference).map_err(|source| ResolutionError {
        reference: reference.to_string(),
        base: base.to_string(),
        source,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `(.*?)` and not `(.*)`?
//    - `.*` is greedy: on `href="a" href="b"` it would capture `a" href="b`
//    - `.*?` stops at the first closing quote
//
// 2. What does captures_iter give us?
//    - One `Captures` per match; `capture[0]` is the whole match,
//      `capture[1]` the first parenthesised group
//
// 3. Why return a set?
//    - Pages often link the same place many times (nav bars, footers)
//    - Each (source, target) pair should be written once per page
// -----------------------------------------------------------------------------
