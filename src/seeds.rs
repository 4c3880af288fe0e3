// src/seeds.rs
// =============================================================================
// Loads the seed URLs from a text file.
//
// Format: one URL per line. Surrounding whitespace is trimmed and blank lines
// are ignored. Nothing else is validated here: a bad URL simply becomes a
// failed pipeline later on.
// =============================================================================

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

// Reads the seed file, keeping order and duplicates
pub async fn load_seeds(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read seed file {}", path.display()))?;

    Ok(parse_seeds(&content))
}

// Splits file content into seeds
fn parse_seeds(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// Drops repeated seeds, keeping the first occurrence of each
pub fn dedup_seeds(seeds: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    seeds
        .into_iter()
        .filter(|seed| seen.insert(seed.clone()))
        .collect()
}
