//! Term search over a loaded index.
//!
//! # Scoring
//!
//! For every distinct query term:
//! - `title_weight` if the term is a word of the title
//! - `text_weight` per occurrence in the text, at most `max_text_hits`
//!
//! An exact (case-insensitive) title match adds `title_weight` once more.
//! Zero-score records are dropped; equal scores keep document order.

use crate::{
    config::{SearchConfig, SiteConfig},
    index::{IndexEntry, SearchIndex},
    log,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Ellipsis marking a cut snippet edge
const ELLIPSIS: char = '…';

/// One ranked match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit<'a> {
    pub entry: &'a IndexEntry,
    /// Position of the record in the index.
    pub position: usize,
    pub score: u32,
    pub snippet: String,
}

/// Rank `index` records against `query`.
pub fn search<'a>(index: &'a SearchIndex, query: &str, options: &SearchConfig) -> Vec<Hit<'a>> {
    let mut terms: Vec<String> = Vec::new();
    for term in tokenize(query) {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    if terms.is_empty() {
        return Vec::new();
    }
    let exact = query.trim().to_lowercase();

    let mut hits: Vec<Hit<'a>> = index
        .iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            let score = rank(entry, &terms, &exact, options);
            (score > 0).then(|| Hit {
                entry,
                position,
                score,
                snippet: snippet(&entry.text, &terms, options.snippet_len),
            })
        })
        .collect();

    // stable sort: ties stay in document order
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(options.limit);
    hits
}

fn rank(entry: &IndexEntry, terms: &[String], exact: &str, options: &SearchConfig) -> u32 {
    let title_words: Vec<String> = tokenize(&entry.title).collect();
    let text_words: Vec<String> = tokenize(&entry.text).collect();

    // weights come from user config; scores saturate instead of wrapping
    let mut score: u32 = 0;
    for term in terms {
        if title_words.contains(term) {
            score = score.saturating_add(options.title_weight);
        }
        let occurrences = text_words.iter().filter(|w| *w == term).count();
        let counted = u32::try_from(occurrences).unwrap_or(u32::MAX).min(options.max_text_hits);
        score = score.saturating_add(counted.saturating_mul(options.text_weight));
    }

    if entry.title.trim().to_lowercase() == exact {
        score = score.saturating_add(options.title_weight);
    }
    score
}

/// Lowercase alphanumeric words.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Up to `len` characters of `text` around the first term occurrence,
/// on one line.
fn snippet(text: &str, terms: &[String], len: usize) -> String {
    let chars: Vec<char> = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if chars.len() <= len {
        return chars.into_iter().collect::<String>().trim().to_owned();
    }

    let anchor = first_match(&chars, terms).unwrap_or(0);
    let start = anchor.saturating_sub(len / 4).min(chars.len() - len);
    let end = start + len;

    let mut out = String::with_capacity(len + 2);
    if start > 0 {
        out.push(ELLIPSIS);
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push(ELLIPSIS);
    }
    out
}

/// Char index of the first case-insensitive occurrence of any term.
fn first_match(chars: &[char], terms: &[String]) -> Option<usize> {
    let lowered: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    terms
        .iter()
        .filter_map(|term| {
            let needle: Vec<char> = term.chars().collect();
            lowered.windows(needle.len()).position(|w| w == needle.as_slice())
        })
        .min()
}

// ============================================================================
// Command
// ============================================================================

/// Load the artifact and print the ranked hits for `query`.
pub fn search_index(config: &SiteConfig, query: &str, file: Option<&Path>) -> Result<usize> {
    let path = file.map_or_else(|| config.artifact_path(), Path::to_path_buf);
    let index = SearchIndex::load(&path)
        .with_context(|| format!("Failed to load search index {}", path.display()))?;

    let hits = search(&index, query, &config.search);
    if hits.is_empty() {
        log!("search"; "no matches for `{query}`");
        return Ok(0);
    }

    for hit in &hits {
        let location = if hit.entry.location.is_empty() {
            "/"
        } else {
            hit.entry.location.as_str()
        };
        log!("search"; "{:>4}  {}  {} ({})", hit.score, hit.entry.title, location, hit.entry.page);
        if !hit.snippet.is_empty() {
            log!("search"; "      {}", hit.snippet);
        }
    }
    Ok(hits.len())
}

// ============================================================================
// Tests
// ============================================================================
