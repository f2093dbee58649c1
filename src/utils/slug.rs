//! Anchor slugs and page locations.
//!
//! Turns heading text into URL fragments and source paths into the page part
//! of an index `location`.

use crate::config::SlugMode;
use std::{collections::HashSet, path::Path};

/// Characters forbidden in paths and fragments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '(', ')', '[', ']', '{', '}', '"', '\'', '`', '%',
];

/// Slug used when a heading has no usable characters
const FALLBACK_SLUG: &str = "section";

// ============================================================================
// Slugification
// ============================================================================

/// Convert heading text to a fragment according to `mode`.
pub fn slugify_fragment(text: &str, mode: SlugMode) -> String {
    match mode {
        SlugMode::Safe => sanitize_text(text),
        SlugMode::On => ascii_slug(text),
        SlugMode::No => text.trim().to_owned(),
    }
}

/// Drop forbidden characters and join whitespace-separated words with `-`.
///
/// `"Mathematical details (HC2)"` → `"Mathematical-details-HC2"`
fn sanitize_text(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Transliterate to lowercase ASCII words joined by `-`.
///
/// `"Über die Schätzer"` → `"uber-die-schatzer"`
fn ascii_slug(text: &str) -> String {
    deunicode::deunicode(text)
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

// ============================================================================
// Per-page anchor registry
// ============================================================================

/// Hands out unique anchors within one page.
///
/// Repeated slugs get `-1`, `-2`, … suffixes; empty slugs fall back to
/// `section`.
#[derive(Debug, Default)]
pub struct Anchors {
    taken: HashSet<String>,
}

impl Anchors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an anchor derived from `slug`.
    pub fn claim(&mut self, slug: String) -> String {
        let base = if slug.is_empty() { FALLBACK_SLUG.to_owned() } else { slug };

        let mut candidate = base.clone();
        let mut n = 0;
        while self.taken.contains(&candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

// ============================================================================
// Page locations
// ============================================================================

/// Location of a page root, from its path relative to the content directory.
///
/// | Source | location |
/// |--------|----------|
/// | `index.md` | `""` |
/// | `api.md` | `"api/"` |
/// | `guide/index.md` | `"guide/"` |
/// | `guide/first steps.md` | `"guide/first-steps/"` |
pub fn page_location(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let mut parts: Vec<String> = stem
        .components()
        .map(|c| sanitize_text(&c.as_os_str().to_string_lossy()))
        .filter(|part| !part.is_empty())
        .collect();

    if parts.last().is_some_and(|last| last == "index") {
        parts.pop();
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("{}/", parts.join("/"))
    }
}
