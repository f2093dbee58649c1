//! Search-index generation.
//!
//! Maps scanned pages to index records and writes the artifact.
//!
//! # Record layout per page
//!
//! ```text
//! api.md                      location           category
//! ───────────────────────     ─────────────────  ────────
//! (page root)                 "api/"             page
//! # Reference                 "api/#Reference"   section
//! ## Estimators               "api/#Estimators"  section
//! ## Estimators               "api/#Estimators-1" section
//! ```

use crate::{
    config::SlugMode,
    index::IndexEntry,
    source::ScannedPage,
    utils::slug::{Anchors, slugify_fragment},
};
use anyhow::{Context, Result};
use std::{collections::HashSet, fs, path::Path};

/// Whether writing the artifact touched the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Existing file already had identical content.
    Unchanged,
}

/// Build the ordered record list for `pages`.
///
/// Yields one page record per page followed by one section record per
/// heading, so `len == pages + headings`.
pub fn index_pages(pages: &[ScannedPage], slug_mode: SlugMode) -> Vec<IndexEntry> {
    let capacity = pages.iter().map(|p| 1 + p.document.sections.len()).sum();
    let mut entries = Vec::with_capacity(capacity);
    let mut names = HashSet::new();

    for page in pages {
        let name = unique_page_name(&mut names, page);
        page_entries(page, &name, slug_mode, &mut entries);
    }

    entries
}

/// Two discovered pages may share a first heading; qualify the later one
/// with its location, then a counter, until the name is free.
fn unique_page_name(names: &mut HashSet<String>, page: &ScannedPage) -> String {
    let mut name = page.name.clone();
    let mut n = 1;
    while names.contains(&name) {
        name = match n {
            1 => format!("{} ({})", page.name, page.location),
            _ => format!("{} ({}, {n})", page.name, page.location),
        };
        n += 1;
    }
    names.insert(name.clone());
    name
}

fn page_entries(page: &ScannedPage, name: &str, slug_mode: SlugMode, out: &mut Vec<IndexEntry>) {
    out.push(IndexEntry::page(&page.location, name, &page.document.preamble));

    let mut anchors = Anchors::new();
    for section in &page.document.sections {
        let anchor = anchors.claim(slugify_fragment(&section.title, slug_mode));
        out.push(IndexEntry::section(
            format!("{}#{anchor}", page.location),
            name,
            &section.title,
            &section.text,
        ));
    }
}

/// Short content digest for log lines.
pub fn digest(content: &[u8]) -> String {
    hex::encode(&blake3::hash(content).as_bytes()[..8])
}

/// Write rendered artifact bytes to `path` unless the file already holds
/// the same content.
pub fn write_artifact(path: &Path, content: &[u8]) -> Result<WriteOutcome> {
    if is_fresh(path, content) {
        return Ok(WriteOutcome::Unchanged);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write search index to {}", path.display()))?;

    Ok(WriteOutcome::Written)
}

/// Content-based freshness check against the file on disk.
fn is_fresh(path: &Path, content: &[u8]) -> bool {
    fs::read(path).is_ok_and(|existing| blake3::hash(&existing) == blake3::hash(content))
}

// ============================================================================
// Tests
// ============================================================================
