//! The search index: an ordered, read-only table of page and section records.
//!
//! # Lifecycle
//!
//! ```text
//! generator ──► Vec<IndexEntry> ──► SearchIndex::from_entries ──► codec::render ──► search_index.js
//!                                                                                        │
//!                      search / check ◄── &SearchIndex ◄── SearchIndex::load ◄───────────┘
//! ```
//!
//! A `SearchIndex` is built once and never mutated; regenerating the artifact
//! replaces it wholesale. Consumers borrow it.

pub mod codec;
mod validate;

pub use validate::Violation;

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt, fs,
    path::{Path, PathBuf},
    slice,
};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while loading, encoding or validating an index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed search index at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("search index schema error at {at}: {reason}")]
    Schema { at: String, reason: String },

    #[error("failed to encode search index")]
    Encode(#[from] serde_json::Error),

    #[error("search index breaks {} invariant(s)", .0.len())]
    Invariant(Vec<Violation>),
}

// ============================================================================
// Entry
// ============================================================================

/// Closed set of record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Root of a page.
    Page,
    /// A heading inside a page.
    Section,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Page, Category::Section];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Page => "page",
            Category::Section => "section",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the index.
///
/// Field order is the serialization order of the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Anchor or path of the fragment, e.g. `"api/#Estimators"`.
    pub location: String,
    /// Name of the containing page.
    pub page: String,
    pub title: String,
    /// Prose, code or reference list under the heading.
    pub text: String,
    pub category: Category,
}

impl IndexEntry {
    pub fn page(location: impl Into<String>, page: impl Into<String>, text: impl Into<String>) -> Self {
        let page = page.into();
        Self {
            location: location.into(),
            title: page.clone(),
            page,
            text: text.into(),
            category: Category::Page,
        }
    }

    pub fn section(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category: Category::Section,
        }
    }

    #[inline]
    pub fn is_page(&self) -> bool {
        self.category == Category::Page
    }

    #[inline]
    pub fn is_section(&self) -> bool {
        self.category == Category::Section
    }
}

// ============================================================================
// Store
// ============================================================================

/// Per-category counts of a loaded index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub pages: usize,
    pub sections: usize,
    /// Distinct `page` names across all records.
    pub distinct_pages: usize,
}

impl IndexStats {
    pub fn total(&self) -> usize {
        self.pages + self.sections
    }
}

/// Immutable, ordered index table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Wrap an already-ordered sequence of entries.
    pub fn from_entries(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    /// Read and parse an artifact file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let source =
            fs::read_to_string(path).map_err(|err| IndexError::Io(path.to_path_buf(), err))?;
        Self::parse(&source)
    }

    /// Parse artifact text (JS assignment or bare JSON).
    pub fn parse(source: &str) -> Result<Self, IndexError> {
        codec::parse(source).map(Self::from_entries)
    }

    /// Render the artifact text assigning the index to `variable`.
    pub fn to_artifact(&self, variable: &str) -> Result<String, IndexError> {
        codec::render(variable, &self.entries)
    }

    /// Check the data-model invariants, collecting every violation.
    pub fn validate(&self) -> Result<(), IndexError> {
        let violations = validate::check(&self.entries);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(IndexError::Invariant(violations))
        }
    }

    #[inline]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, IndexEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&IndexEntry> {
        self.entries.get(index)
    }

    /// Page-root records, in document order.
    pub fn pages(&self) -> impl Iterator<Item = &IndexEntry> {
        self.iter().filter(|e| e.is_page())
    }

    /// Section records of one page, in document order.
    pub fn sections_of<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a IndexEntry> {
        self.iter().filter(move |e| e.is_section() && e.page == page)
    }

    pub fn stats(&self) -> IndexStats {
        let pages = self.pages().count();
        let distinct_pages = self
            .iter()
            .map(|e| e.page.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        IndexStats {
            pages,
            sections: self.len() - pages,
            distinct_pages,
        }
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = &'a IndexEntry;
    type IntoIter = slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> SearchIndex {
        SearchIndex::from_entries(vec![
            IndexEntry::page("", "Home", "Small-sample corrections."),
            IndexEntry::section("#Getting-Started", "Home", "Getting Started", "using Pkg"),
            IndexEntry::section("#API", "Home", "API", "fit(model, data)"),
            IndexEntry::page("api/", "API", ""),
            IndexEntry::section("api/#Estimators", "API", "Estimators", "HC0 HC1"),
        ])
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Page.to_string(), "page");
        assert_eq!(Category::from_name("section"), Some(Category::Section));
        assert_eq!(Category::from_name("Section"), None);
        assert_eq!(Category::from_name("docstring"), None);
    }

    #[test]
    fn test_page_constructor_uses_name_as_title() {
        let entry = IndexEntry::page("", "Home", "intro");
        assert_eq!(entry.title, "Home");
        assert_eq!(entry.page, "Home");
        assert!(entry.is_page());
    }

    #[test]
    fn test_iteration_keeps_order() {
        let index = sample();
        let titles: Vec<_> = index.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Home", "Getting Started", "API", "API", "Estimators"]);

        let locations: Vec<_> = (&index).into_iter().map(|e| e.location.as_str()).collect();
        assert_eq!(locations[4], "api/#Estimators");
    }

    #[test]
    fn test_pages_and_sections_of() {
        let index = sample();
        let pages: Vec<_> = index.pages().map(|e| e.page.as_str()).collect();
        assert_eq!(pages, ["Home", "API"]);

        let home: Vec<_> = index.sections_of("Home").map(|e| e.title.as_str()).collect();
        assert_eq!(home, ["Getting Started", "API"]);
        assert_eq!(index.sections_of("Missing").count(), 0);
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.sections, 3);
        assert_eq!(stats.distinct_pages, 2);
        assert_eq!(stats.total(), 5);
        assert_eq!(SearchIndex::default().stats(), IndexStats::default());
    }

    #[test]
    fn test_get_and_len() {
        let index = sample();
        assert_eq!(index.len(), 5);
        assert!(!index.is_empty());
        assert_eq!(index.get(1).map(|e| e.title.as_str()), Some("Getting Started"));
        assert!(index.get(5).is_none());
    }

    #[test]
    fn test_load_roundtrip_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search_index.js");
        let index = sample();
        fs::write(&path, index.to_artifact("documenterSearchIndex").unwrap()).unwrap();

        assert_eq!(SearchIndex::load(&path).unwrap(), index);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SearchIndex::load(&dir.path().join("nope.js")).unwrap_err();
        assert!(matches!(err, IndexError::Io(..)));
        assert!(err.to_string().contains("nope.js"));
    }

    /// Documenter layout: a page record per content block, empty-text
    /// section records in between, all on one line.
    const DOCUMENTER_ARTIFACT: &str = r##"var documenterSearchIndex = {"docs":
[{"location":"","page":"Home","title":"Home","text":"CurrentModule = Estimators","category":"page"},{"location":"#Estimators","page":"Home","title":"Estimators","text":"","category":"section"},{"location":"","page":"Home","title":"Home","text":"Small-sample corrections for fixed effects.","category":"page"},{"location":"#Getting-Started","page":"Home","title":"Getting Started","text":"","category":"section"},{"location":"","page":"Home","title":"Home","text":"using Estimators\nm = fit(model, data)","category":"page"},{"location":"#Limitations","page":"Home","title":"Limitations","text":"","category":"section"},{"location":"","page":"Home","title":"Home","text":"Few clusters break variance estimates.","category":"page"},{"location":"#API","page":"Home","title":"API","text":"","category":"section"},{"location":"","page":"Home","title":"Home","text":"Modules = [Estimators]","category":"page"}]
}
"##;

    #[test]
    fn test_load_documenter_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search_index.js");
        fs::write(&path, DOCUMENTER_ARTIFACT).unwrap();

        let index = SearchIndex::load(&path).unwrap();
        assert!(index.validate().is_ok());
        assert_eq!(
            index.stats(),
            IndexStats { pages: 5, sections: 4, distinct_pages: 1 }
        );
        assert_eq!(index.get(4).map(|e| e.text.as_str()), Some("using Estimators\nm = fit(model, data)"));

        let sections: Vec<_> = index.sections_of("Home").map(|e| e.location.as_str()).collect();
        assert_eq!(sections, ["#Estimators", "#Getting-Started", "#Limitations", "#API"]);

        let rendered = index.to_artifact("documenterSearchIndex").unwrap();
        let reparsed = SearchIndex::parse(&rendered).unwrap();
        assert_eq!(reparsed, index);
        assert!(reparsed.validate().is_ok());
    }

    #[test]
    fn test_validate_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_all_violations() {
        let index = SearchIndex::from_entries(vec![
            IndexEntry::section("", "Home", "A", ""),
            IndexEntry::section("#B", "Home", "B", ""),
            IndexEntry::section("#B", "Home", "B", ""),
        ]);
        match index.validate() {
            Err(IndexError::Invariant(violations)) => assert_eq!(violations.len(), 2),
            other => panic!("expected invariant error, got {other:?}"),
        }
    }
}
