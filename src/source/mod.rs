//! Documentation sources.
//!
//! Resolves which Markdown files make up the site, in which order, and reads
//! each into a [`ScannedPage`].
//!
//! # Page order
//!
//! - `[[build.pages]]` given: exactly those files, in config order.
//! - otherwise: every `.md` under the content directory, root `index.md`
//!   first, then by relative path.

pub mod markdown;

use crate::config::SiteConfig;
use crate::utils::slug::page_location;
use anyhow::{Context, Result, anyhow};
use markdown::Document;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Extension of documentation sources
const SOURCE_EXT: &str = "md";

/// Root page file name
const ROOT_INDEX: &str = "index.md";

/// A source file selected for indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    /// Name from `[[build.pages]]`; `None` for discovered pages.
    pub name: Option<String>,
    /// Absolute path of the Markdown file.
    pub path: PathBuf,
    /// Path relative to the content directory.
    pub relative: PathBuf,
}

/// A source page read and split into its outline.
#[derive(Debug, Clone)]
pub struct ScannedPage {
    /// Display name (`page` field of every record of this page).
    pub name: String,
    /// Location of the page root, e.g. `""` or `"api/"`.
    pub location: String,
    pub document: Document,
}

impl SourcePage {
    fn from_relative(content_dir: &Path, relative: PathBuf, name: Option<String>) -> Self {
        Self {
            name,
            path: content_dir.join(&relative),
            relative,
        }
    }

    /// Read and scan the file.
    pub fn scan(&self) -> Result<ScannedPage> {
        let source = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let document = markdown::scan(&source);
        let name = self.display_name(&document);

        Ok(ScannedPage {
            name,
            location: page_location(&self.relative),
            document,
        })
    }

    /// Configured name, else first heading, else file stem.
    fn display_name(&self, document: &Document) -> String {
        self.name
            .clone()
            .or_else(|| {
                document
                    .sections
                    .first()
                    .map(|s| s.title.clone())
                    .filter(|t| !t.is_empty())
            })
            .unwrap_or_else(|| {
                self.relative
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
    }
}

/// Resolve the ordered list of pages to index.
pub fn collect_pages(config: &SiteConfig) -> Result<Vec<SourcePage>> {
    let content_dir = &config.build.content;

    if !config.build.pages.is_empty() {
        return Ok(config
            .build
            .pages
            .iter()
            .map(|page| SourcePage::from_relative(content_dir, page.file.clone(), Some(page.name.clone())))
            .collect());
    }

    let mut relatives = discover(content_dir)?;
    relatives.sort_by(|a, b| {
        let a_root = a == Path::new(ROOT_INDEX);
        let b_root = b == Path::new(ROOT_INDEX);
        b_root.cmp(&a_root).then_with(|| a.cmp(b))
    });

    Ok(relatives
        .into_iter()
        .map(|relative| SourcePage::from_relative(content_dir, relative, None))
        .collect())
}

/// All `.md` files under `dir`, relative to it. Hidden entries are skipped.
fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let walker = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file()
            || entry.path().extension().is_none_or(|ext| ext != SOURCE_EXT)
        {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|_| anyhow!("File is not in content directory: {}", entry.path().display()))?;
        found.push(relative.to_path_buf());
    }

    Ok(found)
}
