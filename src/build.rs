//! Index building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_index()
//!     │
//!     ├── collect_pages()   ──► ordered Vec<SourcePage>
//!     │
//!     ├── scan (parallel)   ──► Vec<ScannedPage>, page order kept
//!     │
//!     ├── index_pages()     ──► SearchIndex, validated
//!     │
//!     └── write_artifact()  ──► search_index.js (skipped when unchanged)
//! ```

use crate::{
    config::SiteConfig,
    generator::search_index::{WriteOutcome, digest, index_pages, write_artifact},
    index::{IndexError, SearchIndex},
    log,
    logger::ProgressBar,
    source::{ScannedPage, collect_pages},
};
use anyhow::{Result, anyhow, bail};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Scan all sources, build the index and write the artifact.
///
/// Returns the built index so callers can reuse it without reloading.
pub fn build_index(config: &SiteConfig) -> Result<SearchIndex> {
    let sources = collect_pages(config)?;
    if sources.is_empty() {
        log!("warn"; "no markdown pages under {}", config.build.content.display());
    }
    log!("build"; "scanning {} pages", sources.len());

    let progress = ProgressBar::new_if_many("scan", sources.len());
    let has_error = AtomicBool::new(false);

    // collect() on an indexed parallel iterator keeps source order
    let scanned: Vec<ScannedPage> = sources
        .par_iter()
        .map(|source| {
            let page = source.scan().map_err(|e| {
                if !has_error.swap(true, Ordering::Relaxed) {
                    log!("error"; "{}: {:#}", source.relative.display(), e);
                }
                anyhow!("Build failed")
            });
            if let Some(progress) = &progress {
                progress.inc();
            }
            page
        })
        .collect::<Result<_>>()?;

    if let Some(progress) = &progress {
        progress.finish();
    }

    let index = SearchIndex::from_entries(index_pages(&scanned, config.build.slug.fragment));
    if let Err(err) = index.validate() {
        report_violations(&err);
        bail!(err);
    }

    let path = config.artifact_path();
    let rendered = index.to_artifact(&config.build.variable)?;
    let stats = index.stats();

    match write_artifact(&path, rendered.as_bytes())? {
        WriteOutcome::Written => log!(
            "build";
            "{} ({} pages, {} sections, {})",
            path.display(),
            stats.pages,
            stats.sections,
            digest(rendered.as_bytes())
        ),
        WriteOutcome::Unchanged => log!("build"; "{} unchanged", path.display()),
    }

    Ok(index)
}

/// Log each invariant violation on its own line.
pub fn report_violations(err: &IndexError) {
    if let IndexError::Invariant(violations) = err {
        for violation in violations {
            log!("error"; "{violation}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSource;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn project(dir: &Path) -> SiteConfig {
        let docs = dir.join("docs");
        fs::create_dir_all(docs.join("man")).unwrap();
        fs::write(
            docs.join("index.md"),
            "# Home\n\nSmall-sample corrections.\n\n## Getting Started\n\n## API\n",
        )
        .unwrap();
        fs::write(docs.join("man/estimators.md"), "# Estimators\n\n## HC2\n\n## HC3\n").unwrap();

        let mut config = SiteConfig::default();
        config.build.content = docs;
        config.build.output = dir.join("build");
        config
    }

    #[test]
    fn test_build_index_writes_artifact() {
        let dir = TempDir::new().unwrap();
        let config = project(dir.path());

        let index = build_index(&config).unwrap();
        let stats = index.stats();
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.sections, 6);

        let loaded = SearchIndex::load(&config.artifact_path()).unwrap();
        assert_eq!(loaded, index);
        assert_eq!(loaded.get(0).map(|e| e.page.as_str()), Some("Home"));
        assert_eq!(
            loaded.sections_of("Estimators").map(|e| e.location.as_str()).collect::<Vec<_>>(),
            ["man/estimators/#Estimators", "man/estimators/#HC2", "man/estimators/#HC3"]
        );
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let config = project(dir.path());

        build_index(&config).unwrap();
        let first = fs::read(config.artifact_path()).unwrap();
        build_index(&config).unwrap();
        assert_eq!(fs::read(config.artifact_path()).unwrap(), first);
    }

    #[test]
    fn test_build_with_configured_pages() {
        let dir = TempDir::new().unwrap();
        let mut config = project(dir.path());
        config.build.pages = vec![PageSource {
            name: "Reference".into(),
            file: "man/estimators.md".into(),
        }];

        let index = build_index(&config).unwrap();
        assert_eq!(index.len(), 4);
        assert!(index.iter().all(|e| e.page == "Reference"));
    }

    #[test]
    fn test_build_missing_page_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = project(dir.path());
        config.build.pages = vec![PageSource {
            name: "Gone".into(),
            file: "gone.md".into(),
        }];

        assert!(build_index(&config).is_err());
        assert!(!config.artifact_path().exists());
    }
}
