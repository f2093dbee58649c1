//! `docdex check`: load an artifact, validate it, report statistics.

use crate::{
    build::report_violations,
    config::SiteConfig,
    index::{IndexStats, SearchIndex, codec},
    log,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Load and validate the artifact at `file` (or the configured one).
pub fn check_index(config: &SiteConfig, file: Option<&Path>) -> Result<IndexStats> {
    let path = file.map_or_else(|| config.artifact_path(), Path::to_path_buf);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read search index {}", path.display()))?;

    let index = SearchIndex::parse(&source)
        .with_context(|| format!("Failed to load search index {}", path.display()))?;

    if let Err(err) = index.validate() {
        report_violations(&err);
        bail!(err);
    }

    let stats = index.stats();
    let variable = codec::variable_name(&source).unwrap_or("(bare json)");
    log!("check"; "{}: {}", config.site.name, path.display());
    log!(
        "check";
        "{} records: {} pages, {} sections across {} page names, variable `{}`",
        stats.total(),
        stats.pages,
        stats.sections,
        stats.distinct_pages,
        variable
    );

    Ok(stats)
}
