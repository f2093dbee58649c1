//! Project initialization.
//!
//! Creates a default `docdex.toml` and a sample root page.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Sample root page written by `init`
const SAMPLE_INDEX: &str = "\
# Home

Welcome to the documentation.

## Getting Started

Describe installation and a first example here.

## API

List the public functions here.
";

/// Create a new project with default structure
pub fn new_project(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // without a name, init happens in place and must not clobber anything
    if !has_name && !is_dir_empty(root)? {
        bail!("Current directory is not empty. Use `docdex init <NAME>` to create in a subdirectory.");
    }

    let content = &config.build.content;
    if content.exists() {
        bail!(
            "Path `{}` already exists. Try `docdex init <NAME>` instead.",
            content.display()
        );
    }
    fs::create_dir_all(content).with_context(|| format!("Failed to create {}", content.display()))?;
    fs::write(content.join("index.md"), SAMPLE_INDEX)?;

    init_default_config(&config.config_path)?;
    init_ignored_files(root, &config.build.output)?;

    log!("init"; "created {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Ignore the output directory, relative to the project root
fn init_ignored_files(root: &Path, output: &Path) -> Result<()> {
    let pattern = output
        .strip_prefix(root)
        .unwrap_or(output)
        .to_string_lossy()
        .into_owned();

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, format!("/{pattern}/\n"))?;
        }
    }

    Ok(())
}
