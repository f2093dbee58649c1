//! Configuration management for `docdex.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[site]`   | Documentation site metadata                    |
//! | `[build]`  | Source/output paths, artifact naming, pages    |
//! | `[search]` | Ranking knobs for `docdex search`              |
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "StatsPackage.jl"
//!
//! [build]
//! content = "docs"
//! output = "build"
//!
//! [build.slug]
//! fragment = "safe"
//!
//! [search]
//! limit = 10
//! ```

mod build;
pub mod defaults;
mod error;
mod search;
mod site;

pub use build::{BuildConfig, PageSource, SlugMode};
pub use error::ConfigError;
pub use search::SearchConfig;
pub use site::SiteMeta;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing docdex.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteMeta,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Full path of the generated artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.build.output.join(&self.build.artifact)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);

        match &cli.command {
            Commands::Build { variable } => {
                Self::update_option(&mut self.build.variable, variable.as_ref());
            }
            Commands::Search { limit, .. } => {
                Self::update_option(&mut self.search.limit, limit.as_ref());
            }
            _ => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize them
    fn update_path_with_root(&mut self, root: &Path, config_file: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_file));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate settings shared by every command.
    pub fn validate(&self) -> Result<()> {
        if !is_js_identifier(&self.build.variable) {
            bail!(ConfigError::Validation(format!(
                "[build.variable] `{}` is not a valid JavaScript identifier",
                self.build.variable
            )));
        }

        if self.build.artifact.as_os_str().is_empty() {
            bail!(ConfigError::Validation("[build.artifact] must not be empty".into()));
        }

        if self.search.limit == 0 {
            bail!(ConfigError::Validation("[search.limit] must be positive".into()));
        }

        let mut names = HashSet::new();
        for page in &self.build.pages {
            if !names.insert(page.name.as_str()) {
                bail!(ConfigError::Validation(format!(
                    "[[build.pages]] name `{}` is listed twice",
                    page.name
                )));
            }
        }

        Ok(())
    }

    /// Validate settings that only matter when reading sources.
    pub fn validate_sources(&self) -> Result<()> {
        let content = &self.build.content;
        if !content.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[build.content] `{}` is not a directory",
                content.display()
            )));
        }
        for page in &self.build.pages {
            if !content.join(&page.file).is_file() {
                bail!(ConfigError::Validation(format!(
                    "[[build.pages]] file `{}` not found",
                    page.file.display()
                )));
            }
        }
        Ok(())
    }
}

/// ASCII JavaScript identifier: `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("docdex").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_from_str() {
        let config = SiteConfig::from_str(
            r#"
            [site]
            name = "Docs"
        "#,
        )
        .unwrap();
        assert_eq!(config.site.name, "Docs");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[build").is_err());
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(SiteConfig::from_str("[serve]\nport = 1").is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SiteConfig::from_path(&dir.path().join("docdex.toml")).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_update_with_cli_resolves_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["-r", root, "-o", "public", "build"]));

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root.as_path());
        assert_eq!(config.config_path, root.join("docdex.toml"));
        assert_eq!(config.build.content, root.join("docs"));
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.artifact_path(), root.join("public/search_index.js"));
    }

    #[test]
    fn test_update_with_cli_overrides() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["-r", root, "build", "--variable", "idx"]));
        assert_eq!(config.build.variable, "idx");

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["-r", root, "search", "ols", "-l", "2"]));
        assert_eq!(config.search.limit, 2);
    }

    #[test]
    fn test_update_with_cli_init_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["-r", root, "init", "mydocs"]));

        let expected = dir.path().canonicalize().unwrap().join("mydocs");
        assert_eq!(config.get_root(), expected.as_path());
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_variable() {
        let mut config = SiteConfig::default();
        config.build.variable = "search-index".into();
        assert!(config.validate().is_err());

        config.build.variable = "1index".into();
        assert!(config.validate().is_err());

        config.build.variable = "$index_2".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = SiteConfig::default();
        config.search.limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_pages() {
        let config = SiteConfig::from_str(
            r#"
            [[build.pages]]
            name = "Home"
            file = "index.md"

            [[build.pages]]
            name = "Home"
            file = "other.md"
        "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Home"));
    }

    #[test]
    fn test_validate_sources() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.content = dir.path().join("docs");
        assert!(config.validate_sources().is_err());

        fs::create_dir(&config.build.content).unwrap();
        assert!(config.validate_sources().is_ok());

        config.build.pages.push(PageSource {
            name: "Home".into(),
            file: "index.md".into(),
        });
        assert!(config.validate_sources().is_err());

        fs::write(config.build.content.join("index.md"), "# Home\n").unwrap();
        assert!(config.validate_sources().is_ok());
    }

    #[test]
    fn test_is_js_identifier() {
        assert!(is_js_identifier("documenterSearchIndex"));
        assert!(is_js_identifier("_x"));
        assert!(!is_js_identifier(""));
        assert!(!is_js_identifier("a b"));
    }
}
