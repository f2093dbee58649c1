//! `[build]` section configuration.
//!
//! Source and output locations, artifact naming, anchor slugs and the
//! optional explicit page list.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// Slug generation mode for section anchors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Transliterate to lowercase ASCII (e.g., "Über Uns" → "uber-uns").
    On,
    /// Drop URL-hostile characters, keep case, join words with `-` (default).
    #[default]
    Safe,
    /// Keep heading text as written.
    No,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in docdex.toml.
///
/// # Example
/// ```toml
/// [build]
/// content = "docs"
/// output = "build"
/// artifact = "search_index.js"
/// variable = "documenterSearchIndex"
///
/// [[build.pages]]
/// name = "Home"
/// file = "index.md"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Markdown source directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory for the artifact.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Artifact file name, relative to `output`.
    #[serde(default = "defaults::build::artifact")]
    #[educe(Default = defaults::build::artifact())]
    pub artifact: PathBuf,

    /// JavaScript variable the index is assigned to.
    #[serde(default = "defaults::build::variable")]
    #[educe(Default = defaults::build::variable())]
    pub variable: String,

    /// Anchor slug settings.
    #[serde(default)]
    pub slug: SlugConfig,

    /// Explicit page list. Empty means "discover every `.md` under `content`".
    #[serde(default)]
    pub pages: Vec<PageSource>,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.slug]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SlugConfig {
    /// Slugify section anchors
    #[serde(default = "defaults::build::slug::fragment")]
    #[educe(Default = defaults::build::slug::fragment())]
    pub fragment: SlugMode,
}

/// One `[[build.pages]]` entry: a display name bound to a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSource {
    pub name: String,
    /// Path relative to the content directory.
    pub file: PathBuf,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.content, PathBuf::from("docs"));
        assert_eq!(config.build.output, PathBuf::from("build"));
        assert_eq!(config.build.artifact, PathBuf::from("search_index.js"));
        assert_eq!(config.build.variable, "documenterSearchIndex");
        assert_eq!(config.build.slug.fragment, SlugMode::Safe);
        assert!(config.build.pages.is_empty());
    }

    #[test]
    fn test_slug_mode_parsing() {
        for (raw, expected) in [
            ("on", SlugMode::On),
            ("safe", SlugMode::Safe),
            ("no", SlugMode::No),
        ] {
            let config: SiteConfig =
                toml::from_str(&format!("[build.slug]\nfragment = \"{raw}\"")).unwrap();
            assert_eq!(config.build.slug.fragment, expected);
        }
    }

    #[test]
    fn test_slug_mode_invalid() {
        let result: Result<SiteConfig, _> = toml::from_str("[build.slug]\nfragment = \"loud\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_pages_keep_order() {
        let config: SiteConfig = toml::from_str(
            r#"
            [[build.pages]]
            name = "Home"
            file = "index.md"

            [[build.pages]]
            name = "API"
            file = "api.md"
        "#,
        )
        .unwrap();

        let names: Vec<_> = config.build.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Home", "API"]);
        assert_eq!(config.build.pages[1].file, PathBuf::from("api.md"));
    }

    #[test]
    fn test_page_source_requires_file() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [[build.pages]]
            name = "Home"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_paths() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build]
            content = "src/docs"
            output = "site"
            artifact = "assets/search.js"
            variable = "searchIndex"
        "#,
        )
        .unwrap();

        assert_eq!(config.build.content, PathBuf::from("src/docs"));
        assert_eq!(config.build.output, PathBuf::from("site"));
        assert_eq!(config.build.artifact, PathBuf::from("assets/search.js"));
        assert_eq!(config.build.variable, "searchIndex");
    }
}
