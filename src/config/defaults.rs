//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn name() -> String {
        "Documentation".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "docs".into()
    }

    pub fn output() -> PathBuf {
        "build".into()
    }

    pub fn artifact() -> PathBuf {
        "search_index.js".into()
    }

    pub fn variable() -> String {
        "documenterSearchIndex".into()
    }

    pub mod slug {
        use super::super::super::SlugMode;

        pub fn fragment() -> SlugMode {
            SlugMode::default()
        }
    }
}

// ============================================================================
// [search] Section Defaults
// ============================================================================

pub mod search {
    pub fn limit() -> usize {
        10
    }

    pub fn title_weight() -> u32 {
        10
    }

    pub fn text_weight() -> u32 {
        1
    }

    pub fn max_text_hits() -> u32 {
        5
    }

    pub fn snippet_len() -> usize {
        80
    }
}
