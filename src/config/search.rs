//! `[search]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[search]` section in docdex.toml - ranking knobs for `docdex search`.
///
/// # Example
/// ```toml
/// [search]
/// limit = 20
/// title_weight = 8
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Maximum number of hits returned.
    #[serde(default = "defaults::search::limit")]
    #[educe(Default = defaults::search::limit())]
    pub limit: usize,

    /// Score for each query term found in a title.
    #[serde(default = "defaults::search::title_weight")]
    #[educe(Default = defaults::search::title_weight())]
    pub title_weight: u32,

    /// Score for each occurrence of a query term in the text.
    #[serde(default = "defaults::search::text_weight")]
    #[educe(Default = defaults::search::text_weight())]
    pub text_weight: u32,

    /// Cap on counted text occurrences per term.
    #[serde(default = "defaults::search::max_text_hits")]
    #[educe(Default = defaults::search::max_text_hits())]
    pub max_text_hits: u32,

    /// Snippet length in characters.
    #[serde(default = "defaults::search::snippet_len")]
    #[educe(Default = defaults::search::snippet_len())]
    pub snippet_len: usize,
}
