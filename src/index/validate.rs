//! Data-model invariants of an index table.

use super::{Category, IndexEntry};
use std::collections::HashMap;
use thiserror::Error;

/// A single broken invariant, pointing at the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("record {index}: section `{title}` on page `{page}` has an empty location")]
    EmptySectionLocation {
        index: usize,
        page: String,
        title: String,
    },

    #[error("record {index}: location `{location}` on page `{page}` already used by record {first}")]
    DuplicateSectionLocation {
        index: usize,
        first: usize,
        page: String,
        location: String,
    },
}

/// Collect every violation, in record order.
///
/// Page records are unconstrained: one page may contribute any number of
/// them, all sharing its root location.
pub(super) fn check(entries: &[IndexEntry]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut anchors: HashMap<(&str, &str), usize> = HashMap::new();

    for (index, entry) in entries.iter().enumerate() {
        match entry.category {
            Category::Page => {}
            Category::Section if entry.location.is_empty() => {
                violations.push(Violation::EmptySectionLocation {
                    index,
                    page: entry.page.clone(),
                    title: entry.title.clone(),
                });
            }
            Category::Section => {
                let key = (entry.page.as_str(), entry.location.as_str());
                if let Some(&first) = anchors.get(&key) {
                    violations.push(Violation::DuplicateSectionLocation {
                        index,
                        first,
                        page: entry.page.clone(),
                        location: entry.location.clone(),
                    });
                } else {
                    anchors.insert(key, index);
                }
            }
        }
    }

    violations
}
