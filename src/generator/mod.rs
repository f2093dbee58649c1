//! Artifact generators.

pub mod search_index;
