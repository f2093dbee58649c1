//! Artifact text format.
//!
//! # Format
//!
//! ```text
//! var documenterSearchIndex = {"docs":
//! [{"location":"","page":"Home","title":"Home","text":"…","category":"page"},
//! {"location":"#API","page":"Home","title":"API","text":"…","category":"section"}]
//! }
//! ```
//!
//! Rendering is deterministic: one record per line, fields in declaration
//! order, so unchanged input gives byte-identical output.
//!
//! Parsing accepts a `var`/`let`/`const` assignment or bare JSON, an optional
//! trailing `;`, and ignores unknown fields.

use super::{Category, IndexEntry, IndexError};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Top-level key holding the record array.
const DOCS_KEY: &str = "docs";

/// Fields every record must carry as strings.
const REQUIRED_FIELDS: [&str; 5] = ["location", "page", "title", "text", "category"];

/// `var name =` prefix of the artifact.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*")
        .expect("assignment pattern is valid")
});

// ============================================================================
// Rendering
// ============================================================================

/// Render `entries` as a JavaScript assignment to `variable`.
pub fn render(variable: &str, entries: &[IndexEntry]) -> Result<String, IndexError> {
    let mut out = String::with_capacity(64 + entries.len() * 256);
    out.push_str(&format!("var {variable} = {{\"{DOCS_KEY}\":\n["));

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str(&serde_json::to_string(entry)?);
    }

    out.push_str("]\n}\n");
    Ok(out)
}

// ============================================================================
// Parsing
// ============================================================================

/// Name of the assigned variable, if the source is an assignment.
pub fn variable_name(source: &str) -> Option<&str> {
    ASSIGNMENT
        .captures(source.trim_start_matches('\u{feff}').trim_start())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse artifact text into its ordered records.
pub fn parse(source: &str) -> Result<Vec<IndexEntry>, IndexError> {
    let (body, line_offset) = strip_assignment(source);

    let value: Value = serde_json::from_str(body).map_err(|err| IndexError::Parse {
        line: err.line() + line_offset,
        column: err.column(),
        message: err.to_string(),
    })?;

    let docs = match value {
        Value::Object(mut object) => object.remove(DOCS_KEY).ok_or_else(|| top_level_error(
            format!("missing `{DOCS_KEY}` key"),
        ))?,
        other => return Err(top_level_error(format!("expected an object, found {}", kind(&other)))),
    };

    let Value::Array(records) = docs else {
        return Err(top_level_error(format!("`{DOCS_KEY}` must be an array")));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| parse_record(i, record))
        .collect()
}

/// Split off the `var name =` prefix and the trailing `;`.
///
/// Returns the JSON body and the number of lines preceding it.
fn strip_assignment(source: &str) -> (&str, usize) {
    let trimmed = source.trim_start_matches('\u{feff}').trim_start();
    let skipped = &source[..source.len() - trimmed.len()];

    let (prefix_len, body) = match ASSIGNMENT.find(trimmed) {
        Some(m) => (m.end(), &trimmed[m.end()..]),
        None => (0, trimmed),
    };
    let line_offset = skipped.matches('\n').count() + trimmed[..prefix_len].matches('\n').count();

    let body = body.trim_end();
    let body = body.strip_suffix(';').unwrap_or(body);
    (body, line_offset)
}

fn parse_record(index: usize, record: Value) -> Result<IndexEntry, IndexError> {
    let at = || format!("record {index}");

    let Value::Object(fields) = &record else {
        return Err(IndexError::Schema {
            at: at(),
            reason: format!("expected an object, found {}", kind(&record)),
        });
    };

    for name in REQUIRED_FIELDS {
        check_string_field(fields, name).map_err(|reason| IndexError::Schema { at: at(), reason })?;
    }

    if let Some(Value::String(category)) = fields.get("category")
        && Category::from_name(category).is_none()
    {
        return Err(IndexError::Schema {
            at: at(),
            reason: format!("unknown category `{category}`"),
        });
    }

    serde_json::from_value(record).map_err(|err| IndexError::Schema {
        at: at(),
        reason: err.to_string(),
    })
}

fn check_string_field(fields: &Map<String, Value>, name: &str) -> Result<(), String> {
    match fields.get(name) {
        Some(Value::String(_)) => Ok(()),
        Some(other) => Err(format!("field `{name}` must be a string, found {}", kind(other))),
        None => Err(format!("missing field `{name}`")),
    }
}

fn top_level_error(reason: String) -> IndexError {
    IndexError::Schema {
        at: "top level".into(),
        reason,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================
