//! Markdown outline scanner.
//!
//! Splits a page into the text before its first heading (the preamble) and
//! one [`Section`] per ATX heading. Only structure is recognized: headings
//! outside fenced code blocks start sections, everything else is body text.
//!
//! ```text
//! Intro line.            ─► preamble
//! # Home                 ─► Section { level: 1, title: "Home" }
//! Some prose.            ─┘ text
//! ## API                 ─► Section { level: 2, title: "API" }
//! ```julia               ─┐ (fence line dropped)
//! # not a heading          ├ text
//! ```                    ─┘ (fence line dropped)
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// ATX heading: up to 3 spaces, 1-6 `#`, optional text, optional closing `#`s.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$")
        .expect("heading pattern is valid")
});

/// Inline link or image: `[text](target)`.
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("link pattern is valid")
});

/// Outline of one Markdown page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Text before the first heading.
    pub preamble: String,
    /// Headings in document order.
    pub sections: Vec<Section>,
}

/// A heading and the body text that follows it up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub level: u8,
    pub title: String,
    pub text: String,
}

/// Opening code fence (marker character and run length).
#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        if line.len() - trimmed.len() > 3 {
            return None;
        }
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = trimmed.chars().take_while(|c| *c == marker).count();
        (len >= 3).then_some(Self { marker, len })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let len = trimmed.chars().take_while(|c| *c == self.marker).count();
        len >= self.len && len == trimmed.chars().count()
    }
}

/// Scan `source` into its outline.
pub fn scan(source: &str) -> Document {
    let mut preamble: Vec<&str> = Vec::new();
    let mut sections: Vec<(u8, String, Vec<&str>)> = Vec::new();
    let mut fence: Option<Fence> = None;

    for line in source.lines() {
        if let Some(open) = fence {
            if open.is_closed_by(line) {
                fence = None;
            } else {
                push_body(&mut preamble, &mut sections, line);
            }
            continue;
        }

        if let Some(open) = Fence::open(line) {
            fence = Some(open);
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            #[allow(clippy::cast_possible_truncation)] // at most 6 `#`
            let level = caps[1].len() as u8;
            let title = caps.get(2).map_or("", |m| m.as_str());
            sections.push((level, plain_title(title), Vec::new()));
            continue;
        }

        push_body(&mut preamble, &mut sections, line);
    }

    Document {
        preamble: normalize_text(&preamble),
        sections: sections
            .into_iter()
            .map(|(level, title, body)| Section {
                level,
                title,
                text: normalize_text(&body),
            })
            .collect(),
    }
}

fn push_body<'a>(preamble: &mut Vec<&'a str>, sections: &mut [(u8, String, Vec<&'a str>)], line: &'a str) {
    match sections.last_mut() {
        Some((_, _, body)) => body.push(line),
        None => preamble.push(line),
    }
}

/// Strip inline markup that would otherwise leak into titles.
fn plain_title(raw: &str) -> String {
    INLINE_LINK
        .replace_all(raw, "$1")
        .replace('`', "")
        .trim()
        .to_owned()
}

/// Trim trailing whitespace, collapse blank-line runs, drop leading and
/// trailing blank lines. Indentation is kept for code.
fn normalize_text(lines: &[&str]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    for line in lines.iter().map(|l| l.trim_end()) {
        let blank = line.is_empty();
        if blank && out.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

// ============================================================================
// Tests
// ============================================================================
