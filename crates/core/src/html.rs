//! Markup helpers for rule content.
//!
//! Rule content is stored as HTML produced by the admin editor. Search and
//! previews work on the text with all tags removed; no entity decoding or
//! sanitizing happens here.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a single tag, including attributes and closing tags.
pub const TAG_PATTERN: &str = r"<[^>]*>";

pub(crate) static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TAG_PATTERN).expect("valid regex"));

/// Remove every `<...>` tag, keeping the text between them.
pub fn strip_html(content: &str) -> String {
    TAG_RE.replace_all(content, "").into_owned()
}
