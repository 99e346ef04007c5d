//! Case-insensitive matching and emphasis of query occurrences.
//!
//! Matching compares lowercase forms character by character and reports
//! byte offsets into the original string, so slicing never splits a
//! multi-byte character.

use serde::Serialize;

use crate::html::TAG_RE;

/// A run of text that either matched the query or did not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Find the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Returns the byte range of the match in `haystack`. An empty needle never
/// matches.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }
    haystack.char_indices().find_map(|(start, _)| {
        match_len_at(&haystack[start..], &needle).map(|len| (start, start + len))
    })
}

/// `true` if `haystack` contains `needle`, ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

/// Byte length of the match of `needle` at the start of `rest`, if any.
///
/// A match must end on a character boundary of `rest`.
fn match_len_at(rest: &str, needle: &[char]) -> Option<usize> {
    let mut pos = 0;
    for (offset, ch) in rest.char_indices() {
        for lower in ch.to_lowercase() {
            if pos == needle.len() || needle[pos] != lower {
                return None;
            }
            pos += 1;
        }
        if pos == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}

/// Split `text` into plain and highlighted segments by occurrences of `query`.
///
/// The query is matched literally (no pattern syntax). A whitespace-only
/// query highlights nothing. Concatenating the segment texts always
/// reproduces `text`.
pub fn segments(text: &str, query: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut cursor = 0;

    if query.trim().is_empty() {
        if !text.is_empty() {
            out.push(Segment {
                text: text.to_string(),
                highlighted: false,
            });
        }
        return out;
    }

    while let Some((start, end)) = find_ignore_case(&text[cursor..], query) {
        if start > 0 {
            out.push(Segment {
                text: text[cursor..cursor + start].to_string(),
                highlighted: false,
            });
        }
        out.push(Segment {
            text: text[cursor + start..cursor + end].to_string(),
            highlighted: true,
        });
        cursor += end;
    }

    if cursor < text.len() {
        out.push(Segment {
            text: text[cursor..].to_string(),
            highlighted: false,
        });
    }
    out
}

/// Wrap query occurrences inside the text nodes of `html` in `<mark>` tags.
///
/// Tags and their attributes are copied unchanged, so a query that happens
/// to match an attribute value or tag name never corrupts the markup.
pub fn mark_html(html: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for tag in TAG_RE.find_iter(html) {
        push_marked(&mut out, &html[cursor..tag.start()], query);
        out.push_str(tag.as_str());
        cursor = tag.end();
    }
    push_marked(&mut out, &html[cursor..], query);
    out
}

fn push_marked(out: &mut String, text: &str, query: &str) {
    for segment in segments(text, query) {
        if segment.highlighted {
            out.push_str("<mark>");
            out.push_str(&segment.text);
            out.push_str("</mark>");
        } else {
            out.push_str(&segment.text);
        }
    }
}
