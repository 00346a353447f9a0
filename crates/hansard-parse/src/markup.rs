//! Markup normalisation for section bodies.
//!
//! Produces two renditions of the same body: display text (markup kept so
//! speaker names stay emphasised) and plain text (all tags removed,
//! whitespace collapsed). Both pass through the same entity table, which
//! also repairs two punctuation sequences that arrive double-encoded.

use regex::Regex;

use crate::ParseError;

/// Entities and mis-decoded punctuation replaced in every rendition.
const ENTITY_TABLE: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("\u{e2}\u{20ac}\u{2122}", "'"),
    ("\u{e2}\u{20ac}\u{201d}", "\u{2014}"),
    ("&amp;", "&"),
    ("&#39;", "'"),
    ("&quot;", "\""),
];

/// Apply the entity table until nothing changes.
///
/// Every replacement shortens the string, so this terminates; repeating it
/// means `&amp;nbsp;` decodes fully instead of leaving `&nbsp;` behind.
pub fn decode_entities(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let mut next = current.clone();
        for (from, to) in ENTITY_TABLE {
            if next.contains(from) {
                next = next.replace(from, to);
            }
        }
        if next == current {
            return current;
        }
        current = next;
    }
}

pub struct MarkupSanitizer {
    tag: Regex,
    hidden: Regex,
    whitespace: Regex,
}

impl MarkupSanitizer {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            tag: Regex::new(r"<[^>]+>")?,
            hidden: Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Markup safe to render: scripts, styles and comments removed, entities
    /// decoded, every other tag kept.
    pub fn clean_for_display(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }
        let visible = self.hidden.replace_all(html, "");
        decode_entities(&visible).trim().to_string()
    }

    /// Plain text with every tag removed and whitespace collapsed.
    ///
    /// Stripping and decoding repeat until stable, so the result never
    /// contains anything a second call would remove.
    pub fn strip_markup(&self, html: &str) -> String {
        let mut text = html.to_string();
        loop {
            let visible = self.hidden.replace_all(&text, "");
            let untagged = self.tag.replace_all(&visible, "");
            let decoded = decode_entities(&untagged);
            if decoded == text {
                break;
            }
            text = decoded;
        }
        self.collapse_whitespace(&text)
    }

    pub fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}
