//! Candidate speaker text and the names inside it.
//!
//! Transcripts mark who is speaking by emphasising the attribution:
//! `<strong>Mr Leong Mun Wai (Non-Constituency Member):</strong>`. Every
//! emphasised run is a candidate; most are members, some are headings.

use std::collections::HashSet;

use hansard_core::ParserConfig;
use regex::Regex;

use crate::ParseError;
use crate::descriptor::DescriptorParser;
use crate::markup::MarkupSanitizer;

/// Collects emphasised runs (`<strong>` or `<b>`) from section markup.
pub struct SpeakerTextExtractor {
    emphasis: Regex,
    sanitizer: MarkupSanitizer,
}

impl SpeakerTextExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            emphasis: Regex::new(r"(?is)<strong\b[^>]*>(.*?)</strong\s*>|<b\b[^>]*>(.*?)</b\s*>")?,
            sanitizer: MarkupSanitizer::new()?,
        })
    }

    /// Distinct candidate strings, in order of first appearance.
    ///
    /// Nested markup and entities are removed, whitespace collapsed, and a
    /// trailing colon dropped.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for caps in self.emphasis.captures_iter(html) {
            let Some(inner) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            let text = self.sanitizer.strip_markup(inner.as_str());
            let text = text.strip_suffix(':').unwrap_or(&text).trim_end();
            if !text.is_empty() && seen.insert(text.to_string()) {
                candidates.push(text.to_string());
            }
        }
        candidates
    }
}

/// A name recovered from candidate speaker text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedName {
    /// The presiding officer, referred to by office only.
    Speaker,
    Member(String),
}

/// Recognises the three attribution shapes:
///
/// 1. `Mr Speaker` / `Speaker` → [`ExtractedName::Speaker`]
/// 2. `The Minister for Manpower (Dr Tan See Leng) (for the ...)` → the bracketed name
/// 3. anything the descriptor parser can make sense of
pub struct NameExtractor {
    descriptors: DescriptorParser,
    speaker: Regex,
    role_prefixed: Regex,
}

impl NameExtractor {
    pub fn new(config: &ParserConfig) -> Result<Self, ParseError> {
        let alternation = config
            .salutations_longest_first()
            .iter()
            .map(|s| regex::escape(s).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            descriptors: DescriptorParser::new(config)?,
            speaker: Regex::new(&format!(r"(?i)^(?:(?:{alternation})\s+)?speaker$"))?,
            role_prefixed: Regex::new(&format!(
                r"(?i)^the\s+.+?\(\s*(?:{alternation})\s+([^()]+?)\s*\)(?:\s*\(for\b[^()]*\))?\s*\.?$"
            ))?,
        })
    }

    pub fn descriptors(&self) -> &DescriptorParser {
        &self.descriptors
    }

    pub fn extract(&self, candidate: &str) -> Option<ExtractedName> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return None;
        }

        if self.speaker.is_match(candidate) {
            return Some(ExtractedName::Speaker);
        }

        if let Some(caps) = self.role_prefixed.captures(candidate) {
            return Some(ExtractedName::Member(caps[1].trim().to_string()));
        }

        let parsed = self.descriptors.parse(candidate);
        if !parsed.name.is_empty() && parsed.name != candidate {
            return Some(ExtractedName::Member(parsed.name));
        }

        self.descriptors
            .strip_salutation(candidate)
            .filter(|rest| !rest.is_empty())
            .map(|rest| ExtractedName::Member(rest.to_string()))
    }
}
