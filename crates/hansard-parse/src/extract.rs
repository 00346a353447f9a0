//! Section drafts from either payload shape.
//!
//! Structured payloads delimit their sections; each accepted entry becomes
//! one draft. Legacy documents have no section boundaries, so they are cut
//! into pseudo-sections by block count and a boundary phrase. That cut is
//! approximate, and every pseudo-section shares one configured type and title.

use std::sync::Arc;

use hansard_core::{ParserConfig, SourceFormat};
use regex::Regex;
use tracing::{debug, warn};

use crate::ParseError;
use crate::markup::MarkupSanitizer;
use crate::payload::{RawPayload, RawSection};

const UNTITLED: &str = "Untitled";

/// One section as found in the payload, before categorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDraft {
    pub raw_type: String,
    pub title: String,
    pub raw_markup: String,
    pub report_type_hint: Option<String>,
    pub external_id: Option<String>,
    /// Position in the payload.
    pub order: usize,
}

pub struct SectionExtractor {
    config: Arc<ParserConfig>,
    block_boundary: Regex,
    speaker_line: Regex,
    sanitizer: MarkupSanitizer,
}

impl SectionExtractor {
    pub fn new(config: Arc<ParserConfig>) -> Result<Self, ParseError> {
        Ok(Self {
            config,
            block_boundary: Regex::new(r"(?i)<\s*/?\s*(?:p|div|br)\b[^>]*>")?,
            speaker_line: Regex::new(r"^([A-Z][^:]+?):\s*")?,
            sanitizer: MarkupSanitizer::new()?,
        })
    }

    /// Drafts for whichever shape the payload has. Unknown payloads yield none.
    pub fn extract(&self, payload: &RawPayload) -> Vec<SectionDraft> {
        match payload.format() {
            SourceFormat::New => self.extract_structured(payload.sections()),
            SourceFormat::Old => self.extract_legacy(payload.full_content()),
            SourceFormat::Unknown => {
                warn!("unknown payload format, no sections extracted");
                Vec::new()
            }
        }
    }

    /// Accepted sections with a non-empty body, in payload order.
    pub fn extract_structured(&self, sections: &[RawSection]) -> Vec<SectionDraft> {
        let drafts: Vec<SectionDraft> = sections
            .iter()
            .enumerate()
            .filter_map(|(idx, section)| {
                let raw_type = section.section_type.as_deref()?.trim();
                if !self.config.is_accepted_code(raw_type) {
                    return None;
                }
                let content = section.content.as_deref().filter(|c| !c.trim().is_empty())?;
                Some(SectionDraft {
                    raw_type: raw_type.to_string(),
                    title: section
                        .title
                        .as_deref()
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .unwrap_or(UNTITLED)
                        .to_string(),
                    raw_markup: content.to_string(),
                    report_type_hint: section.report_type.clone(),
                    external_id: section
                        .section_id
                        .as_ref()
                        .map(|id| id.to_string())
                        .filter(|id| !id.is_empty()),
                    order: idx,
                })
            })
            .collect();
        debug!(total = sections.len(), kept = drafts.len(), "extracted structured sections");
        drafts
    }

    /// Cut a legacy document into pseudo-sections.
    ///
    /// Blocks accumulate until `max_blocks` is reached or a block contains
    /// the boundary phrase. A chunk is emitted only once it holds a
    /// speaker-looking line; until then it keeps growing.
    pub fn extract_legacy(&self, html: &str) -> Vec<SectionDraft> {
        let settings = &self.config.old_format;
        let mut drafts = Vec::new();
        let mut blocks: Vec<String> = Vec::new();
        let mut has_speaker = false;

        for fragment in self.block_boundary.split(html) {
            let text = self.sanitizer.strip_markup(fragment);
            if text.chars().count() < settings.min_block_chars {
                continue;
            }

            has_speaker |= self.is_speaker_line(&text);
            blocks.push(format!("<p>{}</p>", fragment.trim()));

            let boundary = blocks.len() >= settings.max_blocks
                || text.contains(settings.boundary_marker.as_str());
            if boundary && has_speaker {
                drafts.push(self.pseudo_section(&blocks, drafts.len()));
                blocks.clear();
                has_speaker = false;
            }
        }

        if !blocks.is_empty() && has_speaker {
            drafts.push(self.pseudo_section(&blocks, drafts.len()));
        }
        debug!(sections = drafts.len(), "segmented legacy document");
        drafts
    }

    fn is_speaker_line(&self, text: &str) -> bool {
        self.speaker_line.captures(text).is_some_and(|caps| {
            self.config
                .old_format
                .speaker_titles
                .iter()
                .any(|title| caps[1].contains(title.as_str()))
        })
    }

    fn pseudo_section(&self, blocks: &[String], order: usize) -> SectionDraft {
        SectionDraft {
            raw_type: self.config.old_format.section_type.clone(),
            title: self.config.old_format.section_title.clone(),
            raw_markup: blocks.concat(),
            report_type_hint: None,
            external_id: None,
            order,
        }
    }
}
