//! Categorization, procedural filtering, speaker resolution and
//! merge-by-title for extracted drafts.

use std::collections::HashMap;
use std::sync::Arc;

use hansard_core::{Member, ParserConfig, Section, SectionCategory};
use tracing::debug;

use crate::ParseError;
use crate::extract::SectionDraft;
use crate::markup::MarkupSanitizer;
use crate::resolver::SpeakerResolver;
use crate::roster::AttendanceRoster;
use crate::speaker::{NameExtractor, SpeakerTextExtractor};

pub struct SectionAggregator {
    config: Arc<ParserConfig>,
    sanitizer: MarkupSanitizer,
    speaker_text: SpeakerTextExtractor,
}

impl SectionAggregator {
    pub fn new(config: Arc<ParserConfig>) -> Result<Self, ParseError> {
        Ok(Self {
            config,
            sanitizer: MarkupSanitizer::new()?,
            speaker_text: SpeakerTextExtractor::new()?,
        })
    }

    /// First matching rule wins: clarification title, adjournment-motion
    /// report type, then question, bill and statement codes.
    pub fn categorize(&self, draft: &SectionDraft) -> SectionCategory {
        let c = &self.config;
        if draft
            .title
            .to_lowercase()
            .contains(&c.clarification_keyword.to_lowercase())
        {
            SectionCategory::Clarification
        } else if draft.report_type_hint.as_deref() == Some(c.adjournment_report_type.as_str()) {
            SectionCategory::AdjournmentMotion
        } else if c.is_question_code(&draft.raw_type) {
            SectionCategory::Question
        } else if c.is_bill_code(&draft.raw_type) {
            SectionCategory::Bill
        } else if c.is_statement_code(&draft.raw_type) {
            SectionCategory::Motion
        } else {
            SectionCategory::Other
        }
    }

    /// Only statements outside adjournment motions are ever procedural:
    /// too short, or titled with a procedural phrase.
    fn procedural_reason(
        &self,
        draft: &SectionDraft,
        category: SectionCategory,
        plain_text: &str,
    ) -> Option<&'static str> {
        if !self.config.is_statement_code(&draft.raw_type)
            || category == SectionCategory::AdjournmentMotion
        {
            return None;
        }
        if plain_text.chars().count() < self.config.min_statement_chars {
            Some("too short")
        } else if self.config.is_procedural_title(&draft.title) {
            Some("procedural title")
        } else {
            None
        }
    }

    /// Resolved speakers of one section body, unique by name, in order of
    /// first attribution. The presiding Speaker never counts; neither do the
    /// Leader of the House's procedural moves on adjournment motions.
    pub fn resolve_speakers(
        &self,
        markup: &str,
        category: SectionCategory,
        resolver: &SpeakerResolver<'_>,
    ) -> Vec<Member> {
        let mut speakers: Vec<Member> = Vec::new();
        for candidate in self.speaker_text.extract(markup) {
            let Some(member) = resolver.resolve(&candidate) else {
                continue;
            };
            if member.is_speaker() {
                continue;
            }
            if category == SectionCategory::AdjournmentMotion
                && member.appointment_contains(&self.config.procedural_mover_phrase)
            {
                continue;
            }
            if !speakers.iter().any(|s| s.name == member.name) {
                speakers.push(member.clone());
            }
        }
        speakers
    }

    /// The section a draft produces, or `None` when it is filtered out.
    pub fn build_section(
        &self,
        draft: &SectionDraft,
        resolver: &SpeakerResolver<'_>,
    ) -> Option<Section> {
        let category = self.categorize(draft);
        let plain_text = self.sanitizer.strip_markup(&draft.raw_markup);

        if let Some(reason) = self.procedural_reason(draft, category, &plain_text) {
            debug!(title = %draft.title, reason, "dropping procedural section");
            return None;
        }

        Some(Section {
            section_type: draft.raw_type.clone(),
            category,
            title: draft.title.clone(),
            speakers: self.resolve_speakers(&draft.raw_markup, category, resolver),
            display_text: self.sanitizer.clean_for_display(&draft.raw_markup),
            plain_text,
            order: draft.order,
            source_url: draft.external_id.as_deref().map(|id| self.config.source_url(id)),
        })
    }

    /// Final ordered sections for a sitting.
    ///
    /// A section whose title matches an earlier one is folded into it.
    pub fn aggregate(
        &self,
        drafts: &[SectionDraft],
        roster: &AttendanceRoster,
        names: &NameExtractor,
    ) -> Vec<Section> {
        let resolver = SpeakerResolver::new(roster, names);
        let mut sections: Vec<Section> = Vec::new();
        let mut by_title: HashMap<String, usize> = HashMap::new();

        for draft in drafts {
            let Some(section) = self.build_section(draft, &resolver) else {
                continue;
            };
            match by_title.get(&section.title) {
                Some(&idx) => {
                    debug!(title = %section.title, order = section.order, "merging repeated section");
                    sections[idx].absorb(section);
                }
                None => {
                    by_title.insert(section.title.clone(), sections.len());
                    sections.push(section);
                }
            }
        }
        sections
    }
}
