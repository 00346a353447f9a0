//! Categorized units of proceedings.

use serde::{Deserialize, Serialize};

use crate::Member;

/// Separator placed between display bodies when two sections merge.
pub const DISPLAY_MERGE_SEPARATOR: &str = "<hr/>";
/// Separator placed between plain-text bodies when two sections merge.
pub const PLAIN_MERGE_SEPARATOR: &str = "\n\n---\n\n";

/// What kind of business a section records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCategory {
    Question,
    Bill,
    Motion,
    Clarification,
    AdjournmentMotion,
    Other,
}

impl SectionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Bill => "bill",
            Self::Motion => "motion",
            Self::Clarification => "clarification",
            Self::AdjournmentMotion => "adjournment_motion",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for SectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One section of a sitting with its resolved speakers.
///
/// Sections are identified by `title` when deduplicating: a later section
/// with the same title is folded into the first via [`absorb`](Self::absorb).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Raw type code from the transcript, e.g. `OA`, `BP`, `OS`.
    pub section_type: String,
    pub category: SectionCategory,
    pub title: String,
    /// Unique by name, in first-seen order.
    pub speakers: Vec<Member>,
    /// Markup kept for rendering, emphasis included.
    pub display_text: String,
    pub plain_text: String,
    /// Position of the first occurrence in the raw payload.
    pub order: usize,
    pub source_url: Option<String>,
}

impl Section {
    /// Fold a later section with the same title into this one.
    ///
    /// Bodies are appended after a separator; speakers are unioned by name.
    /// Type, category, order and source URL of `self` are kept.
    pub fn absorb(&mut self, other: Section) {
        self.display_text.push_str(DISPLAY_MERGE_SEPARATOR);
        self.display_text.push_str(&other.display_text);
        self.plain_text.push_str(PLAIN_MERGE_SEPARATOR);
        self.plain_text.push_str(&other.plain_text);

        for speaker in other.speakers {
            if !self.has_speaker_named(&speaker.name) {
                self.speakers.push(speaker);
            }
        }
    }

    pub fn has_speaker_named(&self, name: &str) -> bool {
        self.speakers.iter().any(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, plain: &str, speakers: &[&str], order: usize) -> Section {
        Section {
            section_type: "OA".into(),
            category: SectionCategory::Question,
            title: title.into(),
            speakers: speakers.iter().map(|s| Member::named(*s)).collect(),
            display_text: format!("<p>{plain}</p>"),
            plain_text: plain.into(),
            order,
            source_url: Some(format!("https://example.org/{order}")),
        }
    }

    #[test]
    fn absorb_unions_speakers_by_name() {
        let mut first = section("Housing Grants", "first answer", &["Alice", "Bob"], 2);
        let second = section("Housing Grants", "second answer", &["Bob", "Carol"], 7);
        first.absorb(second);

        let names: Vec<&str> = first.speakers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn absorb_keeps_first_identity_and_text_order() {
        let mut first = section("Housing Grants", "first answer", &[], 2);
        first.absorb(section("Housing Grants", "second answer", &[], 7));

        assert_eq!(first.order, 2);
        assert_eq!(first.source_url.as_deref(), Some("https://example.org/2"));
        let a = first.plain_text.find("first answer").unwrap();
        let b = first.plain_text.find("second answer").unwrap();
        assert!(a < b);
        assert!(first.display_text.contains(DISPLAY_MERGE_SEPARATOR));
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&SectionCategory::AdjournmentMotion).unwrap();
        assert_eq!(json, "\"adjournment_motion\"");
        assert_eq!(SectionCategory::Clarification.to_string(), "clarification");
    }
}
