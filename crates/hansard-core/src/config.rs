//! Parser configuration: the constant tables that drive descriptor parsing,
//! categorization, procedural filtering and legacy segmentation.
//!
//! Every table has a built-in default. A TOML file may override any subset
//! of fields; omitted fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ConfigError;

const DEFAULT_SALUTATIONS: &[&str] = &[
    "Assoc Prof Dr",
    "Assoc Prof",
    "Prof Dr",
    "Er Dr",
    "Prof",
    "Dr",
    "Er",
    "Mrs",
    "Mr",
    "Ms",
    "Mdm",
    "Miss",
    "Madam",
    "Sir",
];

const DEFAULT_PROCEDURAL_PHRASES: &[&str] = &[
    "adjournment",
    "extension of sitting",
    "extension of time",
    "exempted business",
    "leave of absence",
    "papers presented",
    "papers laid",
    "administration of oath",
    "oath of allegiance",
    "affirmation",
    "personal explanation",
    "business of the house",
    "order of business",
    "suspension of standing orders",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Tables and thresholds shared by every parsing component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Honorifics stripped from the front of names. Matched longest first.
    pub salutations: Vec<String>,
    /// Oral answers, written answers, written answers to unanswered orals.
    pub question_codes: Vec<String>,
    /// First and second readings.
    pub bill_codes: Vec<String>,
    /// Oral and written statements.
    pub statement_codes: Vec<String>,
    /// Statement titles containing any of these are dropped as procedural.
    pub procedural_phrases: Vec<String>,
    /// Statements with less plain text than this are dropped as procedural.
    pub min_statement_chars: usize,
    pub clarification_keyword: String,
    pub adjournment_report_type: String,
    /// Appointments containing this are movers, not speakers, of an
    /// adjournment motion.
    pub procedural_mover_phrase: String,
    /// `{id}` is replaced with the section's external id.
    pub source_url_template: String,
    /// Attendance parsed from markup stops at the first line containing this.
    pub attendance_end_marker: String,
    /// Attendance lines whose name has more tokens than this are rejected.
    pub max_name_tokens: usize,
    pub old_format: OldFormatConfig,
}

/// Segmentation settings for legacy full-content documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OldFormatConfig {
    /// Close a pseudo-section after this many content blocks.
    pub max_blocks: usize,
    /// Blocks with shorter text are ignored.
    pub min_block_chars: usize,
    /// Close a pseudo-section on a block containing this phrase.
    pub boundary_marker: String,
    /// A speaker-looking line must name one of these before its colon.
    pub speaker_titles: Vec<String>,
    pub section_type: String,
    pub section_title: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            salutations: strings(DEFAULT_SALUTATIONS),
            question_codes: strings(&["OA", "WA", "WANA"]),
            bill_codes: strings(&["BI", "BP"]),
            statement_codes: strings(&["OS", "WS"]),
            procedural_phrases: strings(DEFAULT_PROCEDURAL_PHRASES),
            min_statement_chars: 500,
            clarification_keyword: "clarification".into(),
            adjournment_report_type: "Matter Raised On Adjournment Motion".into(),
            procedural_mover_phrase: "leader of the house".into(),
            source_url_template: "https://sprs.parl.gov.sg/search/#/sprs3topic?reportid={id}"
                .into(),
            attendance_end_marker: "IN ATTENDANCE".into(),
            max_name_tokens: 10,
            old_format: OldFormatConfig::default(),
        }
    }
}

impl Default for OldFormatConfig {
    fn default() -> Self {
        Self {
            max_blocks: 10,
            min_block_chars: 10,
            boundary_marker: "Mr Speaker".into(),
            speaker_titles: strings(&["Minister", "Mr", "Ms", "Dr", "Assoc", "Prof"]),
            section_type: "DEBATE".into(),
            section_title: "Parliamentary Question".into(),
        }
    }
}

impl ParserConfig {
    /// Parse a TOML document, filling omitted fields from the defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded parser config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.source_url_template.contains("{id}") {
            return Err(ConfigError::Invalid(
                "source_url_template must contain {id}".into(),
            ));
        }
        if self.old_format.max_blocks == 0 {
            return Err(ConfigError::Invalid(
                "old_format.max_blocks must be at least 1".into(),
            ));
        }
        if self.salutations.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid("salutations must not be blank".into()));
        }
        Ok(())
    }

    pub fn is_question_code(&self, code: &str) -> bool {
        self.question_codes.iter().any(|c| c == code)
    }

    pub fn is_bill_code(&self, code: &str) -> bool {
        self.bill_codes.iter().any(|c| c == code)
    }

    pub fn is_statement_code(&self, code: &str) -> bool {
        self.statement_codes.iter().any(|c| c == code)
    }

    /// Codes whose sections are extracted from structured payloads.
    pub fn is_accepted_code(&self, code: &str) -> bool {
        self.is_question_code(code) || self.is_bill_code(code) || self.is_statement_code(code)
    }

    /// Whether a statement title names procedural business.
    pub fn is_procedural_title(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.procedural_phrases
            .iter()
            .any(|p| title.contains(&p.to_lowercase()))
    }

    /// Salutations ordered longest first, so "Assoc Prof Dr" is tried before
    /// "Prof" and "Dr".
    pub fn salutations_longest_first(&self) -> Vec<&str> {
        let mut sals: Vec<&str> = self.salutations.iter().map(|s| s.trim()).collect();
        sals.sort_by(|a, b| b.len().cmp(&a.len()));
        sals
    }

    pub fn source_url(&self, id: &str) -> String {
        self.source_url_template.replace("{id}", id)
    }
}
