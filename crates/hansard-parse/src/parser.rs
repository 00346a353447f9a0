//! Parser facade: one configuration, compiled once, shared by every sitting.

use std::path::Path;
use std::sync::Arc;

use hansard_core::{ParserConfig, Section, SessionMetadata, SourceFormat};
use tracing::{info, warn};

use crate::ParseError;
use crate::aggregate::SectionAggregator;
use crate::attendance::AttendanceMarkupParser;
use crate::descriptor::DescriptorParser;
use crate::extract::SectionExtractor;
use crate::metadata::MetadataExtractor;
use crate::payload::RawPayload;
use crate::roster::{AttendanceEntry, AttendanceRoster};
use crate::session::Session;
use crate::speaker::NameExtractor;

/// Compiled parsing pipeline for Hansard payloads.
///
/// Holds no per-sitting state, so one parser can serve many sittings and
/// threads.
pub struct HansardParser {
    config: Arc<ParserConfig>,
    names: NameExtractor,
    metadata: MetadataExtractor,
    attendance: AttendanceMarkupParser,
    extractor: SectionExtractor,
    aggregator: SectionAggregator,
}

impl HansardParser {
    pub fn new(config: ParserConfig) -> Result<Self, ParseError> {
        let config = Arc::new(config);
        Ok(Self {
            names: NameExtractor::new(&config)?,
            metadata: MetadataExtractor::new()?,
            attendance: AttendanceMarkupParser::new(config.clone())?,
            extractor: SectionExtractor::new(config.clone())?,
            aggregator: SectionAggregator::new(config.clone())?,
            config,
        })
    }

    pub fn with_defaults() -> Result<Self, ParseError> {
        Self::new(ParserConfig::default())
    }

    /// Parser configured from a TOML file.
    pub fn from_config_path(path: &Path) -> Result<Self, ParseError> {
        Self::new(ParserConfig::from_path(path)?)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn descriptors(&self) -> &DescriptorParser {
        self.names.descriptors()
    }

    /// Parse a complete sitting: metadata, attendance, then sections.
    ///
    /// Attendance comes from `attendanceList` when the payload has one,
    /// otherwise from the legacy document's `PRESENT:`/`ABSENT:` text.
    pub fn parse(&self, date: &str, payload: &RawPayload) -> Result<Session, ParseError> {
        let metadata = self.extract_metadata(payload, date)?;
        let format = metadata.format;
        let mut session = Session::new(metadata.date.clone());
        session.set_metadata(metadata)?;

        match &payload.attendance_list {
            Some(entries) if !entries.is_empty() => session.set_attendance(entries, self),
            _ if format == Some(SourceFormat::Old) => {
                session.set_attendance_from_markup(payload.full_content(), self)
            }
            _ => warn!(date, "payload has no attendance"),
        }

        session.set_sections(payload, self)?;
        info!(
            date = session.date(),
            present = session.present_members().len(),
            absent = session.absent_members().len(),
            sections = session.sections().len(),
            "parsed sitting"
        );
        Ok(session)
    }

    pub fn parse_json(&self, date: &str, json: &str) -> Result<Session, ParseError> {
        self.parse(date, &RawPayload::from_json(json)?)
    }

    /// Metadata for a payload; unknown payload shapes are an error.
    pub fn extract_metadata(
        &self,
        payload: &RawPayload,
        date: &str,
    ) -> Result<SessionMetadata, ParseError> {
        self.metadata.extract(payload, date)
    }

    pub fn build_roster(&self, entries: &[AttendanceEntry]) -> AttendanceRoster {
        AttendanceRoster::build(entries, self.descriptors())
    }

    pub fn roster_from_markup(&self, html: &str) -> AttendanceRoster {
        self.attendance.parse(html, self.descriptors())
    }

    /// Final sections of a payload, speakers resolved against `roster`.
    /// Unknown payload shapes yield no sections.
    pub fn sections(&self, payload: &RawPayload, roster: &AttendanceRoster) -> Vec<Section> {
        let drafts = self.extractor.extract(payload);
        self.aggregator.aggregate(&drafts, roster, &self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HansardParser>();
        assert_send_sync::<Session>();
    }

    #[test]
    fn unknown_payload_fails_parse() {
        let parser = HansardParser::with_defaults().unwrap();
        let err = parser.parse_json("14-01-2026", "{}").unwrap_err();
        assert!(matches!(err, ParseError::UnknownFormat));
    }

    #[test]
    fn unknown_payload_has_no_sections() {
        let parser = HansardParser::with_defaults().unwrap();
        let sections = parser.sections(&RawPayload::default(), &AttendanceRoster::default());
        assert!(sections.is_empty());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let parser = HansardParser::with_defaults().unwrap();
        let err = parser.parse_json("14-01-2026", "{not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
