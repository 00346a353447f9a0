//! One sitting: metadata, attendance roster and final sections.

use hansard_core::{Member, Section, SessionMetadata};
use serde::Serialize;
use tracing::info;

use crate::ParseError;
use crate::parser::HansardParser;
use crate::payload::RawPayload;
use crate::roster::{AttendanceEntry, AttendanceRoster};

/// A parsed sitting.
///
/// Built in order: metadata, attendance, sections. Sections resolve their
/// speakers against the roster present at the time they are set, so
/// setting sections first leaves every section without speakers.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    metadata: SessionMetadata,
    attendance: AttendanceRoster,
    sections: Vec<Section>,
    #[serde(skip)]
    metadata_set: bool,
    #[serde(skip)]
    sections_set: bool,
}

impl Session {
    /// An empty session for a sitting date (`DD-MM-YYYY`).
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            metadata: SessionMetadata::new(date),
            attendance: AttendanceRoster::default(),
            sections: Vec::new(),
            metadata_set: false,
            sections_set: false,
        }
    }

    /// Set metadata once. A metadata record without numbers still counts.
    pub fn set_metadata(&mut self, metadata: SessionMetadata) -> Result<(), ParseError> {
        if self.metadata_set {
            return Err(ParseError::AlreadySet("metadata"));
        }
        self.metadata = metadata;
        self.metadata_set = true;
        Ok(())
    }

    /// Replace the roster with one built from raw attendance entries.
    pub fn set_attendance(&mut self, entries: &[AttendanceEntry], parser: &HansardParser) {
        self.attendance = parser.build_roster(entries);
    }

    /// Replace the roster with one read from `PRESENT:`/`ABSENT:` markup.
    pub fn set_attendance_from_markup(&mut self, html: &str, parser: &HansardParser) {
        self.attendance = parser.roster_from_markup(html);
    }

    /// Extract, resolve and aggregate the payload's sections. Once only.
    pub fn set_sections(
        &mut self,
        payload: &RawPayload,
        parser: &HansardParser,
    ) -> Result<(), ParseError> {
        if self.sections_set {
            return Err(ParseError::AlreadySet("sections"));
        }
        self.sections = parser.sections(payload, &self.attendance);
        self.sections_set = true;
        info!(
            date = %self.metadata.date,
            sections = self.sections.len(),
            "parsed sections"
        );
        Ok(())
    }

    pub fn date(&self) -> &str {
        &self.metadata.date
    }

    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    pub fn attendance(&self) -> &AttendanceRoster {
        &self.attendance
    }

    pub fn present_members(&self) -> &[Member] {
        self.attendance.present()
    }

    pub fn absent_members(&self) -> &[Member] {
        self.attendance.absent()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn to_json(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_set_once() {
        let mut session = Session::new("14-01-2026");
        session.set_metadata(SessionMetadata::new("14-01-2026")).unwrap();
        let err = session
            .set_metadata(SessionMetadata::new("15-01-2026"))
            .unwrap_err();
        assert!(matches!(err, ParseError::AlreadySet("metadata")));
        assert_eq!(session.date(), "14-01-2026");
    }

    #[test]
    fn sections_are_set_once() {
        let parser = HansardParser::with_defaults().unwrap();
        let mut session = Session::new("14-01-2026");
        session.set_sections(&RawPayload::default(), &parser).unwrap();
        assert!(session.sections().is_empty());
        assert!(matches!(
            session.set_sections(&RawPayload::default(), &parser),
            Err(ParseError::AlreadySet("sections"))
        ));
    }

    #[test]
    fn attendance_can_be_resupplied() {
        let parser = HansardParser::with_defaults().unwrap();
        let mut session = Session::new("14-01-2026");
        session.set_attendance(
            &[AttendanceEntry {
                mp_name: "Mr Pritam Singh (Aljunied GRC)".into(),
                attendance: true,
            }],
            &parser,
        );
        session.set_attendance(
            &[AttendanceEntry {
                mp_name: "Ms Sylvia Lim (Aljunied GRC)".into(),
                attendance: false,
            }],
            &parser,
        );
        assert!(session.present_members().is_empty());
        assert_eq!(session.absent_members()[0].name, "Sylvia Lim");
        assert!(session.attendance().lookup("pritam singh").is_none());
    }

    #[test]
    fn json_has_roster_lists_without_index() {
        let parser = HansardParser::with_defaults().unwrap();
        let mut session = Session::new("14-01-2026");
        session.set_attendance_from_markup("PRESENT:<br>Mr Low Thia Khiang (Hougang)", &parser);
        let json: serde_json::Value = serde_json::from_str(&session.to_json().unwrap()).unwrap();
        assert_eq!(json["attendance"]["present"][0]["name"], "Low Thia Khiang");
        assert!(json["attendance"].get("index").is_none());
        assert!(json.get("metadata_set").is_none());
    }
}
