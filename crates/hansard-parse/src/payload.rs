//! Raw report payloads as published by the Hansard report service.
//!
//! Two shapes exist. Structured payloads carry `metadata`, `attendanceList`
//! and `takesSectionVOList`; legacy payloads carry one `htmlFullContent`
//! document. [`RawPayload::format`] decides which shape a payload has, once.

use std::fmt;

use hansard_core::SourceFormat;
use serde::{Deserialize, Deserializer, Serialize};

use crate::roster::AttendanceEntry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayload {
    #[serde(default)]
    pub metadata: Option<RawMetadata>,
    #[serde(default)]
    pub attendance_list: Option<Vec<AttendanceEntry>>,
    #[serde(default, rename = "takesSectionVOList")]
    pub takes_section_vo_list: Option<Vec<RawSection>>,
    #[serde(default)]
    pub html_full_content: Option<String>,
}

/// Sitting metadata in the structured shape. The field spellings,
/// `parlimentNO` included, are the service's own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(default, rename = "sittingDate")]
    pub sitting_date: Option<String>,
    #[serde(default, rename = "sittingNO", deserialize_with = "lenient_number")]
    pub sitting_no: Option<u32>,
    #[serde(default, rename = "parlimentNO", deserialize_with = "lenient_number")]
    pub parliament_no: Option<u32>,
    #[serde(default, rename = "sessionNO", deserialize_with = "lenient_number")]
    pub session_no: Option<u32>,
    #[serde(default, rename = "volumeNO", deserialize_with = "lenient_number")]
    pub volume_no: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    #[serde(default)]
    pub section_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub section_id: Option<SectionId>,
    #[serde(default)]
    pub report_type: Option<String>,
}

/// External section id; the service sends either strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl RawPayload {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Structured when the section list is non-empty, legacy when the
    /// full-content document is non-empty, unknown otherwise.
    pub fn format(&self) -> SourceFormat {
        if self.takes_section_vo_list.as_ref().is_some_and(|s| !s.is_empty()) {
            SourceFormat::New
        } else if self.html_full_content.as_ref().is_some_and(|h| !h.is_empty()) {
            SourceFormat::Old
        } else {
            SourceFormat::Unknown
        }
    }

    pub fn sections(&self) -> &[RawSection] {
        self.takes_section_vo_list.as_deref().unwrap_or_default()
    }

    pub fn full_content(&self) -> &str {
        self.html_full_content.as_deref().unwrap_or_default()
    }
}

/// Read a JSON null as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Int(u64),
    Float(f64),
    Text(String),
}

/// Accept `7`, `"7"`, `7.0` or null; anything unparseable becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberLike> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberLike::Int(n)) => u32::try_from(n).ok(),
        Some(NumberLike::Float(f)) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => {
            Some(f as u32)
        }
        Some(NumberLike::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
