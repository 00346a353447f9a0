use serde::{Deserialize, Serialize};

/// The two payload shapes published by the Hansard report service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Structured payload with an explicit section list.
    New,
    /// Legacy payload carrying a single full-content document.
    Old,
    Unknown,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Old => "old",
            Self::Unknown => "unknown",
        }
    }
}

/// Identifying numbers of one sitting.
///
/// `date` is always `DD-MM-YYYY`; the numbers stay `None` until a payload
/// supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub date: String,
    pub sitting_number: Option<u32>,
    pub parliament_number: Option<u32>,
    pub session_number: Option<u32>,
    pub volume_number: Option<u32>,
    pub format: Option<SourceFormat>,
}

impl SessionMetadata {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            sitting_number: None,
            parliament_number: None,
            session_number: None,
            volume_number: None,
            format: None,
        }
    }
}
