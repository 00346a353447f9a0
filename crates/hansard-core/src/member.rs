//! Legislator identities as they appear in a sitting's roster.

use serde::{Deserialize, Serialize};

/// Appointment text that marks the presiding officer.
pub const SPEAKER_APPOINTMENT: &str = "Speaker";

/// A Member of Parliament parsed from an attendance or speaker descriptor.
///
/// Members are plain values: two members are the same member when name,
/// constituency and appointment all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Constituency, or a membership label such as "Nominated Member".
    pub constituency: Option<String>,
    /// Ministerial or parliamentary office held at the sitting.
    pub appointment: Option<String>,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        constituency: Option<String>,
        appointment: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            constituency,
            appointment,
        }
    }

    /// A member known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None, None)
    }

    /// Whether this member presided over the sitting.
    pub fn is_speaker(&self) -> bool {
        self.appointment.as_deref() == Some(SPEAKER_APPOINTMENT)
    }

    /// Case-insensitive check against the appointment text.
    pub fn appointment_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.appointment
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(&needle))
    }
}
