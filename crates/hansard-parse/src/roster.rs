//! Attendance roster for one sitting and its name-variant index.

use std::collections::HashMap;

use hansard_core::Member;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use crate::descriptor::DescriptorParser;
use crate::payload::null_as_default;

/// One raw attendance record from a structured payload.
///
/// A missing or null name reads as empty and a missing or null flag as
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mp_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendance: bool,
}

/// Present and absent members, plus a lookup index over name variants.
///
/// The index maps case-folded keys (full name, last token, and first+last
/// token for names of three or more tokens) to a member position. It is a
/// derived cache: every constructor rebuilds it from scratch, and a later
/// member whose key collides with an earlier one takes the key over.
#[derive(Debug, Clone, Default)]
pub struct AttendanceRoster {
    present: Vec<Member>,
    absent: Vec<Member>,
    index: HashMap<String, usize>,
}

impl AttendanceRoster {
    /// Build from raw attendance entries, parsing each descriptor.
    /// Entries without a name are skipped.
    pub fn build(entries: &[AttendanceEntry], descriptors: &DescriptorParser) -> Self {
        let (named, unnamed): (Vec<_>, Vec<_>) =
            entries.iter().partition(|e| !e.mp_name.trim().is_empty());
        if !unnamed.is_empty() {
            debug!(skipped = unnamed.len(), "attendance entries without a name");
        }
        let (present, absent): (Vec<_>, Vec<_>) = named.into_iter().partition(|e| e.attendance);
        Self::from_members(
            present.iter().map(|e| descriptors.parse(&e.mp_name)).collect(),
            absent.iter().map(|e| descriptors.parse(&e.mp_name)).collect(),
        )
    }

    pub fn from_members(present: Vec<Member>, absent: Vec<Member>) -> Self {
        let mut roster = Self {
            present,
            absent,
            index: HashMap::new(),
        };
        roster.rebuild_index();
        info!(
            present = roster.present.len(),
            absent = roster.absent.len(),
            keys = roster.index.len(),
            "built attendance roster"
        );
        roster
    }

    fn rebuild_index(&mut self) {
        let mut index = HashMap::new();
        for (pos, member) in self.members().enumerate() {
            for key in name_keys(&member.name) {
                index.insert(key, pos);
            }
        }
        self.index = index;
    }

    pub fn present(&self) -> &[Member] {
        &self.present
    }

    pub fn absent(&self) -> &[Member] {
        &self.absent
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty() && self.absent.is_empty()
    }

    /// Every member in insertion order: present first, then absent.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.present.iter().chain(self.absent.iter())
    }

    /// Exact lookup of a name variant, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&Member> {
        let pos = *self.index.get(&normalize_key(name))?;
        self.members().nth(pos)
    }

    /// The presiding officer among present members.
    pub fn presiding_speaker(&self) -> Option<&Member> {
        self.present.iter().find(|m| m.is_speaker())
    }
}

impl Serialize for AttendanceRoster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut roster = serializer.serialize_struct("AttendanceRoster", 2)?;
        roster.serialize_field("present", &self.present)?;
        roster.serialize_field("absent", &self.absent)?;
        roster.end()
    }
}

/// Case-folded, whitespace-normalised index key.
pub fn normalize_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn name_keys(name: &str) -> Vec<String> {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let Some((first, last)) = tokens.first().zip(tokens.last()) else {
        return Vec::new();
    };

    let mut keys = vec![normalize_key(name), last.to_lowercase()];
    if tokens.len() > 2 {
        keys.push(format!("{first} {last}").to_lowercase());
    }
    keys
}
