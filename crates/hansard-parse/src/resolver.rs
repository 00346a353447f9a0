//! Tiered resolution of candidate speaker text to roster members.

use hansard_core::Member;
use tracing::trace;

use crate::roster::{AttendanceRoster, normalize_key};
use crate::speaker::{ExtractedName, NameExtractor};

/// Resolves candidate strings against one sitting's roster.
///
/// Tiers, first hit wins:
///
/// 1. `Speaker` sentinel: the first present member appointed Speaker.
/// 2. Exact index lookup on the extracted name.
/// 3. Substring containment either way between the extracted name and a
///    member's full name. Among several hits the longest contained string
///    wins; remaining ties go to roster order (present, then absent).
pub struct SpeakerResolver<'a> {
    roster: &'a AttendanceRoster,
    names: &'a NameExtractor,
}

impl<'a> SpeakerResolver<'a> {
    pub fn new(roster: &'a AttendanceRoster, names: &'a NameExtractor) -> Self {
        Self { roster, names }
    }

    pub fn resolve(&self, candidate: &str) -> Option<&'a Member> {
        let resolved = match self.names.extract(candidate)? {
            ExtractedName::Speaker => self.roster.presiding_speaker(),
            ExtractedName::Member(name) => self
                .roster
                .lookup(&name)
                .or_else(|| self.containment_match(&name)),
        };
        trace!(candidate, resolved = resolved.map(|m| m.name.as_str()), "resolved candidate");
        resolved
    }

    fn containment_match(&self, name: &str) -> Option<&'a Member> {
        let needle = normalize_key(name);
        if needle.is_empty() {
            return None;
        }

        let mut best: Option<(usize, &'a Member)> = None;
        for member in self.roster.members() {
            let full = normalize_key(&member.name);
            if full.is_empty() {
                continue;
            }
            let overlap = if full.contains(&needle) {
                needle.len()
            } else if needle.contains(&full) {
                full.len()
            } else {
                continue;
            };
            if best.is_none_or(|(len, _)| overlap > len) {
                best = Some((overlap, member));
            }
        }
        best.map(|(_, member)| member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorParser;
    use crate::roster::AttendanceEntry;
    use hansard_core::ParserConfig;

    struct Fixture {
        roster: AttendanceRoster,
        names: NameExtractor,
    }

    fn fixture(entries: &[(&str, bool)]) -> Fixture {
        let config = ParserConfig::default();
        let descriptors = DescriptorParser::new(&config).unwrap();
        let entries: Vec<AttendanceEntry> = entries
            .iter()
            .map(|(n, a)| AttendanceEntry {
                mp_name: n.to_string(),
                attendance: *a,
            })
            .collect();
        Fixture {
            roster: AttendanceRoster::build(&entries, &descriptors),
            names: NameExtractor::new(&config).unwrap(),
        }
    }

    impl Fixture {
        fn resolve(&self, candidate: &str) -> Option<&Member> {
            SpeakerResolver::new(&self.roster, &self.names).resolve(candidate)
        }
    }

    #[test]
    fn exact_match_on_full_name() {
        let f = fixture(&[("Ms Jessica Tan Soon Neo (East Coast)", true)]);
        let m = f.resolve("Ms Jessica Tan Soon Neo (East Coast)").unwrap();
        assert_eq!(
            m,
            &Member::new("Jessica Tan Soon Neo", Some("East Coast".into()), None)
        );
    }

    #[test]
    fn speaker_sentinel_resolves_presiding_officer() {
        let f = fixture(&[
            ("Mr Pritam Singh (Aljunied GRC)", true),
            ("Mr SPEAKER (Mr Seah Kian Peng (Marine Parade-Braddell Heights)).", true),
        ]);
        assert_eq!(f.resolve("Mr Speaker").unwrap().name, "Seah Kian Peng");
    }

    #[test]
    fn speaker_sentinel_takes_first_present_speaker() {
        let f = fixture(&[
            ("Mr SPEAKER (Mr Abdullah Tarmugi (Siglap)).", false),
            ("Mr SPEAKER (Mr Tan Chuan-Jin (Marine Parade GRC)).", true),
            ("Mr SPEAKER (Mr Seah Kian Peng (Marine Parade-Braddell Heights)).", true),
        ]);
        assert_eq!(f.resolve("Speaker").unwrap().name, "Tan Chuan-Jin");
        assert_eq!(f.resolve("MR SPEAKER").unwrap().name, "Tan Chuan-Jin");
    }

    #[test]
    fn speaker_sentinel_ignores_absent_speaker() {
        let f = fixture(&[("Mr SPEAKER (Mr Abdullah Tarmugi (Siglap)).", false)]);
        assert!(f.resolve("Mr Speaker").is_none());
    }

    #[test]
    fn speaker_sentinel_without_presiding_officer_is_unresolved() {
        let f = fixture(&[("Mr Pritam Singh (Aljunied GRC)", true)]);
        assert!(f.resolve("Mr Speaker").is_none());
    }

    #[test]
    fn role_prefixed_attribution_resolves() {
        let f = fixture(&[("Dr Tan See Leng (Marine Parade GRC), Minister for Manpower", true)]);
        assert_eq!(
            f.resolve("The Minister for Manpower (Dr Tan See Leng)").unwrap().name,
            "Tan See Leng"
        );
    }

    #[test]
    fn containment_works_both_ways() {
        let f = fixture(&[("Mr Leong Mun Wai (Non-Constituency Member)", true)]);
        // extracted name contains the member's name
        assert_eq!(f.resolve("Mr Leong Mun Wai Jr").unwrap().name, "Leong Mun Wai");
        // member's name contains the extracted name
        assert_eq!(f.resolve("Mr Leong Mun").unwrap().name, "Leong Mun Wai");
    }

    #[test]
    fn containment_prefers_longest_overlap_then_roster_order() {
        let f = fixture(&[
            ("Mr Tan Chuan (Somewhere)", true),
            ("Mr Tan Chuan Jin (Marine Parade GRC)", true),
            ("Mr Tan Chuan Jin Wei (Elsewhere)", false),
        ]);
        // "Tan Chuan Jin Lee" contains "Tan Chuan" and "Tan Chuan Jin"; the longer wins.
        assert_eq!(f.resolve("Mr Tan Chuan Jin Lee").unwrap().name, "Tan Chuan Jin");
        // "hua" is inside all three; equal overlap, so roster order decides.
        assert_eq!(f.resolve("Mr hua").unwrap().name, "Tan Chuan");
    }

    #[test]
    fn unmatched_candidates_are_none() {
        let f = fixture(&[("Mr Pritam Singh (Aljunied GRC)", true)]);
        assert!(f.resolve("Question Time").is_none());
        assert!(f.resolve("Mr Nobody Known").is_none());
    }

    #[test]
    fn empty_roster_resolves_nothing() {
        let f = fixture(&[]);
        assert!(f.resolve("Ms Jessica Tan Soon Neo").is_none());
    }
}
