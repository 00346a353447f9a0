//! Member descriptor parsing.
//!
//! A descriptor is the text the transcript uses to introduce a member:
//!
//! - `Mr Tan Kiat How (Sembawang GRC), Senior Minister of State for National Development`
//! - `Dr Tan Wu Meng (Jurong GRC)`
//! - `Mr SPEAKER (Mr Seah Kian Peng (Marine Parade-Braddell Heights)).`
//!
//! Parsing is total: text that fits no known shape becomes a name-only
//! member, with any leading salutation removed.

use hansard_core::{Member, ParserConfig, SPEAKER_APPOINTMENT};
use regex::Regex;

use crate::ParseError;

const DEPUTY_SPEAKER_APPOINTMENT: &str = "Deputy Speaker";

pub struct DescriptorParser {
    /// Longest first.
    salutations: Vec<String>,
    presiding: Regex,
    structured: Regex,
}

impl DescriptorParser {
    pub fn new(config: &ParserConfig) -> Result<Self, ParseError> {
        let salutations: Vec<String> = config
            .salutations_longest_first()
            .into_iter()
            .map(str::to_string)
            .collect();
        let alternation = salutations
            .iter()
            .map(|s| regex::escape(s).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            presiding: Regex::new(&format!(
                r"(?i)^(?:{alternation})\s+(DEPUTY\s+SPEAKER|SPEAKER)\s*\((.+)\)\s*\.?$"
            ))?,
            structured: Regex::new(r"^(.+?)\s*\(([^()]+)\)\s*(?:,\s*(.*?))?\s*$")?,
            salutations,
        })
    }

    /// Parse one descriptor into a member. Never fails.
    pub fn parse(&self, descriptor: &str) -> Member {
        let text = descriptor.trim();

        if let Some(caps) = self.presiding.captures(text) {
            let role = if caps[1].to_ascii_uppercase().starts_with("DEPUTY") {
                DEPUTY_SPEAKER_APPOINTMENT
            } else {
                SPEAKER_APPOINTMENT
            };
            // One level only: the inner descriptor is never itself presiding.
            let inner = self.parse_member(caps[2].trim());
            return Member::new(inner.name, inner.constituency, Some(role.to_string()));
        }

        self.parse_member(text)
    }

    fn parse_member(&self, text: &str) -> Member {
        let body = text.strip_suffix('.').unwrap_or(text).trim_end();
        let body = self.strip_salutation(body).unwrap_or(body);

        match self.structured.captures(body) {
            Some(caps) => {
                let appointment = caps
                    .get(3)
                    .map(|m| m.as_str().trim())
                    .filter(|a| !a.is_empty())
                    .map(str::to_string);
                Member::new(
                    caps[1].trim(),
                    Some(caps[2].trim().to_string()),
                    appointment,
                )
            }
            None => Member::named(body),
        }
    }

    /// Remove a leading salutation, if one is present.
    ///
    /// Matching ignores ASCII case and requires whitespace after the
    /// salutation, so "Mrs Lee" never loses only its "Mr".
    pub fn strip_salutation<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.salutations.iter().find_map(|sal| {
            let head = text.get(..sal.len())?;
            let rest = text.get(sal.len()..)?;
            let starts_with_space = rest.chars().next().is_some_and(char::is_whitespace);
            (head.eq_ignore_ascii_case(sal) && starts_with_space).then(|| rest.trim_start())
        })
    }

    /// Parse one line of attendance text.
    ///
    /// Blank lines and lines whose name runs past `max_name_tokens` words
    /// (running prose rather than a descriptor) yield nothing.
    pub fn parse_attendance_line(&self, line: &str, max_name_tokens: usize) -> Option<Member> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let member = self.parse(line);
        let tokens = member.name.split_whitespace().count();
        if tokens == 0 || tokens > max_name_tokens {
            return None;
        }
        Some(member)
    }
}
