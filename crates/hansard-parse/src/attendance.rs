//! Attendance recovered from document markup.
//!
//! Legacy documents list attendance as line-broken text under `PRESENT:`
//! and `ABSENT:` headers, ending where the next part of the record begins.

use std::sync::Arc;

use hansard_core::ParserConfig;
use regex::Regex;

use crate::ParseError;
use crate::descriptor::DescriptorParser;
use crate::markup::MarkupSanitizer;
use crate::roster::AttendanceRoster;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Heading {
    Present,
    Absent,
}

pub struct AttendanceMarkupParser {
    config: Arc<ParserConfig>,
    line_break: Regex,
    heading: Regex,
    sanitizer: MarkupSanitizer,
}

impl AttendanceMarkupParser {
    pub fn new(config: Arc<ParserConfig>) -> Result<Self, ParseError> {
        Ok(Self {
            config,
            line_break: Regex::new(r"(?i)<br\s*/?\s*>|</p\s*>|\n")?,
            heading: Regex::new(r"(?i)^(PRESENT|ABSENT)\s*:\s*(.*)$")?,
            sanitizer: MarkupSanitizer::new()?,
        })
    }

    pub fn parse(&self, html: &str, descriptors: &DescriptorParser) -> AttendanceRoster {
        let end_marker = self.config.attendance_end_marker.to_lowercase();
        let mut present = Vec::new();
        let mut absent = Vec::new();
        let mut heading: Option<Heading> = None;

        for raw_line in self.line_break.split(html) {
            let line = self.sanitizer.strip_markup(raw_line);
            if line.is_empty() {
                continue;
            }
            if heading.is_some() && !end_marker.is_empty() && line.to_lowercase().contains(&end_marker) {
                break;
            }

            let text = match self.heading.captures(&line) {
                Some(caps) => {
                    heading = Some(if caps[1].eq_ignore_ascii_case("present") {
                        Heading::Present
                    } else {
                        Heading::Absent
                    });
                    caps[2].to_string()
                }
                None => line,
            };

            let Some(current) = heading else {
                continue;
            };
            let Some(member) =
                descriptors.parse_attendance_line(&text, self.config.max_name_tokens)
            else {
                continue;
            };
            match current {
                Heading::Present => present.push(member),
                Heading::Absent => absent.push(member),
            }
        }

        AttendanceRoster::from_members(present, absent)
    }
}
