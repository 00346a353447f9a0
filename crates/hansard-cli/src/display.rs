//! Plain-text rendering of parsed sittings.

use std::fmt::Write;

use hansard_core::{Section, SessionMetadata};
use hansard_parse::Session;

const MAX_TITLE_CHARS: usize = 72;
const MAX_LISTED_SPEAKERS: usize = 4;

fn number(n: Option<u32>) -> String {
    n.map_or_else(|| "-".into(), |n| n.to_string())
}

/// `14-01-2026  P14 S2 V95 #12  new`
pub fn metadata_line(m: &SessionMetadata) -> String {
    format!(
        "{}  P{} S{} V{} #{}  {}",
        m.date,
        number(m.parliament_number),
        number(m.session_number),
        number(m.volume_number),
        number(m.sitting_number),
        m.format.map_or("-", |f| f.as_str()),
    )
}

/// One line per sitting, for range fetches.
pub fn summary_line(session: &Session) -> String {
    format!(
        "{}  present={} absent={} sections={}",
        metadata_line(session.metadata()),
        session.present_members().len(),
        session.absent_members().len(),
        session.sections().len(),
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn section_line(section: &Section) -> String {
    let more = section.speakers.len().saturating_sub(MAX_LISTED_SPEAKERS);
    let extra = format!("+{more}");
    let mut names: Vec<&str> = section
        .speakers
        .iter()
        .take(MAX_LISTED_SPEAKERS)
        .map(|m| m.name.as_str())
        .collect();
    if more > 0 {
        names.push(&extra);
    }
    format!(
        "  {:>3}  {:<18} {:<5} {}  [{}]",
        section.order,
        section.category.as_str(),
        section.section_type,
        truncate(&section.title, MAX_TITLE_CHARS),
        names.join(", "),
    )
}

/// Summary line followed by one line per section.
pub fn render(session: &Session) -> String {
    let mut out = summary_line(session);
    out.push('\n');
    for section in session.sections() {
        let _ = writeln!(out, "{}", section_line(section));
    }
    out
}
