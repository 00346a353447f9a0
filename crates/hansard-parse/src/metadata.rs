//! Sitting metadata recovery for both payload shapes.

use chrono::NaiveDate;
use hansard_core::{SessionMetadata, SourceFormat};
use regex::Regex;
use tracing::debug;

use crate::ParseError;
use crate::markup::MarkupSanitizer;
use crate::payload::RawPayload;

pub struct MetadataExtractor {
    meta_tag: Regex,
    attribute: Regex,
    row: Regex,
    cell: Regex,
    sanitizer: MarkupSanitizer,
}

impl MetadataExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            meta_tag: Regex::new(r"(?is)<meta\b[^>]*>")?,
            attribute: Regex::new(r#"(?i)\b(name|content)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?,
            row: Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>")?,
            cell: Regex::new(r"(?is)<td\b[^>]*>(.*?)</td\s*>")?,
            sanitizer: MarkupSanitizer::new()?,
        })
    }

    /// Metadata for a payload. `fallback_date` is kept when the payload
    /// carries no usable date.
    pub fn extract(
        &self,
        payload: &RawPayload,
        fallback_date: &str,
    ) -> Result<SessionMetadata, ParseError> {
        let format = payload.format();
        let mut metadata = SessionMetadata::new(fallback_date);
        metadata.format = Some(format);

        match format {
            SourceFormat::New => {
                if let Some(raw) = &payload.metadata {
                    if let Some(date) = raw.sitting_date.as_deref().and_then(normalize_date) {
                        metadata.date = date;
                    }
                    metadata.sitting_number = raw.sitting_no;
                    metadata.parliament_number = raw.parliament_no;
                    metadata.session_number = raw.session_no;
                    metadata.volume_number = raw.volume_no;
                }
            }
            SourceFormat::Old => self.extract_from_document(payload.full_content(), &mut metadata),
            SourceFormat::Unknown => return Err(ParseError::UnknownFormat),
        }

        debug!(
            date = %metadata.date,
            format = format.as_str(),
            sitting = metadata.sitting_number,
            parliament = metadata.parliament_number,
            "extracted sitting metadata"
        );
        Ok(metadata)
    }

    fn extract_from_document(&self, html: &str, metadata: &mut SessionMetadata) {
        for tag in self.meta_tag.find_iter(html) {
            let (mut name, mut content) = (None, None);
            for caps in self.attribute.captures_iter(tag.as_str()) {
                let value = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str().trim());
                if caps[1].eq_ignore_ascii_case("name") {
                    name = value;
                } else {
                    content = value;
                }
            }
            let (Some(name), Some(content)) = (name, content) else {
                continue;
            };
            match name {
                "Parl_No" => metadata.parliament_number = content.parse().ok(),
                "Sess_No" => metadata.session_number = content.parse().ok(),
                "Vol_No" => metadata.volume_number = content.parse().ok(),
                "Sit_No" => metadata.sitting_number = content.parse().ok(),
                "Sit_Date" => {
                    if let Some(date) = normalize_date(content) {
                        metadata.date = date;
                    }
                }
                _ => {}
            }
        }

        if metadata.parliament_number.is_some() {
            return;
        }

        // Older documents only carry the numbers in a two-column table.
        for row in self.row.captures_iter(html) {
            let cells: Vec<String> = self
                .cell
                .captures_iter(&row[1])
                .map(|c| self.sanitizer.strip_markup(&c[1]))
                .collect();
            let [label, value] = cells.as_slice() else {
                continue;
            };
            let number = || value.parse::<u32>().ok();
            if label.contains("Parliament No") {
                metadata.parliament_number = metadata.parliament_number.or_else(number);
            } else if label.contains("Session No") {
                metadata.session_number = metadata.session_number.or_else(number);
            } else if label.contains("Volume No") {
                metadata.volume_number = metadata.volume_number.or_else(number);
            } else if label.contains("Sitting No") {
                metadata.sitting_number = metadata.sitting_number.or_else(number);
            } else if label.contains("Sitting Date")
                && let Some(date) = normalize_date(value)
            {
                metadata.date = date;
            }
        }
    }
}

/// Normalise `YYYY-MM-DD` or `DD-MM-YYYY` to `DD-MM-YYYY`.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d-%m-%Y"))
        .ok()
        .map(|d| d.format("%d-%m-%Y").to_string())
}
