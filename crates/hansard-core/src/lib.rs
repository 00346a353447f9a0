//! Core types and shared configuration for Hansard ingestion.

pub mod config;
mod error;
pub mod member;
pub mod metadata;
pub mod section;

pub use config::{OldFormatConfig, ParserConfig};
pub use error::ConfigError;
pub use member::{Member, SPEAKER_APPOINTMENT};
pub use metadata::{SessionMetadata, SourceFormat};
pub use section::{Section, SectionCategory};
