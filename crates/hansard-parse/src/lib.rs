//! Hansard transcript parsing: attendance roster construction, speaker
//! resolution, section extraction and aggregation for a single sitting.

pub mod aggregate;
pub mod attendance;
pub mod descriptor;
mod error;
pub mod extract;
pub mod markup;
pub mod metadata;
mod parser;
pub mod payload;
pub mod resolver;
pub mod roster;
mod session;
pub mod speaker;

pub use error::ParseError;
pub use parser::HansardParser;
pub use payload::RawPayload;
pub use roster::{AttendanceEntry, AttendanceRoster};
pub use session::Session;
