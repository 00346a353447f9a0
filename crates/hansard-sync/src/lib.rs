//! Fetch layer: raw Hansard report payloads by sitting date.

mod dates;

#[cfg(feature = "http")]
pub mod http;

pub use dates::{DATE_FORMAT, DateError, format_sitting_date, parse_sitting_date, sitting_dates};

#[cfg(feature = "http")]
pub use http::{DEFAULT_BASE_URL, FetchedSitting, HansardClient, SyncError};
