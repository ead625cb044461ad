//! Utility modules.

pub mod duration;

pub use duration::{is_iso_period, parse_iso_period, DurationParseError, IsoPeriod};
