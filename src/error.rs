//! Error types, one enum per concern.

use std::path::PathBuf;

use thiserror::Error;

use crate::timing::{daily::Period, time_slot::TimeSlot, weekday::IsoWeekday};

/// A period whose start is not strictly before its end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeViolation {
    pub weekday: IsoWeekday,
    pub period: Period,
    pub from: TimeSlot,
    pub to: TimeSlot,
}

impl std::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?}: {} is not before {}",
            self.weekday, self.period, self.from, self.to
        )
    }
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("weekday '{0}' appears more than once")]
    DuplicateWeekday(String),

    #[error("'{0}' is not one of the half-hour slots between 08:00 and 20:00")]
    InvalidTimeSlot(String),

    #[error("invalid time ranges: {}", join(.0))]
    InvalidRanges(Vec<RangeViolation>),
}

fn join(violations: &[RangeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not deserialize: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown timezone '{0}'")]
    InvalidTimezone(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend rejected the request ({status_code}): {message}")]
    Rejected {
        status_code: u16,
        message: String,
        errors: Vec<serde_json::Value>,
    },

    #[error("response carried no data")]
    MissingData,

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
