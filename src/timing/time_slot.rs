use std::{fmt::Display, str::FromStr, sync::LazyLock};

use chrono::NaiveTime;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScheduleError;

static SLOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").unwrap());

const FIRST_SLOT_MINUTES: u16 = 8 * 60;
const SLOT_LENGTH_MINUTES: u16 = 30;

/// One of the half-hour slots offered by the schedule editor, 08:00 to 20:00 inclusive.
///
/// Stored as an index into [`TimeSlot::ALL`] so ordering follows the clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub const COUNT: usize = 25;

    pub const ALL: [TimeSlot; Self::COUNT] = {
        let mut slots = [TimeSlot(0); Self::COUNT];
        let mut i = 0;
        while i < Self::COUNT {
            slots[i] = TimeSlot(i as u8);
            i += 1;
        }
        slots
    };

    pub fn new(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Builds a slot from a wall-clock time. Off-grid times return `None`.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        let total = hour as u32 * 60 + minute as u32;
        let first = FIRST_SLOT_MINUTES as u32;
        let length = SLOT_LENGTH_MINUTES as u32;
        if minute >= 60 || total < first || (total - first) % length != 0 {
            return None;
        }
        Self::new(((total - first) / length) as usize)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn minutes_from_midnight(&self) -> u16 {
        FIRST_SLOT_MINUTES + self.0 as u16 * SLOT_LENGTH_MINUTES
    }

    pub fn hour(&self) -> u16 {
        self.minutes_from_midnight() / 60
    }

    pub fn minute(&self) -> u16 {
        self.minutes_from_midnight() % 60
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Every slot is a valid wall-clock time.
        NaiveTime::from_hms_opt(self.hour() as u32, self.minute() as u32, 0).unwrap_or_default()
    }
}

/// Slots offered for both ends of the morning period: 08:00 to 13:00.
pub fn morning_options() -> &'static [TimeSlot] {
    &TimeSlot::ALL[..11]
}

/// Slots offered for both ends of the afternoon period: 13:00 to 20:00.
pub fn afternoon_options() -> &'static [TimeSlot] {
    &TimeSlot::ALL[10..]
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTimeSlot(s.to_string());
        let captures = SLOT_REGEX.captures(s).ok_or_else(invalid)?;
        let hour: u16 = captures[1].parse().map_err(|_| invalid())?;
        let minute: u16 = captures[2].parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Serde adapter for `Option<TimeSlot>` where an unset slot travels as `""`.
pub mod slot_or_empty {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TimeSlot;

    pub fn serialize<S: Serializer>(
        slot: &Option<TimeSlot>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match slot {
            Some(slot) => serializer.collect_str(slot),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TimeSlot>, D::Error> {
        let text: Option<String> = Option::deserialize(deserializer)?;
        match text.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some).map_err(de::Error::custom),
        }
    }
}
