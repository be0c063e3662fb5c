use std::fmt::Display;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Day of the week keyed by its ISO number, Monday = 1 through Sunday = 7.
///
/// Ordering follows the ISO week, so any ordered collection keyed by `IsoWeekday`
/// iterates Monday first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsoWeekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl IsoWeekday {
    pub const ALL: [IsoWeekday; 7] = [
        IsoWeekday::Monday,
        IsoWeekday::Tuesday,
        IsoWeekday::Wednesday,
        IsoWeekday::Thursday,
        IsoWeekday::Friday,
        IsoWeekday::Saturday,
        IsoWeekday::Sunday,
    ];

    pub fn from_iso(number: u8) -> Option<Self> {
        match number {
            1..=7 => Some(Self::ALL[number as usize - 1]),
            _ => None,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn iso(&self) -> u8 {
        *self as u8
    }
}

impl From<Weekday> for IsoWeekday {
    fn from(weekday: Weekday) -> Self {
        // number_from_monday is always within 1..=7
        Self::ALL[weekday.number_from_monday() as usize - 1]
    }
}

impl From<IsoWeekday> for Weekday {
    fn from(weekday: IsoWeekday) -> Self {
        match weekday {
            IsoWeekday::Monday => Weekday::Mon,
            IsoWeekday::Tuesday => Weekday::Tue,
            IsoWeekday::Wednesday => Weekday::Wed,
            IsoWeekday::Thursday => Weekday::Thu,
            IsoWeekday::Friday => Weekday::Fri,
            IsoWeekday::Saturday => Weekday::Sat,
            IsoWeekday::Sunday => Weekday::Sun,
        }
    }
}

impl Display for IsoWeekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Locale::En.weekday_label(*self))
    }
}

/// Display language for weekday labels.
///
/// Labels only exist at the edges: rendering rows and the wire format expected by the backend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

const FR_LABELS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];
const EN_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

impl Locale {
    fn labels(&self) -> &'static [&'static str; 7] {
        match self {
            Locale::Fr => &FR_LABELS,
            Locale::En => &EN_LABELS,
        }
    }

    pub fn weekday_label(&self, weekday: IsoWeekday) -> &'static str {
        self.labels()[weekday.iso() as usize - 1]
    }

    /// Case-insensitive lookup of a localized weekday name.
    pub fn parse_weekday(&self, label: &str) -> Result<IsoWeekday, ScheduleError> {
        let needle = label.trim().to_lowercase();
        self.labels()
            .iter()
            .position(|candidate| candidate.to_lowercase() == needle)
            .map(|index| IsoWeekday::ALL[index])
            .ok_or_else(|| ScheduleError::UnknownWeekday(label.to_string()))
    }
}
