use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::{
    daily::{DaySchedule, Period},
    schedule::ScheduleMap,
    weekday::IsoWeekday,
};

/// Weekly schedule plus per-date exceptions, as the booking widget consumes it.
///
/// An override replaces the weekly entry for its date entirely, so a closed
/// override (`enabled == false`) shuts the venue for that day.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub weekly: ScheduleMap,
    #[serde(default)]
    pub overrides: BTreeMap<NaiveDate, DaySchedule>,
}

impl Availability {
    pub fn new(weekly: ScheduleMap) -> Self {
        Self {
            weekly,
            overrides: BTreeMap::new(),
        }
    }

    pub fn add_override(&mut self, date: NaiveDate, day: DaySchedule) -> Option<DaySchedule> {
        self.overrides.insert(date, day)
    }

    pub fn remove_override(&mut self, date: NaiveDate) -> Option<DaySchedule> {
        self.overrides.remove(&date)
    }

    pub fn day_schedule_on(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.overrides
            .get(&date)
            .or_else(|| self.weekly.get(IsoWeekday::of(date)))
    }

    /// Whether `timestamp`, read in its own timezone, falls inside an active period.
    ///
    /// Windows are half-open: `from <= t < to`. Periods missing an endpoint never match.
    pub fn is_open(&self, timestamp: DateTime<Tz>) -> bool {
        let local = timestamp.naive_local();
        let Some(day) = self.day_schedule_on(local.date()) else {
            return false;
        };
        [Period::Morning, Period::Afternoon]
            .into_iter()
            .any(|period| Self::within(day, period, local.time()))
    }

    fn within(day: &DaySchedule, period: Period, time: NaiveTime) -> bool {
        if !day.period_active(period) {
            return false;
        }
        match day.window(period) {
            (Some(from), Some(to)) => from.to_naive_time() <= time && time < to.to_naive_time(),
            _ => false,
        }
    }
}

/// Current time at the venue.
pub fn venue_now(timezone: Tz) -> DateTime<Tz> {
    Local::now().with_timezone(&timezone)
}
