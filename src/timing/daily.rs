use serde::{Deserialize, Serialize};

use super::time_slot::{slot_or_empty, TimeSlot};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
}

/// One of the four time selectors of a day row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeField {
    MorningFrom,
    MorningTo,
    AfternoonFrom,
    AfternoonTo,
}

impl TimeField {
    pub fn period(&self) -> Period {
        match self {
            TimeField::MorningFrom | TimeField::MorningTo => Period::Morning,
            TimeField::AfternoonFrom | TimeField::AfternoonTo => Period::Afternoon,
        }
    }
}

/// Opening state and time windows for one weekday.
///
/// `enabled` is forced on whenever a period or a time is touched. Turning the day
/// off keeps the period flags and times so they come back on re-enable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub enabled: bool,
    pub morning_enabled: bool,
    #[serde(with = "slot_or_empty", default)]
    pub morning_from: Option<TimeSlot>,
    #[serde(with = "slot_or_empty", default)]
    pub morning_to: Option<TimeSlot>,
    pub afternoon_enabled: bool,
    #[serde(with = "slot_or_empty", default)]
    pub afternoon_from: Option<TimeSlot>,
    #[serde(with = "slot_or_empty", default)]
    pub afternoon_to: Option<TimeSlot>,
}

impl DaySchedule {
    pub fn new_closed() -> Self {
        Self::default()
    }

    pub fn period_enabled(&self, period: Period) -> bool {
        match period {
            Period::Morning => self.morning_enabled,
            Period::Afternoon => self.afternoon_enabled,
        }
    }

    /// The `(from, to)` pair of a period, regardless of whether it is enabled.
    pub fn window(&self, period: Period) -> (Option<TimeSlot>, Option<TimeSlot>) {
        match period {
            Period::Morning => (self.morning_from, self.morning_to),
            Period::Afternoon => (self.afternoon_from, self.afternoon_to),
        }
    }

    /// A period counts as active only when both the day and the period are switched on.
    pub fn period_active(&self, period: Period) -> bool {
        self.enabled && self.period_enabled(period)
    }

    pub fn time(&self, field: TimeField) -> Option<TimeSlot> {
        match field {
            TimeField::MorningFrom => self.morning_from,
            TimeField::MorningTo => self.morning_to,
            TimeField::AfternoonFrom => self.afternoon_from,
            TimeField::AfternoonTo => self.afternoon_to,
        }
    }

    pub(crate) fn toggle_day(&mut self) {
        self.enabled = !self.enabled;
    }

    pub(crate) fn toggle_period(&mut self, period: Period) {
        self.enabled = true;
        match period {
            Period::Morning => self.morning_enabled = !self.morning_enabled,
            Period::Afternoon => self.afternoon_enabled = !self.afternoon_enabled,
        }
    }

    pub(crate) fn set_time(&mut self, field: TimeField, slot: TimeSlot) {
        self.enabled = true;
        let target = match field {
            TimeField::MorningFrom => &mut self.morning_from,
            TimeField::MorningTo => &mut self.morning_to,
            TimeField::AfternoonFrom => &mut self.afternoon_from,
            TimeField::AfternoonTo => &mut self.afternoon_to,
        };
        *target = Some(slot);
    }
}
