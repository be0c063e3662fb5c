use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use tracing::debug;

use super::{
    daily::{DaySchedule, Period, TimeField},
    time_slot::TimeSlot,
    weekday::{IsoWeekday, Locale},
};
use crate::error::{RangeViolation, ScheduleError};

/// The weekly schedule: one `DaySchedule` per weekday that has been configured.
///
/// Iteration always runs Monday to Sunday.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleMap {
    days: BTreeMap<IsoWeekday, DaySchedule>,
}

/// A user action on the schedule grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScheduleAction {
    ToggleDay {
        weekday: IsoWeekday,
    },
    TogglePeriod {
        weekday: IsoWeekday,
        period: Period,
    },
    SetTime {
        weekday: IsoWeekday,
        field: TimeField,
        value: TimeSlot,
    },
}

impl ScheduleAction {
    pub fn weekday(&self) -> IsoWeekday {
        match self {
            ScheduleAction::ToggleDay { weekday }
            | ScheduleAction::TogglePeriod { weekday, .. }
            | ScheduleAction::SetTime { weekday, .. } => *weekday,
        }
    }
}

/// Applies one action and returns the next schedule. The input is left untouched.
///
/// A weekday that has never been touched starts from a closed `DaySchedule`.
pub fn reduce(state: &ScheduleMap, action: &ScheduleAction) -> ScheduleMap {
    let mut next = state.clone();
    let day = next.days.entry(action.weekday()).or_default();
    match *action {
        ScheduleAction::ToggleDay { .. } => day.toggle_day(),
        ScheduleAction::TogglePeriod { period, .. } => day.toggle_period(period),
        ScheduleAction::SetTime { field, value, .. } => day.set_time(field, value),
    }
    debug!(?action, day = ?next.days.get(&action.weekday()), "Schedule updated");
    next
}

impl ScheduleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, action: &ScheduleAction) -> ScheduleMap {
        reduce(self, action)
    }

    pub fn get(&self, weekday: IsoWeekday) -> Option<&DaySchedule> {
        self.days.get(&weekday)
    }

    pub fn insert(&mut self, weekday: IsoWeekday, day: DaySchedule) -> Option<DaySchedule> {
        self.days.insert(weekday, day)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IsoWeekday, &DaySchedule)> {
        self.days.iter().map(|(weekday, day)| (*weekday, day))
    }

    pub fn weekdays(&self) -> impl Iterator<Item = IsoWeekday> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Copy of the schedule restricted to `weekdays`.
    pub fn restricted_to(&self, weekdays: &BTreeSet<IsoWeekday>) -> ScheduleMap {
        Self {
            days: self
                .days
                .iter()
                .filter(|(weekday, _)| weekdays.contains(weekday))
                .map(|(weekday, day)| (*weekday, *day))
                .collect(),
        }
    }

    pub(crate) fn retain(&mut self, weekdays: &BTreeSet<IsoWeekday>) {
        self.days.retain(|weekday, _| weekdays.contains(weekday));
    }

    /// Every active period whose start is not strictly before its end.
    ///
    /// Periods with a missing endpoint are not checked.
    pub fn range_violations(&self) -> Vec<RangeViolation> {
        let mut violations = Vec::new();
        for (weekday, day) in self.iter() {
            for period in [Period::Morning, Period::Afternoon] {
                if !day.period_active(period) {
                    continue;
                }
                if let (Some(from), Some(to)) = day.window(period) {
                    if from >= to {
                        violations.push(RangeViolation {
                            weekday,
                            period,
                            from,
                            to,
                        });
                    }
                }
            }
        }
        violations
    }

    pub fn validate_ranges(&self) -> Result<(), ScheduleError> {
        let violations = self.range_violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::InvalidRanges(violations))
        }
    }

    /// Parses a schedule keyed by localized weekday names, as the backend returns it.
    ///
    /// Labels match case-insensitively, so two keys naming the same weekday are rejected.
    pub fn from_localized(
        locale: Locale,
        days: HashMap<String, DaySchedule>,
    ) -> Result<Self, ScheduleError> {
        let mut schedule = Self::new();
        for (label, day) in days {
            let weekday = locale.parse_weekday(&label)?;
            if schedule.insert(weekday, day).is_some() {
                return Err(ScheduleError::DuplicateWeekday(label));
            }
        }
        Ok(schedule)
    }
}

/// A schedule as it goes over the wire: keyed by localized weekday names,
/// Monday first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulePayload {
    locale: Locale,
    schedule: ScheduleMap,
}

impl SchedulePayload {
    pub fn new(locale: Locale, schedule: ScheduleMap) -> Self {
        Self { locale, schedule }
    }

    pub fn schedule(&self) -> &ScheduleMap {
        &self.schedule
    }
}

impl Serialize for SchedulePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.schedule.len()))?;
        for (weekday, day) in self.schedule.iter() {
            map.serialize_entry(self.locale.weekday_label(weekday), day)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(label: &str) -> TimeSlot {
        label.parse().unwrap()
    }

    #[test]
    fn toggle_period_from_empty_enables_day() {
        let schedule = ScheduleMap::new().apply(&ScheduleAction::TogglePeriod {
            weekday: IsoWeekday::Monday,
            period: Period::Afternoon,
        });
        assert_eq!(
            schedule.get(IsoWeekday::Monday),
            Some(&DaySchedule {
                enabled: true,
                morning_enabled: false,
                morning_from: None,
                morning_to: None,
                afternoon_enabled: true,
                afternoon_from: None,
                afternoon_to: None,
            })
        );
    }

    #[test]
    fn toggle_day_twice_restores_state() {
        let start = ScheduleMap::new()
            .apply(&ScheduleAction::TogglePeriod {
                weekday: IsoWeekday::Friday,
                period: Period::Morning,
            })
            .apply(&ScheduleAction::SetTime {
                weekday: IsoWeekday::Friday,
                field: TimeField::MorningFrom,
                value: slot("09:00"),
            });
        let toggle = ScheduleAction::ToggleDay {
            weekday: IsoWeekday::Friday,
        };
        let off = start.apply(&toggle);
        assert!(!off.get(IsoWeekday::Friday).unwrap().enabled);
        assert!(off.get(IsoWeekday::Friday).unwrap().morning_enabled);
        assert_eq!(off.apply(&toggle), start);
    }

    #[test]
    fn fresh_day_toggles_on_without_periods() {
        let schedule = ScheduleMap::new().apply(&ScheduleAction::ToggleDay {
            weekday: IsoWeekday::Tuesday,
        });
        let day = schedule.get(IsoWeekday::Tuesday).unwrap();
        assert!(day.enabled);
        assert!(!day.morning_enabled);
        assert!(!day.afternoon_enabled);
    }

    #[test]
    fn toggle_period_on_disabled_day_reenables_it() {
        let schedule = ScheduleMap::new()
            .apply(&ScheduleAction::TogglePeriod {
                weekday: IsoWeekday::Monday,
                period: Period::Morning,
            })
            .apply(&ScheduleAction::ToggleDay {
                weekday: IsoWeekday::Monday,
            })
            .apply(&ScheduleAction::TogglePeriod {
                weekday: IsoWeekday::Monday,
                period: Period::Morning,
            });
        let day = schedule.get(IsoWeekday::Monday).unwrap();
        assert!(day.enabled);
        // The period flag flipped back off; the day stays on.
        assert!(!day.morning_enabled);
    }

    #[test]
    fn set_time_touches_only_its_field() {
        let start = ScheduleMap::new()
            .apply(&ScheduleAction::SetTime {
                weekday: IsoWeekday::Saturday,
                field: TimeField::AfternoonTo,
                value: slot("18:00"),
            })
            .apply(&ScheduleAction::TogglePeriod {
                weekday: IsoWeekday::Sunday,
                period: Period::Morning,
            });
        let next = start.apply(&ScheduleAction::SetTime {
            weekday: IsoWeekday::Saturday,
            field: TimeField::MorningFrom,
            value: slot("10:00"),
        });

        assert_eq!(next.get(IsoWeekday::Sunday), start.get(IsoWeekday::Sunday));
        let before = start.get(IsoWeekday::Saturday).unwrap();
        let after = next.get(IsoWeekday::Saturday).unwrap();
        assert_eq!(after.morning_from, Some(slot("10:00")));
        assert_eq!(after.afternoon_to, before.afternoon_to);
        assert_eq!(after.afternoon_from, before.afternoon_from);
        assert_eq!(after.afternoon_enabled, before.afternoon_enabled);
        assert!(after.enabled);
    }

    #[test]
    fn reversed_and_empty_ranges_are_violations() {
        let schedule = ScheduleMap::new()
            .apply(&ScheduleAction::TogglePeriod {
                weekday: IsoWeekday::Monday,
                period: Period::Morning,
            })
            .apply(&ScheduleAction::SetTime {
                weekday: IsoWeekday::Monday,
                field: TimeField::MorningFrom,
                value: slot("12:00"),
            })
            .apply(&ScheduleAction::SetTime {
                weekday: IsoWeekday::Monday,
                field: TimeField::MorningTo,
                value: slot("09:00"),
            })
            // Afternoon window set but the period is off: not checked.
            .apply(&ScheduleAction::SetTime {
                weekday: IsoWeekday::Monday,
                field: TimeField::AfternoonFrom,
                value: slot("17:00"),
            })
            .apply(&ScheduleAction::SetTime {
                weekday: IsoWeekday::Monday,
                field: TimeField::AfternoonTo,
                value: slot("14:00"),
            });

        let violations = schedule.range_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].period, Period::Morning);
        assert!(matches!(
            schedule.validate_ranges(),
            Err(ScheduleError::InvalidRanges(_))
        ));
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: ScheduleAction = serde_json::from_str(
            r#"{"type":"setTime","weekday":"wednesday","field":"morningTo","value":"11:30"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            ScheduleAction::SetTime {
                weekday: IsoWeekday::Wednesday,
                field: TimeField::MorningTo,
                value: slot("11:30"),
            }
        );
    }

    #[test]
    fn payload_is_keyed_by_localized_label_in_week_order() {
        let schedule = ScheduleMap::new()
            .apply(&ScheduleAction::ToggleDay {
                weekday: IsoWeekday::Wednesday,
            })
            .apply(&ScheduleAction::ToggleDay {
                weekday: IsoWeekday::Monday,
            });
        let json =
            serde_json::to_string(&SchedulePayload::new(Locale::Fr, schedule.clone())).unwrap();
        let lundi = json.find("\"lundi\"").unwrap();
        let mercredi = json.find("\"mercredi\"").unwrap();
        assert!(lundi < mercredi);

        let parsed: HashMap<String, DaySchedule> = serde_json::from_str(&json).unwrap();
        assert_eq!(ScheduleMap::from_localized(Locale::Fr, parsed).unwrap(), schedule);
    }

    #[test]
    fn localized_keys_naming_the_same_weekday_are_rejected() {
        let open = DaySchedule {
            enabled: true,
            ..DaySchedule::default()
        };
        for _ in 0..20 {
            let days = HashMap::from([
                ("lundi".to_string(), open),
                ("LUNDI".to_string(), DaySchedule::new_closed()),
            ]);
            assert!(matches!(
                ScheduleMap::from_localized(Locale::Fr, days),
                Err(ScheduleError::DuplicateWeekday(_))
            ));
        }
    }
}
