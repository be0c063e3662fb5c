use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::weekday::IsoWeekday;

/// Calendar days picked in the date widget, in the order they were picked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedDates {
    dates: Vec<NaiveDate>,
}

impl SelectedDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicates after the first occurrence are dropped.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        let mut selected = Self::new();
        for date in dates {
            selected.insert(date);
        }
        selected
    }

    /// Returns `false` if the date was already selected.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        if self.contains(date) {
            return false;
        }
        self.dates.push(date);
        true
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        let before = self.dates.len();
        self.dates.retain(|selected| *selected != date);
        before != self.dates.len()
    }

    /// Calendar click: selects the date, or deselects it if it was already selected.
    pub fn toggle(&mut self, date: NaiveDate) {
        if !self.remove(date) {
            self.dates.push(date);
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn weekdays(&self) -> BTreeSet<IsoWeekday> {
        self.dates.iter().map(|date| IsoWeekday::of(*date)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekdayGroup {
    pub weekday: IsoWeekday,
    /// Dates falling on `weekday`, in selection order.
    pub dates: Vec<NaiveDate>,
}

/// Partitions dates by weekday. Groups come back Monday to Sunday whatever the input order.
pub fn group_by_weekday(dates: &[NaiveDate]) -> Vec<WeekdayGroup> {
    let mut groups: BTreeMap<IsoWeekday, Vec<NaiveDate>> = BTreeMap::new();
    for date in dates {
        groups.entry(IsoWeekday::of(*date)).or_default().push(*date);
    }
    groups
        .into_iter()
        .map(|(weekday, dates)| WeekdayGroup { weekday, dates })
        .collect()
}
