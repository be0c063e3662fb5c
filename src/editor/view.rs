use chrono::NaiveDate;

use crate::timing::{
    daily::{DaySchedule, Period},
    grouping::WeekdayGroup,
    schedule::ScheduleMap,
    time_slot::{afternoon_options, morning_options, TimeSlot},
    weekday::{IsoWeekday, Locale},
};

/// What the editor grid shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorView {
    /// No dates picked yet: show a placeholder instead of the grid.
    NoDatesSelected,
    Grid(Vec<DayRow>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayRow {
    pub weekday: IsoWeekday,
    pub label: &'static str,
    pub dates: Vec<NaiveDate>,
    pub enabled: bool,
    pub morning: PeriodCell,
    pub afternoon: PeriodCell,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeriodCell {
    /// Time selectors are hidden; an empty cell keeps the grid aligned.
    Gap { checked: bool },
    Selectors {
        from: Option<TimeSlot>,
        to: Option<TimeSlot>,
        options: &'static [TimeSlot],
    },
}

impl PeriodCell {
    fn build(day: &DaySchedule, period: Period) -> Self {
        if !day.period_active(period) {
            return PeriodCell::Gap {
                checked: day.period_enabled(period),
            };
        }
        let (from, to) = day.window(period);
        let options = match period {
            Period::Morning => morning_options(),
            Period::Afternoon => afternoon_options(),
        };
        PeriodCell::Selectors { from, to, options }
    }

    pub fn shows_selectors(&self) -> bool {
        matches!(self, PeriodCell::Selectors { .. })
    }
}

impl EditorView {
    pub fn build(groups: &[WeekdayGroup], schedule: &ScheduleMap, locale: Locale) -> Self {
        if groups.is_empty() {
            return EditorView::NoDatesSelected;
        }
        let rows = groups
            .iter()
            .map(|group| {
                let day = schedule.get(group.weekday).copied().unwrap_or_default();
                DayRow {
                    weekday: group.weekday,
                    label: locale.weekday_label(group.weekday),
                    dates: group.dates.clone(),
                    enabled: day.enabled,
                    morning: PeriodCell::build(&day, Period::Morning),
                    afternoon: PeriodCell::build(&day, Period::Afternoon),
                }
            })
            .collect();
        EditorView::Grid(rows)
    }

    pub fn rows(&self) -> &[DayRow] {
        match self {
            EditorView::NoDatesSelected => &[],
            EditorView::Grid(rows) => rows,
        }
    }
}
