use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::view::EditorView;
use crate::{
    error::ScheduleError,
    timing::{
        daily::{Period, TimeField},
        grouping::{group_by_weekday, SelectedDates, WeekdayGroup},
        schedule::{reduce, ScheduleAction, ScheduleMap, SchedulePayload},
        time_slot::TimeSlot,
        weekday::{IsoWeekday, Locale},
    },
};

/// What happens to a weekday's settings once no selected date falls on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleEntryPolicy {
    /// Keep the settings in memory, out of the snapshot, until dates for that weekday come back.
    #[default]
    Retain,
    /// Forget them as soon as the selection changes.
    Prune,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorOptions {
    pub locale: Locale,
    pub validate_ranges: bool,
    pub stale_entries: StaleEntryPolicy,
}

/// The recurring availability editor.
///
/// Owns the selected dates and the schedule being edited. Every dispatched action
/// calls `on_change` once, synchronously, with the full snapshot for the weekdays
/// currently selected.
pub struct ScheduleEditor<'a> {
    options: EditorOptions,
    selection: SelectedDates,
    groups: Vec<WeekdayGroup>,
    schedule: ScheduleMap,
    on_change: Box<dyn FnMut(&ScheduleMap) + 'a>,
}

impl<'a> ScheduleEditor<'a> {
    pub fn new<F>(selection: SelectedDates, options: EditorOptions, on_change: F) -> Self
    where
        F: FnMut(&ScheduleMap) + 'a,
    {
        Self::with_schedule(selection, options, ScheduleMap::new(), on_change)
    }

    /// Starts from an existing schedule, e.g. one fetched from the backend.
    pub fn with_schedule<F>(
        selection: SelectedDates,
        options: EditorOptions,
        schedule: ScheduleMap,
        on_change: F,
    ) -> Self
    where
        F: FnMut(&ScheduleMap) + 'a,
    {
        let groups = group_by_weekday(selection.as_slice());
        let mut editor = Self {
            options,
            selection,
            groups,
            schedule,
            on_change: Box::new(on_change),
        };
        editor.apply_stale_policy();
        editor
    }

    pub fn groups(&self) -> &[WeekdayGroup] {
        &self.groups
    }

    /// Everything held in memory, including settings of weekdays no longer selected.
    pub fn retained(&self) -> &ScheduleMap {
        &self.schedule
    }

    /// The schedule restricted to weekdays present in the selection.
    pub fn snapshot(&self) -> ScheduleMap {
        self.schedule.restricted_to(&self.selection.weekdays())
    }

    /// Replaces the selection. Groups are recomputed; `on_change` is not called.
    pub fn set_selected_dates(&mut self, selection: SelectedDates) {
        self.selection = selection;
        self.groups = group_by_weekday(self.selection.as_slice());
        self.apply_stale_policy();
        debug!(
            dates = self.selection.len(),
            weekdays = self.groups.len(),
            "Selection changed"
        );
    }

    pub fn toggle_date(&mut self, date: NaiveDate) {
        let mut selection = self.selection.clone();
        selection.toggle(date);
        self.set_selected_dates(selection);
    }

    fn apply_stale_policy(&mut self) {
        if self.options.stale_entries == StaleEntryPolicy::Prune {
            self.schedule.retain(&self.selection.weekdays());
        }
    }

    pub fn dispatch(&mut self, action: ScheduleAction) {
        self.schedule = reduce(&self.schedule, &action);
        let snapshot = self.snapshot();
        (self.on_change)(&snapshot);
    }

    pub fn toggle_day(&mut self, weekday: IsoWeekday) {
        self.dispatch(ScheduleAction::ToggleDay { weekday });
    }

    pub fn toggle_period(&mut self, weekday: IsoWeekday, period: Period) {
        self.dispatch(ScheduleAction::TogglePeriod { weekday, period });
    }

    pub fn set_time(&mut self, weekday: IsoWeekday, field: TimeField, value: TimeSlot) {
        self.dispatch(ScheduleAction::SetTime {
            weekday,
            field,
            value,
        });
    }

    pub fn view(&self) -> EditorView {
        EditorView::build(&self.groups, &self.schedule, self.options.locale)
    }

    /// The snapshot in wire form. Checks time ranges first when `validate_ranges` is set.
    pub fn payload(&self) -> Result<SchedulePayload, ScheduleError> {
        let snapshot = self.snapshot();
        if self.options.validate_ranges {
            if let Err(err) = snapshot.validate_ranges() {
                warn!(%err, "Schedule rejected");
                return Err(err);
            }
        }
        Ok(SchedulePayload::new(self.options.locale, snapshot))
    }
}
