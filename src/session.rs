use std::{fs, path::Path};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::{
    editor::{EditorOptions, ScheduleEditor},
    error::{ConfigError, ScheduleError},
    timing::{
        grouping::SelectedDates,
        schedule::{ScheduleAction, ScheduleMap, SchedulePayload},
    },
};

/// A recorded editing session: the picked dates, then the grid actions in order.
///
/// ```json
/// {
///     "dates": ["2024-01-01", "2024-01-03"],
///     "actions": [{ "type": "togglePeriod", "weekday": "monday", "period": "morning" }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub actions: Vec<ScheduleAction>,
}

impl Session {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Runs every action through an editor seeded with `initial` and returns the resulting payload.
    pub fn replay(
        &self,
        options: EditorOptions,
        initial: ScheduleMap,
    ) -> Result<SchedulePayload, ScheduleError> {
        let mut notifications = 0usize;
        let mut editor = ScheduleEditor::with_schedule(
            SelectedDates::from_dates(self.dates.iter().copied()),
            options,
            initial,
            |_| notifications += 1,
        );
        for action in &self.actions {
            editor.dispatch(*action);
        }
        let payload = editor.payload();
        drop(editor);
        info!(actions = self.actions.len(), notifications, "Session replayed");
        payload
    }
}
