pub mod editor;
pub mod view;

pub use editor::{EditorOptions, ScheduleEditor, StaleEntryPolicy};
pub use view::{DayRow, EditorView, PeriodCell};
