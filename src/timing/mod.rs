pub mod daily;
pub mod grouping;
pub mod overrides;
pub mod schedule;
pub mod time_slot;
pub mod weekday;
