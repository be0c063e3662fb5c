//! Recurring availability schedule for bookable prestations.
//!
//! A venue's opening hours are described per weekday, each with an optional
//! morning and afternoon window, and edited from a set of calendar dates picked
//! by the user. The result is sent to the booking backend.

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod logger;
pub mod session;
pub mod timing;
