//! Operating-window resolution.
//!
//! Turns a business's weekly schedule configuration into a concrete
//! window for one weekday: enabled flag plus parsed open/close times.
//!
//! # Rules
//! - An empty configuration resolves against the synthesized default
//!   schedule (09:00–20:00, Sunday closed).
//! - A configuration that exists but has no entry for the day resolves
//!   to a closed window.
//! - Disabled days skip time parsing entirely — a stale malformed entry
//!   on a closed day cannot fail requests.
//! - On enabled days, malformed `HH:MM` strings and inverted windows are
//!   configuration errors, never guessed around.

use chrono::NaiveTime;

use crate::error::{Error, Result};
use crate::models::{DayHours, ScheduleConfig, Weekday};

/// Resolved operating window for one weekday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayWindow {
    /// Whether bookings are accepted on this day.
    pub enabled: bool,
    /// Opening time (local wall clock).
    pub open: NaiveTime,
    /// Closing time (local wall clock). Always after `open` when enabled.
    pub close: NaiveTime,
}

impl DayWindow {
    /// A closed window.
    pub fn closed() -> Self {
        Self {
            enabled: false,
            open: NaiveTime::MIN,
            close: NaiveTime::MIN,
        }
    }
}

/// Resolves the operating window for `day`.
///
/// An empty `config` falls back to [`ScheduleConfig::default_schedule`];
/// a missing day entry means the day is closed.
pub fn resolve(config: &ScheduleConfig, day: Weekday) -> Result<DayWindow> {
    if config.is_empty() {
        let default = ScheduleConfig::default_schedule();
        return resolve_entry(default.day(day), day);
    }
    resolve_entry(config.day(day), day)
}

fn resolve_entry(hours: Option<&DayHours>, day: Weekday) -> Result<DayWindow> {
    let Some(hours) = hours else {
        return Ok(DayWindow::closed());
    };
    if !hours.enabled {
        return Ok(DayWindow::closed());
    }

    let open = parse_hhmm(&hours.open, day)?;
    let close = parse_hhmm(&hours.close, day)?;
    if open >= close {
        return Err(Error::EmptyWindow {
            day,
            open: hours.open.clone(),
            close: hours.close.clone(),
        });
    }

    Ok(DayWindow {
        enabled: true,
        open,
        close,
    })
}

/// Parses a strict `HH:MM` time string.
fn parse_hhmm(value: &str, day: Weekday) -> Result<NaiveTime> {
    let invalid = || Error::InvalidScheduleTime {
        day,
        value: value.to_string(),
    };

    let (hh, mm) = value.split_once(':').ok_or_else(|| invalid())?;
    let hour: u32 = hh.parse().map_err(|_| invalid())?;
    let minute: u32 = mm.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| invalid())
}
