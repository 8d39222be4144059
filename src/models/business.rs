//! Business model and weekly operating-hours configuration.
//!
//! A business is the booking tenant: it owns a timezone, a resource
//! capacity (number of stations that can serve clients simultaneously),
//! and a per-weekday schedule configuration.
//!
//! # Schedule Configuration
//! Stored as a weekday-keyed map of `{open, close, enabled}` entries,
//! serialized with lowercase day names (`"monday"`…`"sunday"`) to stay
//! compatible with configuration persisted as JSON. Time values are
//! `HH:MM` strings; they are parsed and validated by the resolver, not
//! here, so a malformed entry surfaces as an error for the affected day
//! rather than corrupting the whole record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use chrono_tz::Tz;
use tracing::warn;

/// Default opening time for a synthesized schedule.
pub const DEFAULT_OPEN: &str = "09:00";
/// Default closing time for a synthesized schedule.
pub const DEFAULT_CLOSE: &str = "20:00";

/// Day of week, Monday-start.
///
/// Serializes to the lowercase day name so it can key a JSON schedule
/// configuration directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lowercase day name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Operating hours for a single weekday.
///
/// `open`/`close` are `HH:MM` strings; a missing field deserializes to
/// the named defaults. A missing `enabled` flag means the day is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    /// Opening time, `HH:MM`.
    #[serde(default = "default_open")]
    pub open: String,
    /// Closing time, `HH:MM`.
    #[serde(default = "default_close")]
    pub close: String,
    /// Whether bookings are accepted on this day.
    #[serde(default)]
    pub enabled: bool,
}

fn default_open() -> String {
    DEFAULT_OPEN.to_string()
}

fn default_close() -> String {
    DEFAULT_CLOSE.to_string()
}

impl DayHours {
    /// Creates enabled hours.
    pub fn open(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            enabled: true,
        }
    }

    /// Creates a closed day with the default times.
    pub fn closed() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
            enabled: false,
        }
    }
}

/// Weekly schedule configuration.
///
/// Map of weekday to operating hours. An empty configuration means the
/// business has never been configured; the resolver substitutes
/// [`ScheduleConfig::default_schedule`] in that case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleConfig {
    days: HashMap<Weekday, DayHours>,
}

impl ScheduleConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The synthesized default: 09:00–20:00 every day, Sunday closed.
    ///
    /// This is the one hard-coded schedule policy in the crate; existing
    /// deployments depend on it, so it must not drift.
    pub fn default_schedule() -> Self {
        let mut days = HashMap::new();
        for day in Weekday::ALL {
            let hours = if day == Weekday::Sunday {
                DayHours::closed()
            } else {
                DayHours::open(DEFAULT_OPEN, DEFAULT_CLOSE)
            };
            days.insert(day, hours);
        }
        Self { days }
    }

    /// Whether no day has been configured.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Hours for a day, if configured.
    pub fn day(&self, day: Weekday) -> Option<&DayHours> {
        self.days.get(&day)
    }

    /// Sets hours for a day.
    pub fn set_day(&mut self, day: Weekday, hours: DayHours) {
        self.days.insert(day, hours);
    }

    /// Adds enabled hours for a day.
    pub fn with_hours(
        mut self,
        day: Weekday,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.days.insert(day, DayHours::open(open, close));
        self
    }

    /// Marks a day closed.
    pub fn with_closed(mut self, day: Weekday) -> Self {
        self.days.insert(day, DayHours::closed());
        self
    }
}

/// A bookable business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    /// Unique business identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// IANA timezone name (e.g. `America/Monterrey`). Resolved lazily;
    /// an unknown name degrades to a fallback zone rather than failing.
    pub timezone: String,
    /// Number of stations that can serve clients simultaneously.
    pub capacity: u32,
    /// Weekly operating hours.
    pub schedule: ScheduleConfig,
}

impl Business {
    /// Creates a business with capacity 1, UTC timezone, and an empty
    /// schedule (which resolves to the default schedule).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            timezone: "UTC".to_string(),
            capacity: 1,
            schedule: ScheduleConfig::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the IANA timezone name.
    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = tz.into();
        self
    }

    /// Sets the simultaneous-station capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the whole schedule configuration.
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    /// Adds enabled hours for a day.
    pub fn with_hours(
        mut self,
        day: Weekday,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.schedule.set_day(day, DayHours::open(open, close));
        self
    }

    /// Marks a day closed.
    pub fn with_closed(mut self, day: Weekday) -> Self {
        self.schedule.set_day(day, DayHours::closed());
        self
    }

    /// Resolves the configured timezone name.
    ///
    /// Returns the zone plus a degraded-mode flag: `true` means the name
    /// could not be resolved and `fallback` was substituted. The
    /// substitution is logged at `warn` level; it is never a hard failure.
    pub fn resolve_timezone(&self, fallback: Tz) -> (Tz, bool) {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => (tz, false),
            Err(_) => {
                warn!(
                    business = %self.id,
                    timezone = %self.timezone,
                    fallback = %fallback,
                    "unresolvable timezone, substituting fallback"
                );
                (fallback, true)
            }
        }
    }
}
