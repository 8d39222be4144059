//! Slot value object.
//!
//! A slot is a candidate appointment start in the business's timezone.
//! Slots are generated on demand and never persisted; the end is always
//! implicitly `start + duration`.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::Serialize;

/// A bookable candidate start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    start: DateTime<Tz>,
    duration_minutes: u32,
}

impl Slot {
    /// Creates a slot from a timezone-aware start and a service duration.
    pub fn new(start: DateTime<Tz>, duration_minutes: u32) -> Self {
        Self {
            start,
            duration_minutes,
        }
    }

    /// The start instant, in the business's timezone.
    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    /// The implicit end instant.
    pub fn end(&self) -> DateTime<Tz> {
        self.start + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Service duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Local wall-clock label, `HH:MM`. The usual pick-a-time rendering.
    pub fn time_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    /// Local timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp(&self) -> String {
        self.start.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Monterrey;

    #[test]
    fn test_slot_rendering() {
        let start = Monterrey.with_ymd_and_hms(2026, 3, 2, 9, 15, 0).unwrap();
        let slot = Slot::new(start, 45);
        assert_eq!(slot.time_label(), "09:15");
        assert_eq!(slot.timestamp(), "2026-03-02 09:15:00");
    }

    #[test]
    fn test_slot_implicit_end() {
        let start = Monterrey.with_ymd_and_hms(2026, 3, 2, 19, 30, 0).unwrap();
        let slot = Slot::new(start, 45);
        assert_eq!(
            slot.end(),
            Monterrey.with_ymd_and_hms(2026, 3, 2, 20, 15, 0).unwrap()
        );
    }
}
