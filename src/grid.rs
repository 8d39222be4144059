//! Candidate slot grid.
//!
//! Generates the ordered sequence of candidate start times covering an
//! operating window. Candidates begin at the window start and advance on
//! a fixed grid (15 minutes by default); a candidate is valid only while
//! `candidate + duration <= window_end`, and generation stops at the
//! first candidate that no longer fits.
//!
//! Granularity and service duration are independent: a 45-minute service
//! on a 15-minute grid yields overlapping candidates 15 minutes apart.
//! That is intentional — it maximizes packing and leaves admission
//! entirely to the capacity check, not to grid spacing.

use chrono::{DateTime, Duration, TimeZone};

/// Grid spacing between candidate starts, in minutes.
pub const GRID_MINUTES: i64 = 15;

/// Iterator over candidate starts within an operating window.
///
/// Pure function of its inputs: no hidden state, strictly increasing,
/// restartable by constructing it again.
///
/// # Examples
///
/// ```
/// use bookable::grid::SlotGrid;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let open = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
/// let close = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
/// let starts: Vec<_> = SlotGrid::new(open, close, Duration::minutes(30))
///     .map(|s| s.format("%H:%M").to_string())
///     .collect();
/// assert_eq!(starts, ["09:00", "09:15", "09:30"]);
/// ```
#[derive(Debug, Clone)]
pub struct SlotGrid<Tz: TimeZone> {
    cursor: DateTime<Tz>,
    window_end: DateTime<Tz>,
    duration: Duration,
    step: Duration,
}

impl<Tz: TimeZone> SlotGrid<Tz> {
    /// Creates a grid over `[window_start, window_end]` for a service of
    /// the given duration, with the default 15-minute spacing.
    pub fn new(window_start: DateTime<Tz>, window_end: DateTime<Tz>, duration: Duration) -> Self {
        Self {
            cursor: window_start,
            window_end,
            duration,
            step: Duration::minutes(GRID_MINUTES),
        }
    }

    /// Overrides the grid spacing. Must be positive.
    pub fn with_granularity(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }
}

impl<Tz: TimeZone> Iterator for SlotGrid<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<DateTime<Tz>> {
        if self.step <= Duration::zero() {
            return None;
        }
        if self.cursor.clone() + self.duration > self.window_end {
            return None;
        }
        let candidate = self.cursor.clone();
        self.cursor = self.cursor.clone() + self.step;
        Some(candidate)
    }
}
