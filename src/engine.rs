//! Availability orchestration.
//!
//! Ties the resolver, grid, and capacity check together for the two
//! operations callers actually need: list the bookable slots on a date,
//! and re-validate one exact slot immediately before committing a
//! booking.
//!
//! # Purity
//!
//! The engine performs no I/O. Existing commitments arrive as an
//! eagerly-materialized slice (the caller's snapshot of its day query),
//! and "now" comes from an injected [`Clock`], so every computation is
//! deterministic and safe to run concurrently.
//!
//! # Booking Contract
//!
//! [`AvailabilityEngine::is_slot_available`] is a *necessary, not
//! sufficient* precondition for booking. Between a `true` answer and the
//! caller persisting the commitment, a concurrent request can observe
//! the same answer for the same interval. The commit path must re-check
//! capacity under a storage-level guard (serializable transaction or an
//! exclusion constraint); relying on the pre-check alone can overbook.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::capacity::has_capacity;
use crate::error::{Error, Result};
use crate::grid::SlotGrid;
use crate::models::{Business, Commitment, Service, Slot, Weekday};
use crate::resolver::resolve;

/// Source of the current instant.
///
/// Injected so tests (and replaying callers) can pin "now" to a fixed
/// point instead of depending on the host clock.
pub trait Clock {
    /// The current instant.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall-clock time source for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parses a caller-supplied `YYYY-MM-DD` date at the boundary.
///
/// Unparsable input is rejected before it can reach the engine.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(format!("{value:?} is not a YYYY-MM-DD date")))
}

/// The availability engine.
///
/// # Examples
///
/// ```
/// use bookable::engine::{AvailabilityEngine, FixedClock};
/// use bookable::models::{Business, Service, Weekday};
/// use chrono::{TimeZone, Utc};
///
/// let business = Business::new("shop")
///     .with_timezone("America/Monterrey")
///     .with_capacity(2)
///     .with_hours(Weekday::Monday, "09:00", "20:00");
/// let service = Service::new("cut", 30);
///
/// // Pin "now" well before opening on Monday 2026-03-02.
/// let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap());
/// let engine = AvailabilityEngine::new().with_clock(clock);
///
/// let date = bookable::engine::parse_date("2026-03-02").unwrap();
/// let slots = engine.list_available_slots(&business, &service, date, &[]).unwrap();
/// assert_eq!(slots.first().unwrap().time_label(), "09:00");
/// assert_eq!(slots.last().unwrap().time_label(), "19:30");
/// ```
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<C: Clock = SystemClock> {
    clock: C,
    fallback_tz: Tz,
}

impl AvailabilityEngine<SystemClock> {
    /// Creates an engine on the system clock with a UTC timezone fallback.
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            fallback_tz: Tz::UTC,
        }
    }
}

impl Default for AvailabilityEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> AvailabilityEngine<C> {
    /// Replaces the time source.
    pub fn with_clock<D: Clock>(self, clock: D) -> AvailabilityEngine<D> {
        AvailabilityEngine {
            clock,
            fallback_tz: self.fallback_tz,
        }
    }

    /// Sets the zone substituted when a business's timezone name cannot
    /// be resolved.
    pub fn with_fallback_timezone(mut self, tz: Tz) -> Self {
        self.fallback_tz = tz;
        self
    }

    /// Lists the bookable slots for `service` at `business` on `date`
    /// (the business's local calendar date), in ascending order.
    ///
    /// `commitments` is the caller's snapshot of that day's commitments;
    /// non-qualifying statuses are filtered here, so the raw day query
    /// result is fine.
    ///
    /// Every returned slot satisfies: its full interval lies within the
    /// day's operating window, it starts strictly after business-local
    /// now, and it does not push concurrent occupancy to capacity at any
    /// instant. Listed slots therefore re-validate `true` under
    /// [`is_slot_available`](Self::is_slot_available) against the same
    /// snapshot.
    pub fn list_available_slots(
        &self,
        business: &Business,
        service: &Service,
        date: NaiveDate,
        commitments: &[Commitment],
    ) -> Result<Vec<Slot>> {
        validate_inputs(business, service)?;

        let window = resolve(&business.schedule, Weekday::from(date.weekday()))?;
        if !window.enabled {
            return Ok(Vec::new());
        }

        let (tz, _) = business.resolve_timezone(self.fallback_tz);
        let window_start = local_datetime(tz, date, window.open)?;
        let window_end = local_datetime(tz, date, window.close)?;
        let now_local = self.clock.now_utc().with_timezone(&tz);
        let duration = Duration::minutes(i64::from(service.duration_minutes));

        debug!(
            business = %business.id,
            %date,
            open = %window.open,
            close = %window.close,
            capacity = business.capacity,
            "resolved operating window"
        );

        let mut slots = Vec::new();
        for candidate in SlotGrid::new(window_start, window_end, duration) {
            let end = candidate + duration;
            if !has_capacity(
                candidate.with_timezone(&Utc),
                end.with_timezone(&Utc),
                commitments,
                business.capacity,
            ) {
                continue;
            }
            // A slot that has already begun cannot be offered. Filtering
            // on the start (today and future dates alike) keeps every
            // listed slot in exact agreement with is_slot_available; on
            // past dates it rejects everything.
            if candidate > now_local {
                slots.push(Slot::new(candidate, service.duration_minutes));
            }
        }

        Ok(slots)
    }

    /// Re-validates one exact candidate start, as the final check before
    /// a booking is committed.
    ///
    /// Returns `true` only if `[start, start + duration)` fits under
    /// capacity, the local weekday is enabled, the local time-of-day
    /// lies in `[open, close)`, and `start` is strictly after
    /// business-local now. See the module docs for why a `true` answer
    /// alone must not authorize the insert.
    pub fn is_slot_available(
        &self,
        business: &Business,
        service: &Service,
        start: DateTime<Utc>,
        commitments: &[Commitment],
    ) -> Result<bool> {
        validate_inputs(business, service)?;

        let duration = Duration::minutes(i64::from(service.duration_minutes));
        let end = start + duration;

        if !has_capacity(start, end, commitments, business.capacity) {
            return Ok(false);
        }

        let (tz, _) = business.resolve_timezone(self.fallback_tz);
        let local_start = start.with_timezone(&tz);

        let window = resolve(&business.schedule, Weekday::from(local_start.weekday()))?;
        if !window.enabled {
            return Ok(false);
        }

        let time_of_day = local_start.time();
        if time_of_day < window.open || time_of_day >= window.close {
            return Ok(false);
        }

        if start <= self.clock.now_utc() {
            return Ok(false);
        }

        Ok(true)
    }
}

fn validate_inputs(business: &Business, service: &Service) -> Result<()> {
    if service.duration_minutes == 0 {
        return Err(Error::InvalidDuration(service.duration_minutes));
    }
    if business.capacity == 0 {
        return Err(Error::InvalidCapacity(business.capacity));
    }
    Ok(())
}

/// Attaches the business timezone to a local date + wall-clock time.
///
/// A wall-clock time skipped by a DST transition does not exist locally
/// and is rejected; an ambiguous (repeated) time takes the earliest
/// mapping.
fn local_datetime(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| Error::InvalidDate(format!("{date} {time} does not exist in {tz}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommitmentStatus;

    // America/Monterrey is UTC-6 year-round.
    const TZ: Tz = chrono_tz::America::Monterrey;

    fn shop() -> Business {
        Business::new("shop")
            .with_timezone("America/Monterrey")
            .with_capacity(1)
            .with_hours(Weekday::Monday, "09:00", "20:00")
            .with_closed(Weekday::Sunday)
    }

    fn local(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        TZ.with_ymd_and_hms(2026, 3, day, hour, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    /// Clock pinned before opening on Monday 2026-03-02.
    fn early_clock() -> FixedClock {
        FixedClock(local(2, 6, 0))
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn engine() -> AvailabilityEngine<FixedClock> {
        AvailabilityEngine::new().with_clock(early_clock())
    }

    fn labels(slots: &[Slot]) -> Vec<String> {
        slots.iter().map(Slot::time_label).collect()
    }

    #[test]
    fn test_full_open_day() {
        let slots = engine()
            .list_available_slots(&shop(), &Service::new("cut", 30), monday(), &[])
            .unwrap();
        // 09:00 through 19:30 on the 15-minute grid.
        assert_eq!(slots.len(), 43);
        assert_eq!(slots.first().unwrap().time_label(), "09:00");
        assert_eq!(slots.last().unwrap().time_label(), "19:30");
        assert!(slots.windows(2).all(|w| w[0].start() < w[1].start()));
    }

    #[test]
    fn test_disabled_day_is_empty() {
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let day = vec![Commitment::confirmed(local(8, 10, 0), local(8, 10, 30))];
        let slots = engine()
            .list_available_slots(&shop(), &Service::new("cut", 30), sunday, &day)
            .unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_booked_interval_excluded() {
        let day = vec![Commitment::confirmed(local(2, 10, 0), local(2, 10, 30))];
        let slots = engine()
            .list_available_slots(&shop(), &Service::new("cut", 30), monday(), &day)
            .unwrap();
        let labels = labels(&slots);
        // Everything overlapping [10:00,10:30) is gone; 10:30 is back-to-back.
        assert!(!labels.contains(&"09:45".to_string()));
        assert!(!labels.contains(&"10:00".to_string()));
        assert!(!labels.contains(&"10:15".to_string()));
        assert!(labels.contains(&"09:30".to_string()));
        assert!(labels.contains(&"10:30".to_string()));
    }

    #[test]
    fn test_capacity_two_partial_saturation() {
        let business = shop().with_capacity(2);
        let day = vec![
            Commitment::confirmed(local(2, 10, 0), local(2, 10, 30)),
            Commitment::confirmed(local(2, 10, 15), local(2, 10, 45)),
        ];
        let slots = engine()
            .list_available_slots(&business, &Service::new("cut", 30), monday(), &day)
            .unwrap();
        let labels = labels(&slots);
        // Saturated during [10:15,10:30): any 30-minute candidate touching
        // it is out, 10:30 onward is fine.
        assert!(!labels.contains(&"10:00".to_string()));
        assert!(!labels.contains(&"10:15".to_string()));
        assert!(labels.contains(&"09:45".to_string()));
        assert!(labels.contains(&"10:30".to_string()));
    }

    #[test]
    fn test_today_excludes_started_slots() {
        // Business-local now is 14:32 on the requested date.
        let engine = AvailabilityEngine::new().with_clock(FixedClock(local(2, 14, 32)));
        let slots = engine
            .list_available_slots(&shop(), &Service::new("cut", 30), monday(), &[])
            .unwrap();
        let labels = labels(&slots);
        // [14:30,15:00) has already begun; [14:45,15:15) has not.
        assert!(!labels.contains(&"14:30".to_string()));
        assert!(labels.contains(&"14:45".to_string()));
        assert_eq!(labels.first().unwrap(), "14:45");
    }

    #[test]
    fn test_past_date_is_empty() {
        let engine = AvailabilityEngine::new().with_clock(FixedClock(local(9, 12, 0)));
        let slots = engine
            .list_available_slots(&shop(), &Service::new("cut", 30), monday(), &[])
            .unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let day = vec![Commitment::confirmed(local(2, 11, 0), local(2, 12, 0))];
        let service = Service::new("cut", 45);
        let first = engine()
            .list_available_slots(&shop(), &service, monday(), &day)
            .unwrap();
        let second = engine()
            .list_available_slots(&shop(), &service, monday(), &day)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cancelled_commitments_do_not_block() {
        let day = vec![
            Commitment::confirmed(local(2, 10, 0), local(2, 10, 30))
                .with_status(CommitmentStatus::Cancelled),
        ];
        let slots = engine()
            .list_available_slots(&shop(), &Service::new("cut", 30), monday(), &day)
            .unwrap();
        assert!(labels(&slots).contains(&"10:00".to_string()));
    }

    #[test]
    fn test_is_slot_available_happy_path() {
        let ok = engine()
            .is_slot_available(&shop(), &Service::new("cut", 30), local(2, 10, 0), &[])
            .unwrap();
        assert!(ok);
    }

    #[test]
    fn test_is_slot_available_rejections() {
        let e = engine();
        let service = Service::new("cut", 30);
        let day = vec![Commitment::confirmed(local(2, 10, 0), local(2, 10, 30))];

        // Capacity conflict.
        assert!(!e
            .is_slot_available(&shop(), &service, local(2, 10, 15), &day)
            .unwrap());
        // Back-to-back is fine.
        assert!(e
            .is_slot_available(&shop(), &service, local(2, 10, 30), &day)
            .unwrap());
        // Disabled weekday (Sunday 2026-03-08).
        assert!(!e
            .is_slot_available(&shop(), &service, local(8, 10, 0), &[])
            .unwrap());
        // Before opening, at/after closing.
        assert!(!e
            .is_slot_available(&shop(), &service, local(2, 8, 45), &[])
            .unwrap());
        assert!(!e
            .is_slot_available(&shop(), &service, local(2, 20, 0), &[])
            .unwrap());
        // Not strictly after now.
        let late = AvailabilityEngine::new().with_clock(FixedClock(local(2, 10, 0)));
        assert!(!late
            .is_slot_available(&shop(), &service, local(2, 10, 0), &[])
            .unwrap());
    }

    #[test]
    fn test_list_agrees_with_single_slot_check() {
        let business = shop().with_capacity(2);
        let service = Service::new("color", 45);
        let day = vec![
            Commitment::confirmed(local(2, 9, 30), local(2, 10, 15)),
            Commitment::confirmed(local(2, 9, 45), local(2, 11, 0)),
            Commitment::block_until(local(2, 14, 0), local(2, 16, 0)),
            Commitment::confirmed(local(2, 15, 0), local(2, 15, 30)),
        ];
        let e = engine();

        let listed = e
            .list_available_slots(&business, &service, monday(), &day)
            .unwrap();
        let listed_starts: Vec<DateTime<Utc>> = listed
            .iter()
            .map(|s| s.start().with_timezone(&Utc))
            .collect();

        // Every grid candidate must evaluate the same way standalone.
        let open = local(2, 9, 0);
        let close = local(2, 20, 0);
        for candidate in SlotGrid::new(open, close, Duration::minutes(45)) {
            let listed_here = listed_starts.contains(&candidate);
            let standalone = e
                .is_slot_available(&business, &service, candidate, &day)
                .unwrap();
            assert_eq!(
                listed_here, standalone,
                "disagreement at {candidate}: listed={listed_here} standalone={standalone}"
            );
        }
    }

    #[test]
    fn test_stale_snapshot_is_not_a_booking_guarantee() {
        // Two concurrent requests read the same snapshot and both see the
        // slot as free; only a storage-level re-check catches the second.
        let e = engine();
        let service = Service::new("cut", 30);
        let snapshot: Vec<Commitment> = Vec::new();

        let first = e
            .is_slot_available(&shop(), &service, local(2, 10, 0), &snapshot)
            .unwrap();
        let second = e
            .is_slot_available(&shop(), &service, local(2, 10, 0), &snapshot)
            .unwrap();
        assert!(first && second); // the pre-check alone cannot prevent this

        // Re-checking against the committed state rejects the latecomer.
        let committed = vec![Commitment::appointment(local(2, 10, 0), local(2, 10, 30))];
        assert!(!e
            .is_slot_available(&shop(), &service, local(2, 10, 0), &committed)
            .unwrap());
    }

    #[test]
    fn test_timezone_fallback_still_computes() {
        let business = shop().with_timezone("Mars/Olympus_Mons");
        let engine = AvailabilityEngine::new()
            .with_clock(early_clock())
            .with_fallback_timezone(TZ);
        let slots = engine
            .list_available_slots(&business, &Service::new("cut", 30), monday(), &[])
            .unwrap();
        assert_eq!(slots.first().unwrap().time_label(), "09:00");

        let (_, degraded) = business.resolve_timezone(TZ);
        assert!(degraded);
    }

    #[test]
    fn test_dst_gap_rejected() {
        // America/New_York skips 02:00–03:00 on 2026-03-08.
        let business = Business::new("east")
            .with_timezone("America/New_York")
            .with_hours(Weekday::Sunday, "02:30", "05:00");
        let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let err = engine()
            .list_available_slots(&business, &Service::new("cut", 30), date, &[])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDate(_)));
    }

    #[test]
    fn test_configuration_errors_surface() {
        let e = engine();
        assert_eq!(
            e.list_available_slots(&shop(), &Service::new("cut", 0), monday(), &[]),
            Err(Error::InvalidDuration(0))
        );
        assert_eq!(
            e.list_available_slots(
                &shop().with_capacity(0),
                &Service::new("cut", 30),
                monday(),
                &[]
            ),
            Err(Error::InvalidCapacity(0))
        );
        let bad = shop().with_hours(Weekday::Monday, "nine", "20:00");
        assert!(matches!(
            e.list_available_slots(&bad, &Service::new("cut", 30), monday(), &[]),
            Err(Error::InvalidScheduleTime { .. })
        ));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-03-02").unwrap(), monday());
        assert!(matches!(parse_date("02/03/2026"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date("not a date"), Err(Error::InvalidDate(_))));
    }
}
