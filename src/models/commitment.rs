//! Commitment model: appointments and operator blocks.
//!
//! A commitment occupies a half-open interval `[start, end)` of a
//! business's capacity. Appointments carry a lifecycle status; blocks
//! are operator-created holds that occupy capacity regardless of status.
//!
//! # Capacity Rule
//! Only pending/confirmed appointments and blocks count toward capacity.
//! Cancelled, no-show, and completed commitments never occupy a station.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default length of a block created without an explicit end.
pub const DEFAULT_BLOCK_MINUTES: i64 = 60;

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentStatus {
    /// Booked, awaiting confirmation. Occupies capacity.
    Pending,
    /// Confirmed by the business. Occupies capacity.
    Confirmed,
    /// Cancelled by either party.
    Cancelled,
    /// Client did not show up.
    NoShow,
    /// Service was delivered.
    Completed,
}

/// An appointment or operator block occupying `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive). Always after `start`.
    pub end: DateTime<Utc>,
    /// Lifecycle status.
    pub status: CommitmentStatus,
    /// Operator-created hold: occupies capacity regardless of status.
    pub is_block: bool,
}

impl Commitment {
    /// Creates a pending appointment.
    pub fn appointment(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            status: CommitmentStatus::Pending,
            is_block: false,
        }
    }

    /// Creates a confirmed appointment.
    pub fn confirmed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::appointment(start, end).with_status(CommitmentStatus::Confirmed)
    }

    /// Creates an operator block with the default one-hour length.
    pub fn block(start: DateTime<Utc>) -> Self {
        Self::block_until(start, start + Duration::minutes(DEFAULT_BLOCK_MINUTES))
    }

    /// Creates an operator block over an explicit interval.
    pub fn block_until(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            status: CommitmentStatus::Confirmed,
            is_block: true,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: CommitmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether this commitment occupies a station.
    pub fn counts_toward_capacity(&self) -> bool {
        self.is_block
            || matches!(
                self.status,
                CommitmentStatus::Pending | CommitmentStatus::Confirmed
            )
    }

    /// Open-interval overlap test against `[start, end)`.
    ///
    /// Two intervals overlap unless one ends at or before the other
    /// begins, so a commitment ending exactly at `start` does not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        !(self.end <= start || self.start >= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
    }

    #[test]
    fn test_capacity_rule() {
        let c = Commitment::appointment(at(10, 0), at(10, 30));
        assert!(c.counts_toward_capacity()); // pending
        assert!(c
            .clone()
            .with_status(CommitmentStatus::Confirmed)
            .counts_toward_capacity());
        assert!(!c
            .clone()
            .with_status(CommitmentStatus::Cancelled)
            .counts_toward_capacity());
        assert!(!c
            .clone()
            .with_status(CommitmentStatus::NoShow)
            .counts_toward_capacity());
        assert!(!c
            .with_status(CommitmentStatus::Completed)
            .counts_toward_capacity());
    }

    #[test]
    fn test_block_counts_regardless_of_status() {
        let b = Commitment::block(at(12, 0)).with_status(CommitmentStatus::Cancelled);
        assert!(b.counts_toward_capacity());
    }

    #[test]
    fn test_block_default_length() {
        let b = Commitment::block(at(12, 0));
        assert_eq!(b.end, at(13, 0));
    }

    #[test]
    fn test_overlap_half_open() {
        let c = Commitment::confirmed(at(10, 0), at(10, 30));
        assert!(c.overlaps(at(10, 15), at(10, 45)));
        assert!(c.overlaps(at(9, 45), at(10, 15)));
        assert!(c.overlaps(at(10, 0), at(10, 30)));
        // Touching endpoints do not overlap
        assert!(!c.overlaps(at(10, 30), at(11, 0)));
        assert!(!c.overlaps(at(9, 30), at(10, 0)));
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&CommitmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"no_show\"");
    }
}
