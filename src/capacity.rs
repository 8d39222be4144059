//! Capacity admission check.
//!
//! Decides whether one more commitment over `[start, end)` can be
//! accepted without pushing the concurrent commitment count to the
//! business's capacity at any instant.
//!
//! # Algorithm
//!
//! Line sweep over clipped interval endpoints:
//!
//! 1. Keep only commitments that occupy capacity and overlap the query
//!    window (open-interval test, touching endpoints do not overlap).
//! 2. If fewer overlapping commitments than capacity, accept — no subset
//!    can exceed capacity.
//! 3. Otherwise clip each commitment to the window and emit `+1`/`-1`
//!    events at the clipped bounds.
//! 4. Sort events by time, ends before starts on ties: a commitment
//!    ending exactly when another begins is not simultaneous occupancy.
//!    Without this tie-break back-to-back bookings would be rejected.
//! 5. Sweep, tracking the running occupancy; reject the moment the
//!    running maximum reaches capacity.
//!
//! # Complexity
//! O(k log k) for k overlapping commitments. Exact by design: an
//! off-by-one here is a double booking.

use chrono::{DateTime, Utc};

use crate::models::Commitment;

/// Whether a commitment over `[start, end)` fits under `capacity` given
/// the existing commitments.
///
/// Commitments that do not occupy capacity (cancelled, no-show,
/// completed non-blocks) are ignored, so callers may pass an unfiltered
/// day snapshot.
pub fn has_capacity(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    commitments: &[Commitment],
    capacity: u32,
) -> bool {
    let overlapping: Vec<&Commitment> = commitments
        .iter()
        .filter(|c| c.counts_toward_capacity() && c.overlaps(start, end))
        .collect();

    if overlapping.is_empty() {
        return true;
    }

    // Fewer overlapping commitments than capacity: no instant can be
    // saturated, skip the sweep.
    if (overlapping.len() as u32) < capacity {
        return true;
    }

    // Count >= capacity is not an outright reject: the commitments may
    // not all be simultaneously active. Sweep to find out.
    let mut events: Vec<(DateTime<Utc>, i32)> = Vec::with_capacity(overlapping.len() * 2);
    for c in &overlapping {
        events.push((c.start.max(start), 1));
        events.push((c.end.min(end), -1));
    }

    // Ends (-1) sort before starts (+1) at equal timestamps.
    events.sort();

    let mut concurrent: i32 = 0;
    let mut max_concurrent: i32 = 0;
    for (_, delta) in events {
        concurrent += delta;
        max_concurrent = max_concurrent.max(concurrent);
        if max_concurrent >= capacity as i32 {
            return false;
        }
    }

    true
}
