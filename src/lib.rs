//! Availability engine for multi-resource appointment booking.
//!
//! Answers, for any business/service/date, which start times are
//! actually bookable, and re-validates a single candidate slot at
//! booking time to prevent overbooking. The engine is a pure
//! computation: commitments arrive as a caller-supplied snapshot, "now"
//! comes from an injected clock, and nothing is persisted.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Business`, `Service`, `Commitment`,
//!   `Slot`, `ScheduleConfig`, `Weekday`
//! - **`resolver`**: Per-weekday operating-window resolution with the
//!   synthesized default schedule
//! - **`grid`**: Fixed-granularity candidate start generation
//! - **`capacity`**: Interval-sweep admission check under a capacity bound
//! - **`engine`**: Orchestration, timezone-correct now filtering, and
//!   the two caller-facing operations
//! - **`error`**: Configuration and boundary error taxonomy
//!
//! # Architecture
//!
//! Data flows one way: resolver → grid → capacity ← (commitment
//! snapshot) → engine → caller. Persistence, authorization, and
//! presentation sit outside this crate; in particular the commit path
//! must enforce the capacity invariant under a storage-level guard —
//! see the booking contract in [`engine`].

pub mod capacity;
pub mod engine;
pub mod error;
pub mod grid;
pub mod models;
pub mod resolver;

pub use engine::{parse_date, AvailabilityEngine, Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use models::{
    Business, Commitment, CommitmentStatus, DayHours, ScheduleConfig, Service, Slot, Weekday,
};
