//! Booking domain models.
//!
//! Value types consumed and produced by the availability engine. All
//! inputs are supplied fresh per call — the engine reads a snapshot of
//! these types and holds no state across calls.
//!
//! # Domain Mappings
//!
//! | bookable | Barbershop | Clinic | Studio |
//! |----------|-----------|--------|--------|
//! | Business | Shop | Practice | Studio |
//! | Service | Haircut | Consultation | Session |
//! | Commitment | Appointment/Block | Visit/Hold | Booking/Hold |
//! | Slot | Offered start time | Offered start time | Offered start time |

mod business;
mod commitment;
mod service;
mod slot;

pub use business::{Business, DayHours, ScheduleConfig, Weekday, DEFAULT_CLOSE, DEFAULT_OPEN};
pub use commitment::{Commitment, CommitmentStatus, DEFAULT_BLOCK_MINUTES};
pub use service::Service;
pub use slot::Slot;
