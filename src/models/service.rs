//! Service model.
//!
//! A service is what a client books: a haircut, a consultation, a
//! fitting. The engine only consumes its duration; the price is carried
//! for presentation callers.

use serde::{Deserialize, Serialize};

/// A bookable service offered by a business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Unique service identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Duration in minutes. Must be positive; the engine rejects zero.
    pub duration_minutes: u32,
    /// Price, for callers that render it. Not used by the engine.
    pub price: Option<f64>,
}

impl Service {
    /// Creates a service with the given duration.
    pub fn new(id: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration_minutes,
            price: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}
