//! Cached collection floor price.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

/// Floor price with its refresh schedule.
///
/// The floor starts at zero, so no listing counts as underpriced until the
/// first successful refresh. A failed refresh leaves both the value and the
/// refresh time untouched, which makes the next cycle try again.
#[derive(Debug, Clone)]
pub struct FloorTracker {
    floor: Decimal,
    refreshed_at: Option<Instant>,
    refresh_interval: Duration,
}

impl FloorTracker {
    #[must_use]
    pub const fn new(refresh_interval: Duration) -> Self {
        Self {
            floor: Decimal::ZERO,
            refreshed_at: None,
            refresh_interval,
        }
    }

    /// Current floor price in currency units.
    #[must_use]
    pub const fn current(&self) -> Decimal {
        self.floor
    }

    /// Time of the last successful refresh.
    #[must_use]
    pub const fn refreshed_at(&self) -> Option<Instant> {
        self.refreshed_at
    }

    /// True if the floor was never fetched or more than the refresh interval
    /// has passed since the last success.
    #[must_use]
    pub fn needs_refresh(&self, now: Instant) -> bool {
        match self.refreshed_at {
            None => true,
            Some(at) => now.saturating_duration_since(at) > self.refresh_interval,
        }
    }

    /// Store a freshly fetched floor.
    pub fn record(&mut self, now: Instant, floor: Decimal) {
        self.floor = floor;
        self.refreshed_at = Some(now);
    }
}
