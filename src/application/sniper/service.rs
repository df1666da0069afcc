//! Trade decision loop.
//!
//! One [`Sniper`] owns all mutable state of the bot: the cached floor price,
//! the seen-price cache and the loop settings. Each cycle refreshes the floor
//! when due, polls recent listing events and buys any listing priced strictly
//! below `floor * underpriced_ratio`. Collaborator failures never escape a
//! cycle; they are logged and replaced by safe defaults.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use super::floor::FloorTracker;
use super::seen::SeenPrices;
use crate::domain::{ListingEvent, Order};
use crate::error::Result;
use crate::infrastructure::config::sniper::SniperConfig;
use crate::port::{EventKind, FetchOutcome, Marketplace, PurchaseSubmitter, SubmitOutcome};

/// Tunables of the decision loop.
#[derive(Debug, Clone)]
pub struct SniperSettings {
    /// Fraction of the floor below which a listing is bought.
    pub underpriced_ratio: Decimal,
    /// Power of ten between raw listing prices and currency units.
    pub currency_decimals: u32,
    /// How far back each poll looks for listing events.
    pub lookback: Duration,
    /// Age the floor price must exceed before it is fetched again.
    pub floor_refresh: Duration,
    /// Pause between cycles.
    pub poll_interval: Duration,
    /// Event type polled each cycle.
    pub event_kind: EventKind,
}

impl SniperSettings {
    /// Default cadence with the given ratio.
    #[must_use]
    pub fn new(underpriced_ratio: Decimal) -> Self {
        let defaults = SniperConfig::default();
        Self {
            underpriced_ratio,
            currency_decimals: defaults.currency_decimals,
            lookback: defaults.lookback(),
            floor_refresh: defaults.floor_refresh(),
            poll_interval: defaults.poll_interval(),
            event_kind: EventKind::Created,
        }
    }

    /// Build settings from the `[sniper]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConfigError::InvalidValue`] for an unknown event type.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &SniperConfig, underpriced_ratio: Decimal) -> Result<Self> {
        let event_kind = config.event_kind()?;
        Ok(Self {
            underpriced_ratio,
            currency_decimals: config.currency_decimals,
            lookback: config.lookback(),
            floor_refresh: config.floor_refresh(),
            poll_interval: config.poll_interval(),
            event_kind,
        })
    }
}

/// What happened to a single listing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Token already cached at this price; nothing evaluated.
    Unchanged,
    /// New or changed price, not underpriced.
    Observed,
    /// Underpriced, but no open order carried the listed price.
    NoMatchingOrder,
    /// Underpriced and a purchase was handed to the submitter.
    Purchase(SubmitOutcome),
}

/// Counters for one completed cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Floor price used for this cycle's decisions.
    pub floor: Decimal,
    /// Whether the floor was successfully refreshed this cycle.
    pub floor_refreshed: bool,
    /// Events returned by the marketplace.
    pub events: usize,
    /// Events with a new or changed price.
    pub evaluated: usize,
    /// Underpriced events for which a purchase was attempted.
    pub purchase_attempts: usize,
    /// Purchases that produced a transaction hash.
    pub submitted: usize,
    /// Underpriced events with no matching order.
    pub unmatched: usize,
    /// Events whose processing failed.
    pub errors: usize,
}

/// True if `price` is strictly below `floor * ratio`.
///
/// A threshold too large to represent counts as not underpriced.
#[must_use]
pub fn is_underpriced(price: Decimal, floor: Decimal, ratio: Decimal) -> bool {
    floor
        .checked_mul(ratio)
        .is_some_and(|threshold| price < threshold)
}

/// The trade decision loop.
pub struct Sniper {
    marketplace: Arc<dyn Marketplace>,
    submitter: Arc<dyn PurchaseSubmitter>,
    settings: SniperSettings,
    floor: FloorTracker,
    seen: SeenPrices,
}

impl Sniper {
    #[must_use]
    pub fn new(
        marketplace: Arc<dyn Marketplace>,
        submitter: Arc<dyn PurchaseSubmitter>,
        settings: SniperSettings,
    ) -> Self {
        let floor = FloorTracker::new(settings.floor_refresh);
        Self {
            marketplace,
            submitter,
            settings,
            floor,
            seen: SeenPrices::new(),
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &SniperSettings {
        &self.settings
    }

    /// Floor price currently used for decisions.
    #[must_use]
    pub const fn floor_price(&self) -> Decimal {
        self.floor.current()
    }

    #[must_use]
    pub const fn seen_prices(&self) -> &SeenPrices {
        &self.seen
    }

    /// Poll forever, one cycle every `poll_interval`.
    pub async fn run(&mut self) {
        info!(
            marketplace = self.marketplace.marketplace_name(),
            submitter = self.submitter.submitter_name(),
            ratio = %self.settings.underpriced_ratio,
            poll_interval_secs = self.settings.poll_interval.as_secs(),
            "Sniper started"
        );
        loop {
            let report = self.run_cycle().await;
            debug!(?report, "Cycle complete");
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    /// Run one cycle at the current time.
    pub async fn run_cycle(&mut self) -> CycleReport {
        self.run_cycle_at(Instant::now()).await
    }

    /// Run one cycle, using `now` for the floor refresh schedule.
    pub async fn run_cycle_at(&mut self, now: Instant) -> CycleReport {
        let mut report = CycleReport {
            floor_refreshed: self.refresh_floor(now).await,
            ..CycleReport::default()
        };
        report.floor = self.floor.current();

        let lookback = chrono::Duration::from_std(self.settings.lookback)
            .unwrap_or_else(|_| chrono::Duration::seconds(30));
        let after = Utc::now() - lookback;
        let events = self
            .marketplace
            .fetch_events(after, self.settings.event_kind)
            .await
            .unwrap_or_default();
        report.events = events.len();

        for event in &events {
            match self.process_event(event).await {
                Ok(EventOutcome::Unchanged) => {}
                Ok(EventOutcome::Observed) => report.evaluated += 1,
                Ok(EventOutcome::NoMatchingOrder) => {
                    report.evaluated += 1;
                    report.unmatched += 1;
                }
                Ok(EventOutcome::Purchase(outcome)) => {
                    report.evaluated += 1;
                    report.purchase_attempts += 1;
                    if outcome.is_submitted() {
                        report.submitted += 1;
                    }
                }
                Err(err) => {
                    report.errors += 1;
                    error!(error = %err, token_id = %event.token_id(), "Failed to process event");
                }
            }
        }

        report
    }

    /// Refresh the floor if due. Returns true on a successful refresh.
    async fn refresh_floor(&mut self, now: Instant) -> bool {
        if !self.floor.needs_refresh(now) {
            return false;
        }
        match self.marketplace.fetch_floor_price().await {
            FetchOutcome::Fetched(floor) => {
                self.floor.record(now, floor);
                info!(floor = %floor, "Floor price updated");
                true
            }
            FetchOutcome::Failed { reason } => {
                warn!(
                    reason = %reason,
                    floor = %self.floor.current(),
                    "Floor refresh failed, keeping previous value"
                );
                false
            }
        }
    }

    /// Apply the de-duplication and underpriced rules to one event.
    ///
    /// # Errors
    ///
    /// Fails if the event price cannot be converted to currency units.
    pub async fn process_event(&mut self, event: &ListingEvent) -> Result<EventOutcome> {
        let price = event.price(self.settings.currency_decimals)?;
        if !self.seen.observe(event.token_id(), price) {
            return Ok(EventOutcome::Unchanged);
        }
        info!(token_id = %event.token_id(), price = %price, "New listed sell order");

        let floor = self.floor.current();
        if !is_underpriced(price, floor, self.settings.underpriced_ratio) {
            return Ok(EventOutcome::Observed);
        }
        info!(
            token_id = %event.token_id(),
            price = %price,
            floor = %floor,
            ratio = %self.settings.underpriced_ratio,
            "Underpriced listing"
        );

        let orders = match self
            .marketplace
            .fetch_orders(std::slice::from_ref(event.token_id()))
            .await
        {
            FetchOutcome::Fetched(orders) => orders,
            FetchOutcome::Failed { reason } => {
                warn!(reason = %reason, token_id = %event.token_id(), "Order lookup failed");
                Vec::new()
            }
        };

        let Some(order) = first_matching_order(&orders, event) else {
            info!(
                token_id = %event.token_id(),
                price_wei = %event.ending_price(),
                candidates = orders.len(),
                "No open order matches listing price"
            );
            return Ok(EventOutcome::NoMatchingOrder);
        };

        let outcome = self.submitter.submit_purchase(order).await;
        match &outcome {
            SubmitOutcome::Submitted { tx_hash } => {
                info!(tx_hash = %tx_hash, token_id = %event.token_id(), "Buy transaction sent");
            }
            SubmitOutcome::Skipped { reason } => {
                info!(reason = %reason, token_id = %event.token_id(), "Buy skipped");
            }
            SubmitOutcome::Failed { reason } => {
                warn!(reason = %reason, token_id = %event.token_id(), "Buy failed");
            }
        }
        Ok(EventOutcome::Purchase(outcome))
    }
}

/// First order, in marketplace order, asking exactly the event's raw price.
///
/// Orders are already scoped to the event's token by the lookup.
fn first_matching_order<'a>(orders: &'a [Order], event: &ListingEvent) -> Option<&'a Order> {
    orders
        .iter()
        .find(|order| order.matches_price(event.ending_price()))
}
