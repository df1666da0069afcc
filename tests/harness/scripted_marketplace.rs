use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use floorsniper::domain::{ListingEvent, Order, TokenId};
use floorsniper::port::{EventKind, FetchOutcome, Marketplace};
use rust_decimal::Decimal;

/// Marketplace double that replays scripted responses and records requests.
///
/// Event and floor responses are consumed one per call; once a script runs
/// out, events come back empty and the floor repeats `steady_floor`.
#[derive(Default)]
pub struct ScriptedMarketplace {
    events: Mutex<VecDeque<FetchOutcome<Vec<ListingEvent>>>>,
    floors: Mutex<VecDeque<FetchOutcome<Decimal>>>,
    steady_floor: Mutex<Option<Decimal>>,
    orders: Mutex<HashMap<TokenId, Vec<Order>>>,
    fail_orders: Mutex<bool>,
    event_requests: Mutex<Vec<(DateTime<Utc>, EventKind)>>,
    order_requests: Mutex<Vec<Vec<TokenId>>>,
    floor_requests: Mutex<usize>,
}

impl ScriptedMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marketplace whose floor is always `floor`.
    pub fn with_floor(floor: Decimal) -> Self {
        let marketplace = Self::new();
        *marketplace.steady_floor.lock().expect("lock floor") = Some(floor);
        marketplace
    }

    pub fn push_events(&self, events: Vec<ListingEvent>) {
        self.events
            .lock()
            .expect("lock events")
            .push_back(FetchOutcome::Fetched(events));
    }

    pub fn push_events_failure(&self, reason: &str) {
        self.events
            .lock()
            .expect("lock events")
            .push_back(FetchOutcome::failed(reason));
    }

    pub fn push_floor(&self, floor: Decimal) {
        self.floors
            .lock()
            .expect("lock floors")
            .push_back(FetchOutcome::Fetched(floor));
    }

    pub fn push_floor_failure(&self, reason: &str) {
        self.floors
            .lock()
            .expect("lock floors")
            .push_back(FetchOutcome::failed(reason));
    }

    pub fn set_orders(&self, token: &str, orders: Vec<Order>) {
        self.orders
            .lock()
            .expect("lock orders")
            .insert(TokenId::new(token), orders);
    }

    pub fn fail_order_lookups(&self) {
        *self.fail_orders.lock().expect("lock fail flag") = true;
    }

    pub fn floor_requests(&self) -> usize {
        *self.floor_requests.lock().expect("lock floor requests")
    }

    pub fn order_requests(&self) -> Vec<Vec<TokenId>> {
        self.order_requests.lock().expect("lock order requests").clone()
    }

    pub fn event_requests(&self) -> Vec<(DateTime<Utc>, EventKind)> {
        self.event_requests.lock().expect("lock event requests").clone()
    }
}

#[async_trait]
impl Marketplace for ScriptedMarketplace {
    async fn fetch_events(
        &self,
        after: DateTime<Utc>,
        kind: EventKind,
    ) -> FetchOutcome<Vec<ListingEvent>> {
        self.event_requests
            .lock()
            .expect("lock event requests")
            .push((after, kind));
        self.events
            .lock()
            .expect("lock events")
            .pop_front()
            .unwrap_or(FetchOutcome::Fetched(Vec::new()))
    }

    async fn fetch_orders(&self, token_ids: &[TokenId]) -> FetchOutcome<Vec<Order>> {
        self.order_requests
            .lock()
            .expect("lock order requests")
            .push(token_ids.to_vec());
        if *self.fail_orders.lock().expect("lock fail flag") {
            return FetchOutcome::failed("orders endpoint unavailable");
        }
        let orders = self.orders.lock().expect("lock orders");
        let found = token_ids
            .iter()
            .filter_map(|id| orders.get(id))
            .flatten()
            .cloned()
            .collect();
        FetchOutcome::Fetched(found)
    }

    async fn fetch_floor_price(&self) -> FetchOutcome<Decimal> {
        *self.floor_requests.lock().expect("lock floor requests") += 1;
        if let Some(scripted) = self.floors.lock().expect("lock floors").pop_front() {
            return scripted;
        }
        match *self.steady_floor.lock().expect("lock floor") {
            Some(floor) => FetchOutcome::Fetched(floor),
            None => FetchOutcome::failed("no floor scripted"),
        }
    }

    fn marketplace_name(&self) -> &'static str {
        "Scripted"
    }
}
