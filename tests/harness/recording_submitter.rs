use std::sync::Mutex;

use async_trait::async_trait;
use floorsniper::domain::Order;
use floorsniper::port::{PurchaseSubmitter, SubmitOutcome};

/// Submitter double that records every order it is asked to buy.
pub struct RecordingSubmitter {
    orders: Mutex<Vec<Order>>,
    outcome: SubmitOutcome,
}

impl Default for RecordingSubmitter {
    fn default() -> Self {
        Self::returning(SubmitOutcome::Submitted {
            tx_hash: "0xfeed".into(),
        })
    }
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitter that answers every purchase with `outcome`.
    pub fn returning(outcome: SubmitOutcome) -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            outcome,
        }
    }

    pub fn len(&self) -> usize {
        self.orders.lock().expect("lock submitted orders").len()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().expect("lock submitted orders").clone()
    }
}

#[async_trait]
impl PurchaseSubmitter for RecordingSubmitter {
    async fn submit_purchase(&self, order: &Order) -> SubmitOutcome {
        self.orders
            .lock()
            .expect("lock submitted orders")
            .push(order.clone());
        self.outcome.clone()
    }

    fn submitter_name(&self) -> &'static str {
        "Recording"
    }
}
