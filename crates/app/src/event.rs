use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartsupply_core::{Money, OrderId};
use smartsupply_events::Event;

use crate::snapshot::StoreSnapshot;

/// Event: OrderProcessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProcessed {
    pub order_id: OrderId,
    pub customer: String,
    pub order_total: Money,
    pub revenue_total: Money,
    /// Line items that had no ledger entry; their stock was not touched.
    pub unknown_items: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    OrderProcessed(OrderProcessed),
}

impl Event for StoreEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::OrderProcessed(_) => "store.order.processed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StoreEvent::OrderProcessed(e) => e.occurred_at,
        }
    }
}

/// What subscribers receive: the cause plus the projections after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreChange {
    pub event: StoreEvent,
    pub snapshot: StoreSnapshot,
}
