//! The storefront controller.
//!
//! Owns the ledger, the pending queue and the processed list behind a single
//! lock. Each call to [`Storefront::process_next_order`] advances the queue by
//! exactly one order and publishes the resulting [`StoreSnapshot`].
//!
//! ## Ordering
//!
//! The whole dequeue/apply/accumulate step runs under the lock, so orders are
//! processed in FIFO order and exactly once even with concurrent callers. The
//! change is published after the lock is released (listeners may call back in);
//! envelopes carry a sequence number assigned under the lock so a listener can
//! tell which snapshot is newest.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use smartsupply_core::{Money, OrderId};
use smartsupply_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, ListenerId};
use smartsupply_inventory::{Inventory, Item, StockRemoval};
use smartsupply_sales::Order;

use crate::config::StoreConfig;
use crate::event::{OrderProcessed, StoreChange, StoreEvent};
use crate::seed;
use crate::snapshot::StoreSnapshot;

/// Message delivered to storefront subscribers.
pub type ChangeEnvelope = EventEnvelope<StoreChange>;

/// Summary of one processed order, returned to the caller that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub customer: String,
    pub order_total: Money,
    pub revenue_total: Money,
    pub unknown_items: Vec<String>,
}

#[derive(Debug)]
struct StoreState {
    inventory: Inventory,
    pending: VecDeque<Order>,
    processed: Vec<Order>,
    revenue_total: Money,
    sequence: u64,
}

impl StoreState {
    fn snapshot(&self, low_stock_threshold: i64) -> StoreSnapshot {
        StoreSnapshot::capture(
            &self.inventory,
            low_stock_threshold,
            &self.pending,
            &self.processed,
            self.revenue_total,
        )
    }
}

/// Application controller: ledger + FIFO order queue + change notifications.
pub struct Storefront<B = InMemoryEventBus<ChangeEnvelope>>
where
    B: EventBus<ChangeEnvelope>,
{
    config: StoreConfig,
    state: Mutex<StoreState>,
    bus: B,
}

impl Storefront {
    /// Build a storefront with an in-memory change bus.
    pub fn new(config: StoreConfig, inventory: Inventory, orders: impl IntoIterator<Item = Order>) -> Self {
        Self::with_bus(config, inventory, orders, InMemoryEventBus::new())
    }

    /// The demo storefront: four stocked items and two queued orders.
    pub fn seeded(config: StoreConfig) -> Self {
        let inventory = seed::inventory();
        let orders = seed::orders(&inventory);
        Self::new(config, inventory, orders)
    }
}

impl<B> Storefront<B>
where
    B: EventBus<ChangeEnvelope>,
{
    /// Build a storefront over a caller-supplied bus.
    ///
    /// Only `Pending` orders are queued. An order that is already processed
    /// is skipped with a warning so its stock and revenue are never applied
    /// a second time.
    pub fn with_bus(
        config: StoreConfig,
        inventory: Inventory,
        orders: impl IntoIterator<Item = Order>,
        bus: B,
    ) -> Self {
        let pending: VecDeque<Order> = orders
            .into_iter()
            .filter(|order| {
                if order.is_modifiable() {
                    return true;
                }
                tracing::warn!(
                    order_id = %order.id_typed(),
                    customer = order.customer(),
                    status = ?order.status(),
                    "skipping order that is not pending"
                );
                false
            })
            .collect();

        tracing::info!(
            items = inventory.len(),
            queued_orders = pending.len(),
            low_stock_threshold = config.low_stock_threshold,
            "storefront initialized"
        );

        Self {
            config,
            state: Mutex::new(StoreState {
                inventory,
                pending,
                processed: Vec::new(),
                revenue_total: Money::ZERO,
                sequence: 0,
            }),
            bus,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Process the order at the head of the queue.
    ///
    /// Returns `None` (and changes nothing, notifies nobody) when the queue is
    /// empty. Otherwise every line is removed from stock, its total is added to
    /// revenue, the order moves to the processed list, and subscribers receive
    /// the new snapshot before this returns.
    ///
    /// Lines naming an item that is not in the ledger leave stock untouched but
    /// still count towards revenue; they are logged and listed in the receipt.
    pub fn process_next_order(&self) -> Option<OrderReceipt> {
        let (envelope, receipt) = {
            let mut state = self.lock_state();
            let mut order = state.pending.pop_front()?;

            let mut order_total = Money::ZERO;
            let mut unknown_items = Vec::new();

            for line in order.lines() {
                match state.inventory.remove_stock(line.item(), line.quantity()) {
                    StockRemoval::Removed { remaining } => {
                        tracing::debug!(
                            item = line.item(),
                            removed = line.quantity(),
                            remaining,
                            "stock removed"
                        );
                    }
                    StockRemoval::UnknownItem => {
                        tracing::warn!(
                            order_id = %order.id_typed(),
                            item = line.item(),
                            quantity = line.quantity(),
                            "order line names an item that is not in inventory; stock unchanged"
                        );
                        unknown_items.push(line.item().to_string());
                    }
                }
                order_total += line.total();
            }

            state.revenue_total += order_total;
            // The queue only ever holds orders that were pending on entry.
            order.mark_processed();

            let receipt = OrderReceipt {
                order_id: order.id_typed(),
                customer: order.customer().to_string(),
                order_total,
                revenue_total: state.revenue_total,
                unknown_items,
            };

            state.processed.push(order);
            state.sequence += 1;

            let event = StoreEvent::OrderProcessed(OrderProcessed {
                order_id: receipt.order_id,
                customer: receipt.customer.clone(),
                order_total,
                revenue_total: receipt.revenue_total,
                unknown_items: receipt.unknown_items.clone(),
                occurred_at: Utc::now(),
            });
            let change = StoreChange {
                event,
                snapshot: state.snapshot(self.config.low_stock_threshold),
            };

            (EventEnvelope::new(Uuid::now_v7(), state.sequence, change), receipt)
        };

        tracing::info!(
            order_id = %receipt.order_id,
            customer = %receipt.customer,
            order_total = %receipt.order_total,
            revenue_total = %receipt.revenue_total,
            sequence = envelope.sequence_number(),
            "order processed"
        );

        self.publish(&envelope);

        Some(receipt)
    }

    /// Current projections, without changing anything.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock_state().snapshot(self.config.low_stock_threshold)
    }

    pub fn revenue_total(&self) -> Money {
        self.lock_state().revenue_total
    }

    pub fn inventory_items(&self) -> Vec<Item> {
        self.lock_state().inventory.all_items().to_vec()
    }

    pub fn low_stock_items(&self) -> Vec<Item> {
        self.lock_state()
            .inventory
            .low_stock_items(self.config.low_stock_threshold)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn queued_orders(&self) -> Vec<Order> {
        self.lock_state().pending.iter().cloned().collect()
    }

    pub fn processed_orders(&self) -> Vec<Order> {
        self.lock_state().processed.clone()
    }

    /// Register a listener for store changes.
    ///
    /// The listener runs synchronously on the thread that triggered the change.
    /// A listener that panics is caught and logged: the change it was handed
    /// has already been applied, and the remaining listeners still run.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ChangeEnvelope) + Send + Sync + 'static,
    {
        self.bus.subscribe(Arc::new(listener))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn publish(&self, envelope: &ChangeEnvelope) {
        match self.bus.publish(envelope) {
            Ok(listeners) => {
                tracing::debug!(
                    sequence = envelope.sequence_number(),
                    event_type = envelope.payload().event.event_type(),
                    listeners,
                    "store change published"
                );
            }
            Err(e) => {
                tracing::warn!(
                    sequence = envelope.sequence_number(),
                    error = ?e,
                    "failed to publish store change"
                );
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        // A panicking listener cannot poison this lock (listeners run after it
        // is released); recover anyway, every field is valid on its own.
        self.state.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("storefront state lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl<B> core::fmt::Debug for Storefront<B>
where
    B: EventBus<ChangeEnvelope> + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("bus", &self.bus)
            .finish()
    }
}
