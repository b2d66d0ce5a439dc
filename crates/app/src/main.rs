//! Demo driver: builds the seeded storefront and presses "process next order"
//! until the queue is empty.

use anyhow::Context;

use smartsupply_app::{StoreConfig, StoreEvent, Storefront};
use smartsupply_events::Event;

fn main() -> anyhow::Result<()> {
    smartsupply_observability::init();

    let config = StoreConfig::from_env().context("failed to load storefront configuration")?;
    let store = Storefront::seeded(config);

    store.subscribe(|envelope| {
        let change = envelope.payload();
        let StoreEvent::OrderProcessed(processed) = &change.event;
        tracing::info!(
            event_id = %envelope.event_id(),
            event_type = change.event.event_type(),
            event_version = change.event.version(),
            occurred_at = %change.event.occurred_at(),
            sequence = envelope.sequence_number(),
            customer = %processed.customer,
            revenue_total = %change.snapshot.revenue_total,
            queued = change.snapshot.queued_orders.len(),
            low_stock = ?change.snapshot.low_stock_names(),
            "store changed"
        );
    });

    let initial = store.snapshot();
    tracing::info!(
        items = initial.inventory_items.len(),
        queued = initial.queued_orders.len(),
        low_stock_threshold = store.config().low_stock_threshold,
        low_stock = ?initial.low_stock_names(),
        "storefront ready"
    );

    while let Some(receipt) = store.process_next_order() {
        if !receipt.unknown_items.is_empty() {
            tracing::warn!(customer = %receipt.customer, unknown = ?receipt.unknown_items, "order had unknown items");
        }
    }

    let snapshot = serde_json::to_string_pretty(&store.snapshot())
        .context("failed to render final snapshot")?;
    println!("{snapshot}");

    Ok(())
}
