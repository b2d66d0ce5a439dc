use serde::{Deserialize, Serialize};

use smartsupply_core::Money;
use smartsupply_inventory::{Inventory, Item};
use smartsupply_sales::Order;

/// Read-only projections of the storefront at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub revenue_total: Money,
    pub low_stock_threshold: i64,
    pub inventory_items: Vec<Item>,
    pub low_stock_items: Vec<Item>,
    pub queued_orders: Vec<Order>,
    pub processed_orders: Vec<Order>,
}

impl StoreSnapshot {
    pub(crate) fn capture<'a>(
        inventory: &Inventory,
        low_stock_threshold: i64,
        queued: impl IntoIterator<Item = &'a Order>,
        processed: impl IntoIterator<Item = &'a Order>,
        revenue_total: Money,
    ) -> Self {
        Self {
            revenue_total,
            low_stock_threshold,
            inventory_items: inventory.all_items().to_vec(),
            low_stock_items: inventory
                .low_stock_items(low_stock_threshold)
                .into_iter()
                .cloned()
                .collect(),
            queued_orders: queued.into_iter().cloned().collect(),
            processed_orders: processed.into_iter().cloned().collect(),
        }
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.inventory_items.iter().find(|i| i.name() == name)
    }

    pub fn queued_customers(&self) -> Vec<&str> {
        self.queued_orders.iter().map(Order::customer).collect()
    }

    pub fn processed_customers(&self) -> Vec<&str> {
        self.processed_orders.iter().map(Order::customer).collect()
    }

    pub fn low_stock_names(&self) -> Vec<&str> {
        self.low_stock_items.iter().map(Item::name).collect()
    }
}
