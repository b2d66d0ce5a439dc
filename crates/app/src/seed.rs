//! Demo data the storefront starts with.

use smartsupply_core::Money;
use smartsupply_inventory::{Inventory, Item};
use smartsupply_sales::Order;

/// Rice, Sugar, Chair and Light Bulb, in that order.
pub fn items() -> Vec<Item> {
    vec![
        Item::new("Rice", Money::new(20), 12),
        Item::new("Sugar", Money::new(15), 10),
        Item::new("Chair", Money::new(50), 6),
        Item::new("Light Bulb", Money::new(33), 2),
    ]
}

/// The seed ledger.
pub fn inventory() -> Inventory {
    items().into_iter().collect()
}

/// John's and Emma's orders, in queue order.
///
/// Lines take their prices from `inventory`; a seed item missing from it is
/// skipped.
pub fn orders(inventory: &Inventory) -> Vec<Order> {
    let line = |order: Order, name: &str, quantity: i64| match inventory.item(name) {
        Some(item) => order.with_line(item, quantity),
        None => order,
    };

    let john = line(line(Order::new("John"), "Rice", 5), "Sugar", 3);
    let emma = line(line(Order::new("Emma"), "Chair", 1), "Light Bulb", 1);

    vec![john, emma]
}
