use serde::{Deserialize, Serialize};

use smartsupply_core::{Entity, Money, OrderId};
use smartsupply_inventory::Item;

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processed,
}

/// Order line: item, quantity, unit price.
///
/// The line refers to the ledger entry by name and captures the price at the
/// time the line was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    item: String,
    quantity: i64,
    unit_price: Money,
}

impl OrderLine {
    pub fn new(item: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        Self {
            item: item.into(),
            quantity,
            unit_price,
        }
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// A customer's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: String,
    lines: Vec<OrderLine>,
    status: OrderStatus,
}

impl Order {
    pub fn new(customer: impl Into<String>) -> Self {
        Self::with_id(OrderId::new(), customer)
    }

    pub fn with_id(id: OrderId, customer: impl Into<String>) -> Self {
        Self {
            id,
            customer: customer.into(),
            lines: Vec::new(),
            status: OrderStatus::Pending,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_processed(&self) -> bool {
        matches!(self.status, OrderStatus::Processed)
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.status, OrderStatus::Pending)
    }

    /// Append a line for `quantity` units of `item` at its current price.
    ///
    /// Neither the quantity nor the item's presence in any ledger is checked.
    /// A processed order is closed: the line is dropped and `false` returned.
    pub fn add_line(&mut self, item: &Item, quantity: i64) -> bool {
        if !self.is_modifiable() {
            return false;
        }
        self.lines
            .push(OrderLine::new(item.name(), item.price(), quantity));
        true
    }

    /// Builder-style [`Order::add_line`].
    pub fn with_line(mut self, item: &Item, quantity: i64) -> Self {
        let _ = self.add_line(item, quantity);
        self
    }

    /// Sum of `unit_price × quantity` over all lines, recomputed on each call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::total).sum()
    }

    /// Pending → Processed. Returns `false` if the order was already processed.
    pub fn mark_processed(&mut self) -> bool {
        if self.is_processed() {
            return false;
        }
        self.status = OrderStatus::Processed;
        true
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_order_id() -> OrderId {
        OrderId::from_uuid(Uuid::from_u128(1))
    }

    fn rice() -> Item {
        Item::new("Rice", Money::new(20), 12)
    }

    fn sugar() -> Item {
        Item::new("Sugar", Money::new(15), 10)
    }

    #[test]
    fn new_order_is_pending_and_empty() {
        let order = Order::with_id(test_order_id(), "John");
        assert_eq!(order.id(), &test_order_id());
        assert_eq!(order.customer(), "John");
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(order.lines().is_empty());
        assert_eq!(order.total(), Money::ZERO);
    }

    #[test]
    fn add_line_captures_item_name_and_price() {
        let mut order = Order::new("John");
        order.add_line(&rice(), 5);

        let line = &order.lines()[0];
        assert_eq!(line.item(), "Rice");
        assert_eq!(line.unit_price(), Money::new(20));
        assert_eq!(line.quantity(), 5);
        assert_eq!(line.total(), Money::new(100));
    }

    #[test]
    fn total_sums_line_totals() {
        let order = Order::new("John").with_line(&rice(), 5).with_line(&sugar(), 3);
        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.total(), Money::new(145));
    }

    #[test]
    fn add_line_accepts_items_outside_any_ledger_and_odd_quantities() {
        let ghost = Item::new("Flour", Money::new(7), 0);
        let order = Order::new("Emma").with_line(&ghost, 0).with_line(&ghost, -2);
        assert_eq!(order.total(), Money::new(-14));
    }

    #[test]
    fn mark_processed_happens_once() {
        let mut order = Order::new("Emma");
        assert!(order.mark_processed());
        assert!(order.is_processed());
        assert!(!order.mark_processed());
        assert_eq!(order.status(), OrderStatus::Processed);
    }

    #[test]
    fn processed_order_does_not_accept_new_lines() {
        let mut order = Order::new("John").with_line(&rice(), 5);
        assert!(order.mark_processed());
        assert!(!order.is_modifiable());

        assert!(!order.add_line(&rice(), 3));

        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.total(), Money::new(100));
    }

    #[test]
    fn pending_order_accepts_lines() {
        let mut order = Order::new("John");
        assert!(order.is_modifiable());
        assert!(order.add_line(&sugar(), 3));
        assert_eq!(order.lines().len(), 1);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Processed).unwrap();
        assert_eq!(json, "\"processed\"");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: the order total equals the sum of price × quantity
            /// over its lines, whatever order the lines were added in.
            #[test]
            fn total_is_sum_of_lines(
                lines in prop::collection::vec((0i64..1_000, 1i64..100), 0..10)
            ) {
                let mut forward = Order::new("John");
                let mut backward = Order::new("John");
                for (i, (price, qty)) in lines.iter().enumerate() {
                    forward.add_line(&Item::new(format!("item-{i}"), Money::new(*price), 0), *qty);
                }
                for (i, (price, qty)) in lines.iter().enumerate().rev() {
                    backward.add_line(&Item::new(format!("item-{i}"), Money::new(*price), 0), *qty);
                }

                let expected: i64 = lines.iter().map(|(p, q)| p * q).sum();
                prop_assert_eq!(forward.total(), Money::new(expected));
                prop_assert_eq!(backward.total(), forward.total());
            }
        }
    }
}
