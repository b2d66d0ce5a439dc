use serde::{Deserialize, Serialize};

use smartsupply_core::{DomainError, DomainResult};

use crate::item::Item;

/// Outcome of [`Inventory::remove_stock`].
///
/// Removal never fails. Callers that do not care can drop this value; callers
/// that do can tell an applied removal from an unknown item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockRemoval {
    /// Stock was subtracted; `remaining` may be negative.
    Removed { remaining: i64 },
    /// No item with that name is in the ledger; nothing changed.
    UnknownItem,
}

impl StockRemoval {
    pub fn is_removed(&self) -> bool {
        matches!(self, StockRemoval::Removed { .. })
    }

    /// Convert to a result, treating an unknown item as `DomainError::NotFound`.
    pub fn into_result(self, name: &str) -> DomainResult<i64> {
        match self {
            StockRemoval::Removed { remaining } => Ok(remaining),
            StockRemoval::UnknownItem => Err(DomainError::not_found(format!("inventory item '{name}'"))),
        }
    }
}

/// The stock ledger.
///
/// Holds at most one [`Item`] per distinct name, in insertion order. Lookups
/// are linear; the ledger is expected to hold a handful of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock an item, merging into an existing entry with the same name.
    ///
    /// On merge only the incoming quantity is used; the existing entry keeps
    /// its price.
    pub fn add_stock(&mut self, item: Item) {
        match self.position(item.name()) {
            Some(idx) => self.items[idx].adjust(item.quantity()),
            None => self.items.push(item),
        }
    }

    /// Subtract `quantity` from the item called `name`.
    ///
    /// Unknown names are a no-op reported as [`StockRemoval::UnknownItem`].
    /// Stock is not floored at zero.
    pub fn remove_stock(&mut self, name: &str, quantity: i64) -> StockRemoval {
        match self.position(name) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.adjust(quantity.saturating_neg());
                StockRemoval::Removed {
                    remaining: item.quantity(),
                }
            }
            None => StockRemoval::UnknownItem,
        }
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name() == name)
    }

    /// All items, in the order they were first stocked.
    pub fn all_items(&self) -> &[Item] {
        &self.items
    }

    /// Items whose quantity is strictly below `threshold`, in ledger order.
    pub fn low_stock_items(&self, threshold: i64) -> Vec<&Item> {
        self.items.iter().filter(|i| i.quantity() < threshold).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name() == name)
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut inventory = Inventory::new();
        for item in iter {
            inventory.add_stock(item);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartsupply_core::Money;

    fn stocked() -> Inventory {
        [
            Item::new("Rice", Money::new(20), 12),
            Item::new("Sugar", Money::new(15), 10),
            Item::new("Chair", Money::new(50), 6),
            Item::new("Light Bulb", Money::new(33), 2),
        ]
        .into_iter()
        .collect()
    }

    fn names<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a str> {
        items.into_iter().map(Item::name).collect()
    }

    #[test]
    fn add_stock_appends_new_items_in_order() {
        let inv = stocked();
        assert_eq!(inv.len(), 4);
        assert_eq!(names(inv.all_items()), vec!["Rice", "Sugar", "Chair", "Light Bulb"]);
    }

    #[test]
    fn add_stock_merges_same_name() {
        let mut inv = stocked();
        inv.add_stock(Item::new("Rice", Money::new(99), 3));

        assert_eq!(inv.len(), 4);
        let rice = inv.item("Rice").unwrap();
        assert_eq!(rice.quantity(), 15);
        assert_eq!(rice.price(), Money::new(20), "merge keeps the ledger price");
    }

    #[test]
    fn remove_stock_decrements_and_reports_remaining() {
        let mut inv = stocked();
        let outcome = inv.remove_stock("Sugar", 3);
        assert_eq!(outcome, StockRemoval::Removed { remaining: 7 });
        assert_eq!(inv.item("Sugar").unwrap().quantity(), 7);
    }

    #[test]
    fn remove_stock_may_go_negative() {
        let mut inv = stocked();
        let outcome = inv.remove_stock("Light Bulb", 5);
        assert_eq!(outcome, StockRemoval::Removed { remaining: -3 });
    }

    #[test]
    fn remove_stock_for_unknown_item_changes_nothing() {
        let mut inv = stocked();
        let before = inv.clone();

        let outcome = inv.remove_stock("Flour", 1);

        assert_eq!(outcome, StockRemoval::UnknownItem);
        assert!(!outcome.is_removed());
        assert_eq!(inv, before);
    }

    #[test]
    fn unknown_item_maps_to_not_found() {
        let err = StockRemoval::UnknownItem.into_result("Flour").unwrap_err();
        match err {
            DomainError::NotFound(msg) if msg.contains("Flour") => {}
            other => panic!("Expected NotFound, got {other:?}"),
        }
        assert_eq!(StockRemoval::Removed { remaining: 4 }.into_result("Rice"), Ok(4));
    }

    #[test]
    fn low_stock_is_strictly_below_threshold() {
        let mut inv = stocked();
        assert_eq!(names(inv.low_stock_items(5)), vec!["Light Bulb"]);

        inv.remove_stock("Chair", 1);
        assert_eq!(inv.item("Chair").unwrap().quantity(), 5);
        assert_eq!(names(inv.low_stock_items(5)), vec!["Light Bulb"]);

        inv.remove_stock("Chair", 1);
        assert_eq!(names(inv.low_stock_items(5)), vec!["Chair", "Light Bulb"]);
    }

    #[test]
    fn remove_stock_with_extreme_quantity_saturates() {
        let mut inv = stocked();
        let outcome = inv.remove_stock("Rice", i64::MIN);
        assert_eq!(outcome, StockRemoval::Removed { remaining: i64::MAX });
    }

    #[test]
    fn empty_inventory_has_no_low_stock() {
        let inv = Inventory::new();
        assert!(inv.is_empty());
        assert!(inv.low_stock_items(5).is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize, i64),
            Remove(usize, i64),
        }

        const NAMES: [&str; 4] = ["Rice", "Sugar", "Chair", "Light Bulb"];

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..NAMES.len(), 0i64..20).prop_map(|(n, q)| Op::Add(n, q)),
                (0..NAMES.len(), 0i64..20).prop_map(|(n, q)| Op::Remove(n, q)),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: stocking two items with the same name leaves a single
            /// entry holding the sum of both quantities.
            #[test]
            fn merge_sums_quantities(a in -50i64..50, b in -50i64..50) {
                let mut inv = Inventory::new();
                inv.add_stock(Item::new("Rice", Money::new(20), a));
                inv.add_stock(Item::new("Rice", Money::new(20), b));

                prop_assert_eq!(inv.len(), 1);
                prop_assert_eq!(inv.item("Rice").unwrap().quantity(), a + b);
            }

            /// Property: after any add/remove sequence, low-stock is exactly
            /// the ledger items below the threshold, in ledger order.
            #[test]
            fn low_stock_matches_filter(ops in prop::collection::vec(op(), 0..40)) {
                let mut inv = Inventory::new();
                for op in ops {
                    match op {
                        Op::Add(n, q) => inv.add_stock(Item::new(NAMES[n], Money::new(10), q)),
                        Op::Remove(n, q) => {
                            let _ = inv.remove_stock(NAMES[n], q);
                        }
                    }
                }

                let expected: Vec<&str> = inv
                    .all_items()
                    .iter()
                    .filter(|i| i.quantity() < 5)
                    .map(Item::name)
                    .collect();
                prop_assert_eq!(names(inv.low_stock_items(5)), expected);

                let mut seen: Vec<&str> = names(inv.all_items());
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), inv.len(), "names stay unique");
            }
        }
    }
}
