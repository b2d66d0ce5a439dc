use serde::{Deserialize, Serialize};

use smartsupply_core::{Entity, Money};

/// A stock-keeping record.
///
/// The name is the identity within a ledger. Price is fixed at construction;
/// quantity changes in place and is allowed to go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    price: Money,
    quantity: i64,
}

impl Item {
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Signed stock change. Positive restocks, negative removes.
    ///
    /// Saturates at the `i64` bounds.
    pub(crate) fn adjust(&mut self, delta: i64) {
        self.quantity = self.quantity.saturating_add(delta);
    }
}

impl Entity for Item {
    type Id = str;

    fn id(&self) -> &str {
        &self.name
    }
}
