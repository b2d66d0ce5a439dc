//! Inventory domain module.
//!
//! This crate contains the stock ledger: items keyed by name, merged on
//! restock, decremented on sale. Pure in-memory logic (no IO, no storage).

pub mod item;
pub mod ledger;

pub use item::Item;
pub use ledger::{Inventory, StockRemoval};
