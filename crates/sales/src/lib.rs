//! Customer orders.
//!
//! An order is a named list of lines, each pairing an inventory item with a
//! requested quantity. Orders do not touch the ledger themselves; the
//! storefront resolves lines against inventory when it processes them.

pub mod order;

pub use order::{Order, OrderLine, OrderStatus};
