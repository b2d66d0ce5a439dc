//! `smartsupply-app`
//!
//! **Responsibility:** the application controller behind the storefront UI.
//!
//! This crate provides:
//! - [`Storefront`]: owns the ledger and the order queue, processes one order
//!   per call, and publishes a [`StoreSnapshot`] to subscribers after every change
//! - the demo seed data and environment configuration
//!
//! Rendering is left to whoever subscribes.

pub mod config;
pub mod event;
pub mod seed;
pub mod snapshot;
pub mod storefront;

pub use config::{ConfigError, StoreConfig};
pub use event::{OrderProcessed, StoreChange, StoreEvent};
pub use snapshot::StoreSnapshot;
pub use storefront::{ChangeEnvelope, OrderReceipt, Storefront};
