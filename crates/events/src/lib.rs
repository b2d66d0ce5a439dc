//! Change notification mechanics.
//!
//! Events describe what happened, envelopes sequence them, and the bus fans
//! them out to subscribed listeners. Nothing here knows about inventory or
//! orders.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Listener, ListenerId};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
