//! Publish/subscribe abstraction (mechanics only).
//!
//! This module provides the **observer contract** used by state holders to
//! announce changes to whoever renders them (a UI, a logger, a test).
//!
//! ## Delivery
//!
//! - **Synchronous**: `publish` invokes every listener on the caller's thread
//!   and only returns once all of them have run.
//! - **Ordered per publisher**: listeners see messages in the order a single
//!   publisher published them.
//! - **Snapshot of subscribers**: the set of listeners is captured when
//!   `publish` starts; a listener added or removed during delivery takes
//!   effect from the next message.

use std::sync::Arc;

/// Callback invoked with every published message.
pub type Listener<M> = Arc<dyn Fn(&M) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl core::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ## Thread Safety
///
/// The trait requires `Send + Sync`; implementations may be shared across
/// threads and published to concurrently. Ordering between concurrent
/// publishers is up to the caller (e.g. sequence numbers in an envelope).
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    /// Deliver `message` to every current listener.
    ///
    /// Returns the number of listeners invoked.
    fn publish(&self, message: &M) -> Result<usize, Self::Error>;

    fn subscribe(&self, listener: Listener<M>) -> ListenerId;

    /// Remove a listener. Returns `false` if the id was not subscribed.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: &M) -> Result<usize, Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self, listener: Listener<M>) -> ListenerId {
        (**self).subscribe(listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        (**self).unsubscribe(id)
    }
}
