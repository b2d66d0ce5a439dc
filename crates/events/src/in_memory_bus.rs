//! In-memory event bus.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::bus::{EventBus, Listener, ListenerId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// One or more listeners panicked. Every other listener still ran.
    #[error("{panicked} of {listeners} listener(s) panicked")]
    ListenerPanicked { panicked: usize, listeners: usize },
}

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Listeners run on the publishing thread, in subscription order
/// - The registry lock is released before listeners run, so a listener may
///   subscribe, unsubscribe or publish again without deadlocking
/// - A panicking listener is caught and logged; the rest still receive the
///   message, and the panic is reported through the `publish` result
/// - A poisoned registry lock is recovered, never dropping a message
pub struct InMemoryEventBus<M> {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, Listener<M>)>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently subscribed listeners.
    pub fn listener_count(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, Vec<(ListenerId, Listener<M>)>> {
        self.listeners.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("listener registry poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }
}

impl<M> core::fmt::Debug for InMemoryEventBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Send + Sync + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: &M) -> Result<usize, Self::Error> {
        let targets: Vec<(ListenerId, Listener<M>)> = self.registry().clone();

        let mut panicked = 0;
        for (id, listener) in &targets {
            if panic::catch_unwind(AssertUnwindSafe(|| listener(message))).is_err() {
                tracing::warn!(listener = %id, "listener panicked while handling a message");
                panicked += 1;
            }
        }

        if panicked > 0 {
            return Err(InMemoryBusError::ListenerPanicked {
                panicked,
                listeners: targets.len(),
            });
        }

        Ok(targets.len())
    }

    fn subscribe(&self, listener: Listener<M>) -> ListenerId {
        let id = ListenerId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registry().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.registry();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }
}
