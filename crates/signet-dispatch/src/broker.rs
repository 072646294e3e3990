//! Publish/subscribe collaborator seam.
//!
//! A broker fans a published signal out to every subscriber of its
//! topic. The core consumes brokers through the narrow [`Broker`]
//! trait and resolves them by name via the [`BrokerRegistry`].
//! [`MemoryBroker`] is the in-memory reference implementation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use signet_signal::Signal;

use crate::DispatchError;

/// A topic-based fan-out publisher.
pub trait Broker: Send + Sync {
    /// Publishes a signal to every subscriber of `topic`.
    ///
    /// Publishing to a topic with no subscribers succeeds; fan-out
    /// gives no cross-signal ordering guarantee.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DeliveryFailed`] when the broker
    /// cannot accept the signal at all.
    fn publish(&self, topic: &str, signal: Signal) -> Result<(), DispatchError>;
}

/// Registry resolving broker instances by name.
#[derive(Default)]
pub struct BrokerRegistry {
    brokers: RwLock<HashMap<String, Arc<dyn Broker>>>,
}

impl BrokerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a broker under a name, replacing any previous holder.
    pub fn register(&self, name: impl Into<String>, broker: Arc<dyn Broker>) {
        self.brokers.write().insert(name.into(), broker);
    }

    /// Resolves a broker by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Broker>> {
        self.brokers.read().get(name).cloned()
    }
}

/// In-memory broker over unbounded channels.
#[derive(Default)]
pub struct MemoryBroker {
    topics: RwLock<HashMap<String, Vec<mpsc::UnboundedSender<Signal>>>>,
}

impl MemoryBroker {
    /// Creates an empty broker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a topic; the receiver sees every later publish.
    #[must_use]
    pub fn subscribe(&self, topic: &str) -> mpsc::UnboundedReceiver<Signal> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.topics
            .write()
            .entry(topic.to_string())
            .or_default()
            .push(tx);
        rx
    }
}

impl Broker for MemoryBroker {
    fn publish(&self, topic: &str, signal: Signal) -> Result<(), DispatchError> {
        let mut topics = self.topics.write();
        if let Some(subscribers) = topics.get_mut(topic) {
            // Dropped receivers fall out of the subscriber list here.
            subscribers.retain(|tx| tx.send(signal.clone()).is_ok());
        }
        Ok(())
    }
}
