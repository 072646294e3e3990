//! Adapter registry - tag to adapter resolution.
//!
//! Process-wide mapping populated at startup. Registration is
//! append-only (a taken tag is an error), which keeps concurrent
//! lookups trivially safe; resolution is O(1).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::adapters::{
    BusAdapter, ConsoleAdapter, DirectAdapter, LoggerAdapter, NamedAdapter, NoopAdapter,
    PubSubAdapter,
};
use crate::broker::BrokerRegistry;
use crate::bus::BusRegistry;
use crate::endpoint::EndpointRegistry;
use crate::{Adapter, DispatchError};

/// Maps adapter tags to implementations.
///
/// # Built-in tags
///
/// `direct`, `named`, `bus`, `pubsub`, `logger`, `console`, `noop` -
/// registered by [`AdapterRegistry::with_builtins`]. Custom adapters
/// register under any free tag before first use.
pub struct AdapterRegistry {
    adapters: RwLock<HashMap<String, Arc<dyn Adapter>>>,
}

impl AdapterRegistry {
    /// Creates an empty registry (no built-ins).
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry pre-populated with every built-in adapter,
    /// wired to the given collaborator registries.
    #[must_use]
    pub fn with_builtins(
        endpoints: Arc<EndpointRegistry>,
        buses: Arc<BusRegistry>,
        brokers: Arc<BrokerRegistry>,
    ) -> Self {
        let mut adapters: HashMap<String, Arc<dyn Adapter>> = HashMap::new();
        adapters.insert(
            "direct".into(),
            Arc::new(DirectAdapter::new(Arc::clone(&endpoints))),
        );
        adapters.insert("named".into(), Arc::new(NamedAdapter::new(endpoints)));
        adapters.insert("bus".into(), Arc::new(BusAdapter::new(buses)));
        adapters.insert("pubsub".into(), Arc::new(PubSubAdapter::new(brokers)));
        adapters.insert("logger".into(), Arc::new(LoggerAdapter::new()));
        adapters.insert("console".into(), Arc::new(ConsoleAdapter::new()));
        adapters.insert("noop".into(), Arc::new(NoopAdapter::new()));

        Self {
            adapters: RwLock::new(adapters),
        }
    }

    /// Registers a custom adapter under an opaque tag.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::AdapterExists`] when the tag is taken;
    /// the registry is append-only.
    pub fn register(
        &self,
        tag: impl Into<String>,
        adapter: Arc<dyn Adapter>,
    ) -> Result<(), DispatchError> {
        let tag = tag.into();
        let mut adapters = self.adapters.write();
        if adapters.contains_key(&tag) {
            return Err(DispatchError::AdapterExists(tag));
        }
        debug!(tag = %tag, "registering adapter");
        adapters.insert(tag, adapter);
        Ok(())
    }

    /// Resolves an adapter by tag.
    #[must_use]
    pub fn resolve(&self, tag: &str) -> Option<Arc<dyn Adapter>> {
        self.adapters.read().get(tag).cloned()
    }

    /// Returns `true` when the tag is registered.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.adapters.read().contains_key(tag)
    }

    /// Number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.read().len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.read().is_empty()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
