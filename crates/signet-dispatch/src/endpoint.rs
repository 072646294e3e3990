//! Endpoints: in-process delivery targets.
//!
//! An [`Endpoint`] is a cloneable handle over a bounded channel that a
//! consumer task drains. The [`EndpointRegistry`] resolves them two
//! ways, matching the two endpoint-addressing adapters:
//!
//! - by **endpoint ID** (assigned at creation) - the `direct` adapter;
//! - by **registered name** (a symbolic name chosen by the consumer) -
//!   the `named` adapter.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use signet_signal::{id, Signal};

use crate::DispatchError;

/// How a direct delivery behaves with respect to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// The dispatcher waits until the endpoint accepts the signal.
    Sync,
    /// The dispatcher returns immediately after enqueuing the send.
    Async,
}

impl DeliveryMode {
    /// Parses the option value; `None` for anything unrecognized.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sync" => Some(Self::Sync),
            "async" => Some(Self::Async),
            _ => None,
        }
    }

    /// The option value for this mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}

/// Cloneable handle to an in-process delivery target.
#[derive(Debug, Clone)]
pub struct Endpoint {
    id: String,
    tx: mpsc::Sender<Signal>,
}

impl Endpoint {
    /// Creates an endpoint and the receiver its consumer drains.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Signal>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                id: id::generate(),
                tx,
            },
            rx,
        )
    }

    /// Creates an endpoint whose ID is derived from a well-known name
    /// (UUID v5, deterministic).
    ///
    /// The same name yields the same endpoint ID in every process, so
    /// `direct` targets for fixed infrastructure endpoints can be
    /// written down once and stay valid across restarts.
    ///
    /// # Example
    ///
    /// ```
    /// use signet_dispatch::Endpoint;
    ///
    /// let (a, _rx_a) = Endpoint::well_known("audit", 8);
    /// let (b, _rx_b) = Endpoint::well_known("audit", 8);
    /// assert_eq!(a.id(), b.id());
    /// ```
    #[must_use]
    pub fn well_known(name: &str, capacity: usize) -> (Self, mpsc::Receiver<Signal>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                id: id::derive(name),
                tx,
            },
            rx,
        )
    }

    /// The endpoint's unique ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sends one signal, waiting for channel capacity.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DeliveryFailed`] when the consumer has
    /// dropped its receiver.
    pub async fn send(&self, signal: Signal) -> Result<(), DispatchError> {
        self.tx
            .send(signal)
            .await
            .map_err(|_| DispatchError::DeliveryFailed(format!("endpoint {} closed", self.id)))
    }
}

#[derive(Default)]
struct Entries {
    by_id: HashMap<String, Endpoint>,
    by_name: HashMap<String, Endpoint>,
}

/// Registry resolving endpoints by ID or by symbolic name.
///
/// # Concurrency
///
/// Interior `RwLock`; resolution takes a read lock, registration a
/// write lock. Handles are cloned out, so delivery itself holds no
/// lock.
#[derive(Default)]
pub struct EndpointRegistry {
    entries: RwLock<Entries>,
}

impl EndpointRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an endpoint by its ID. Returns the ID.
    pub fn register(&self, endpoint: Endpoint) -> String {
        let id = endpoint.id.clone();
        self.entries.write().by_id.insert(id.clone(), endpoint);
        id
    }

    /// Registers an endpoint under a symbolic name.
    ///
    /// Re-registering a name replaces the previous endpoint, which is
    /// how consumers hand a name over to a restarted worker.
    pub fn register_named(&self, name: impl Into<String>, endpoint: Endpoint) {
        self.entries.write().by_name.insert(name.into(), endpoint);
    }

    /// Resolves an endpoint by ID.
    #[must_use]
    pub fn resolve(&self, endpoint_id: &str) -> Option<Endpoint> {
        self.entries.read().by_id.get(endpoint_id).cloned()
    }

    /// Resolves an endpoint by registered name.
    #[must_use]
    pub fn resolve_named(&self, name: &str) -> Option<Endpoint> {
        self.entries.read().by_name.get(name).cloned()
    }

    /// Removes an endpoint by ID.
    pub fn unregister(&self, endpoint_id: &str) {
        self.entries.write().by_id.remove(endpoint_id);
    }

    /// Removes a named registration.
    pub fn unregister_named(&self, name: &str) {
        self.entries.write().by_name.remove(name);
    }
}
