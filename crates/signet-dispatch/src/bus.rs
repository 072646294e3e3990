//! Bus collaborator seam.
//!
//! A bus is an external stream-oriented sink; the core consumes it
//! through the narrow [`Bus`] trait and resolves instances by name via
//! the [`BusRegistry`]. [`MemoryBus`] is the in-memory reference
//! implementation used by tests and local wiring, not a transport.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use signet_signal::Signal;

use crate::DispatchError;

/// Stream name used when a dispatch target omits one.
pub const DEFAULT_STREAM: &str = "default";

/// A named, stream-partitioned signal sink.
pub trait Bus: Send + Sync {
    /// Appends a signal to the named stream.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DeliveryFailed`] when the bus cannot
    /// accept the signal.
    fn enqueue(&self, stream: &str, signal: Signal) -> Result<(), DispatchError>;
}

/// Registry resolving bus instances by name.
#[derive(Default)]
pub struct BusRegistry {
    buses: RwLock<HashMap<String, Arc<dyn Bus>>>,
}

impl BusRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bus under a name, replacing any previous holder.
    pub fn register(&self, name: impl Into<String>, bus: Arc<dyn Bus>) {
        self.buses.write().insert(name.into(), bus);
    }

    /// Resolves a bus by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Bus>> {
        self.buses.read().get(name).cloned()
    }
}

/// In-memory bus: streams are vectors of signals in arrival order.
#[derive(Default)]
pub struct MemoryBus {
    streams: RwLock<HashMap<String, Vec<Signal>>>,
}

impl MemoryBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every signal queued on the stream.
    #[must_use]
    pub fn drain(&self, stream: &str) -> Vec<Signal> {
        self.streams
            .write()
            .get_mut(stream)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Number of signals queued on the stream.
    #[must_use]
    pub fn depth(&self, stream: &str) -> usize {
        self.streams.read().get(stream).map_or(0, Vec::len)
    }
}

impl Bus for MemoryBus {
    fn enqueue(&self, stream: &str, signal: Signal) -> Result<(), DispatchError> {
        self.streams
            .write()
            .entry(stream.to_string())
            .or_default()
            .push(signal);
        Ok(())
    }
}
