//! Test utilities for the dispatch layer.
//!
//! [`RecordingAdapter`] captures delivered signals so tests can assert
//! on dispatch behavior without real transports. Clones share state,
//! so keep one clone for assertions and register another.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use signet_signal::{Options, Signal};

use crate::{Adapter, DispatchError};

/// An adapter that records every delivery.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use signet_dispatch::testing::RecordingAdapter;
/// use signet_dispatch::AdapterRegistry;
///
/// let recorder = RecordingAdapter::ok();
/// let registry = AdapterRegistry::new();
/// registry.register("recorder", Arc::new(recorder.clone())).unwrap();
///
/// // ... dispatch through the registry ...
/// assert_eq!(recorder.calls(), 0);
/// ```
#[derive(Clone)]
pub struct RecordingAdapter {
    captured: Arc<Mutex<Vec<(Signal, Options)>>>,
    fail_with: Option<String>,
}

impl RecordingAdapter {
    /// A recorder whose deliveries all succeed.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            captured: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// A recorder whose deliveries all fail with the given reason.
    ///
    /// Deliveries are still recorded before failing.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            captured: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(reason.into()),
        }
    }

    /// Number of deliveries seen so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.captured.lock().len()
    }

    /// Every delivered signal, in arrival order.
    #[must_use]
    pub fn captured(&self) -> Vec<Signal> {
        self.captured.lock().iter().map(|(s, _)| s.clone()).collect()
    }

    /// The option bag of the most recent delivery.
    #[must_use]
    pub fn last_options(&self) -> Option<Options> {
        self.captured.lock().last().map(|(_, o)| o.clone())
    }
}

#[async_trait]
impl Adapter for RecordingAdapter {
    fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
        Ok(options.clone())
    }

    async fn deliver(&self, signal: &Signal, options: &Options) -> Result<(), DispatchError> {
        self.captured.lock().push((signal.clone(), options.clone()));
        match &self.fail_with {
            None => Ok(()),
            Some(reason) => Err(DispatchError::DeliveryFailed(reason.clone())),
        }
    }
}
