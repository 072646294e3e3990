//! Noop adapter: accept anything, deliver nowhere.

use async_trait::async_trait;

use signet_signal::{Options, Signal};

use crate::adapter::Adapter;
use crate::DispatchError;

/// Discards every signal. Accepts arbitrary options unchanged.
///
/// Useful as a stand-in target in tests and as the sink for routes
/// whose only purpose is their guard side of the match.
pub struct NoopAdapter;

impl NoopAdapter {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for NoopAdapter {
    fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
        Ok(options.clone())
    }

    async fn deliver(&self, _signal: &Signal, _options: &Options) -> Result<(), DispatchError> {
        Ok(())
    }
}
