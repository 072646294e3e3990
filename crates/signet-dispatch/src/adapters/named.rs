//! Named adapter: resolve a symbolic name, then deliver.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use signet_signal::{Options, Signal};

use crate::adapter::{reject_unknown, require_str, Adapter};
use crate::endpoint::EndpointRegistry;
use crate::DispatchError;

/// Delivers a signal to the endpoint currently registered under a
/// symbolic name.
///
/// # Options
///
/// | Key | Type | Default |
/// |-----|------|---------|
/// | `target` | registered name | required |
///
/// Resolution happens per delivery, so a name handed over to a
/// restarted worker picks up the new endpoint. A miss fails with
/// [`DispatchError::ProcessNotFound`].
pub struct NamedAdapter {
    endpoints: Arc<EndpointRegistry>,
}

impl NamedAdapter {
    /// Creates the adapter over an endpoint registry.
    #[must_use]
    pub fn new(endpoints: Arc<EndpointRegistry>) -> Self {
        Self { endpoints }
    }
}

#[async_trait]
impl Adapter for NamedAdapter {
    fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
        reject_unknown("named", options, &["target"])?;
        let target = require_str("named", options, "target")?;

        let mut normalized = Options::new();
        normalized.insert("target".into(), Value::String(target));
        Ok(normalized)
    }

    async fn deliver(&self, signal: &Signal, options: &Options) -> Result<(), DispatchError> {
        let target = require_str("named", options, "target")?;
        let endpoint = self
            .endpoints
            .resolve_named(&target)
            .ok_or_else(|| DispatchError::ProcessNotFound(target))?;
        endpoint.send(signal.clone()).await
    }
}
