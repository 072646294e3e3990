//! Direct adapter: deliver to a single endpoint by ID.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use signet_signal::{Options, Signal};

use crate::adapter::{invalid, reject_unknown, require_str, Adapter};
use crate::endpoint::{DeliveryMode, EndpointRegistry};
use crate::DispatchError;

/// Delivers a signal to one endpoint, resolved by endpoint ID.
///
/// # Options
///
/// | Key | Type | Default |
/// |-----|------|---------|
/// | `target` | endpoint ID | required |
/// | `delivery_mode` | `"sync"` \| `"async"` | `"sync"` |
///
/// With `delivery_mode = "async"`, `deliver` returns immediately after
/// enqueuing the send; a later endpoint failure is logged, not
/// surfaced.
pub struct DirectAdapter {
    endpoints: Arc<EndpointRegistry>,
}

impl DirectAdapter {
    /// Creates the adapter over an endpoint registry.
    #[must_use]
    pub fn new(endpoints: Arc<EndpointRegistry>) -> Self {
        Self { endpoints }
    }
}

#[async_trait]
impl Adapter for DirectAdapter {
    fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
        reject_unknown("direct", options, &["target", "delivery_mode"])?;
        let target = require_str("direct", options, "target")?;

        let mode = match options.get("delivery_mode") {
            None => DeliveryMode::Sync,
            Some(value) => value
                .as_str()
                .and_then(DeliveryMode::parse)
                .ok_or_else(|| {
                    invalid("direct", "\"delivery_mode\" must be \"sync\" or \"async\"")
                })?,
        };

        let mut normalized = Options::new();
        normalized.insert("target".into(), Value::String(target));
        normalized.insert(
            "delivery_mode".into(),
            Value::String(mode.as_str().to_string()),
        );
        Ok(normalized)
    }

    async fn deliver(&self, signal: &Signal, options: &Options) -> Result<(), DispatchError> {
        let target = require_str("direct", options, "target")?;
        let endpoint = self
            .endpoints
            .resolve(&target)
            .ok_or_else(|| DispatchError::ProcessNotFound(target.clone()))?;

        let mode = options
            .get("delivery_mode")
            .and_then(Value::as_str)
            .and_then(DeliveryMode::parse)
            .unwrap_or(DeliveryMode::Sync);

        match mode {
            DeliveryMode::Sync => endpoint.send(signal.clone()).await,
            DeliveryMode::Async => {
                let signal = signal.clone();
                tokio::spawn(async move {
                    if let Err(e) = endpoint.send(signal).await {
                        warn!(endpoint = %target, error = %e, "async direct delivery failed");
                    }
                });
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use serde_json::json;

    fn setup() -> (DirectAdapter, Arc<EndpointRegistry>) {
        let endpoints = Arc::new(EndpointRegistry::new());
        (DirectAdapter::new(Arc::clone(&endpoints)), endpoints)
    }

    fn signal() -> Signal {
        Signal::builder("a.b", "/test").build().unwrap()
    }

    fn options(pairs: &[(&str, Value)]) -> Options {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn validate_fills_default_mode() {
        let (adapter, _) = setup();
        let normalized = adapter
            .validate(&options(&[("target", json!("ep-1"))]))
            .unwrap();
        assert_eq!(normalized["delivery_mode"], "sync");
    }

    #[test]
    fn validate_rejects_bad_mode_and_unknown_keys() {
        let (adapter, _) = setup();
        assert!(adapter
            .validate(&options(&[
                ("target", json!("ep-1")),
                ("delivery_mode", json!("eventually")),
            ]))
            .is_err());
        assert!(adapter
            .validate(&options(&[("target", json!("ep-1")), ("extra", json!(1))]))
            .is_err());
        assert!(adapter.validate(&Options::new()).is_err());
    }

    #[tokio::test]
    async fn sync_delivery_reaches_endpoint() {
        let (adapter, endpoints) = setup();
        let (endpoint, mut rx) = Endpoint::channel(4);
        let id = endpoints.register(endpoint);

        let opts = adapter
            .validate(&options(&[("target", json!(id))]))
            .unwrap();
        adapter.deliver(&signal(), &opts).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().signal_type, "a.b");
    }

    #[tokio::test]
    async fn async_delivery_returns_immediately() {
        let (adapter, endpoints) = setup();
        let (endpoint, mut rx) = Endpoint::channel(1);
        let id = endpoints.register(endpoint);

        let opts = adapter
            .validate(&options(&[
                ("target", json!(id)),
                ("delivery_mode", json!("async")),
            ]))
            .unwrap();
        adapter.deliver(&signal(), &opts).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().signal_type, "a.b");
    }

    #[tokio::test]
    async fn unknown_endpoint_is_process_not_found() {
        let (adapter, _) = setup();
        let opts = adapter
            .validate(&options(&[("target", json!("missing"))]))
            .unwrap();

        let err = adapter.deliver(&signal(), &opts).await.unwrap_err();
        assert_eq!(err, DispatchError::ProcessNotFound("missing".into()));
    }
}
