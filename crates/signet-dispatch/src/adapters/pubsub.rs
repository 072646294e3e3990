//! Pub/sub adapter: fan-out publish through a broker.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use signet_signal::{Options, Signal};

use crate::adapter::{reject_unknown, require_str, Adapter};
use crate::broker::BrokerRegistry;
use crate::DispatchError;

/// Publishes a signal to a topic of a registered broker.
///
/// # Options
///
/// | Key | Type | Default |
/// |-----|------|---------|
/// | `target` | broker name | required |
/// | `topic` | topic name | required |
///
/// Subscriber-side delivery is the broker's concern; fan-out gives no
/// cross-signal ordering guarantee.
pub struct PubSubAdapter {
    brokers: Arc<BrokerRegistry>,
}

impl PubSubAdapter {
    /// Creates the adapter over a broker registry.
    #[must_use]
    pub fn new(brokers: Arc<BrokerRegistry>) -> Self {
        Self { brokers }
    }
}

#[async_trait]
impl Adapter for PubSubAdapter {
    fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
        reject_unknown("pubsub", options, &["target", "topic"])?;
        let target = require_str("pubsub", options, "target")?;
        let topic = require_str("pubsub", options, "topic")?;

        let mut normalized = Options::new();
        normalized.insert("target".into(), Value::String(target));
        normalized.insert("topic".into(), Value::String(topic));
        Ok(normalized)
    }

    async fn deliver(&self, signal: &Signal, options: &Options) -> Result<(), DispatchError> {
        let target = require_str("pubsub", options, "target")?;
        let topic = require_str("pubsub", options, "topic")?;

        let broker = self.brokers.resolve(&target).ok_or_else(|| {
            DispatchError::DeliveryFailed(format!("broker \"{target}\" not found"))
        })?;
        broker.publish(&topic, signal.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::MemoryBroker;
    use serde_json::json;

    fn options(target: &str, topic: &str) -> Options {
        let mut options = Options::new();
        options.insert("target".into(), json!(target));
        options.insert("topic".into(), json!(topic));
        options
    }

    #[tokio::test]
    async fn publishes_to_topic_subscribers() {
        let memory = Arc::new(MemoryBroker::new());
        let registry = Arc::new(BrokerRegistry::new());
        registry.register("events", Arc::clone(&memory) as Arc<dyn crate::Broker>);
        let adapter = PubSubAdapter::new(registry);

        let mut rx = memory.subscribe("user");
        let signal = Signal::builder("user.created", "/test").build().unwrap();

        let opts = adapter.validate(&options("events", "user")).unwrap();
        adapter.deliver(&signal, &opts).await.unwrap();

        assert_eq!(rx.try_recv().unwrap().signal_type, "user.created");
    }

    #[test]
    fn validate_requires_both_keys() {
        let registry = Arc::new(BrokerRegistry::new());
        let adapter = PubSubAdapter::new(registry);

        let mut only_target = Options::new();
        only_target.insert("target".into(), json!("events"));
        assert!(adapter.validate(&only_target).is_err());

        let mut only_topic = Options::new();
        only_topic.insert("topic".into(), json!("user"));
        assert!(adapter.validate(&only_topic).is_err());
    }

    #[tokio::test]
    async fn unknown_broker_is_delivery_failure() {
        let registry = Arc::new(BrokerRegistry::new());
        let adapter = PubSubAdapter::new(registry);
        let signal = Signal::builder("a.b", "/test").build().unwrap();

        let err = adapter
            .deliver(&signal, &options("ghost", "user"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::DeliveryFailed(_)));
    }
}
