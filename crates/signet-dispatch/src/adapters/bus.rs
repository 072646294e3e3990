//! Bus adapter: enqueue onto a named stream.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use signet_signal::{Options, Signal};

use crate::adapter::{optional_str, reject_unknown, require_str, Adapter};
use crate::bus::{BusRegistry, DEFAULT_STREAM};
use crate::DispatchError;

/// Enqueues a signal onto a stream of a registered bus.
///
/// # Options
///
/// | Key | Type | Default |
/// |-----|------|---------|
/// | `target` | bus name | required |
/// | `stream` | stream name | `"default"` |
///
/// An unresolved bus fails with [`DispatchError::BusNotFound`].
pub struct BusAdapter {
    buses: Arc<BusRegistry>,
}

impl BusAdapter {
    /// Creates the adapter over a bus registry.
    #[must_use]
    pub fn new(buses: Arc<BusRegistry>) -> Self {
        Self { buses }
    }
}

#[async_trait]
impl Adapter for BusAdapter {
    fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
        reject_unknown("bus", options, &["target", "stream"])?;
        let target = require_str("bus", options, "target")?;
        let stream =
            optional_str("bus", options, "stream")?.unwrap_or_else(|| DEFAULT_STREAM.to_string());

        let mut normalized = Options::new();
        normalized.insert("target".into(), Value::String(target));
        normalized.insert("stream".into(), Value::String(stream));
        Ok(normalized)
    }

    async fn deliver(&self, signal: &Signal, options: &Options) -> Result<(), DispatchError> {
        let target = require_str("bus", options, "target")?;
        let stream =
            optional_str("bus", options, "stream")?.unwrap_or_else(|| DEFAULT_STREAM.to_string());

        let bus = self
            .buses
            .resolve(&target)
            .ok_or_else(|| DispatchError::BusNotFound(target))?;
        bus.enqueue(&stream, signal.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MemoryBus;
    use serde_json::json;

    fn setup() -> (BusAdapter, Arc<MemoryBus>) {
        let memory = Arc::new(MemoryBus::new());
        let registry = Arc::new(BusRegistry::new());
        registry.register("events", Arc::clone(&memory) as Arc<dyn crate::Bus>);
        (BusAdapter::new(registry), memory)
    }

    fn signal() -> Signal {
        Signal::builder("a.b", "/test").build().unwrap()
    }

    #[test]
    fn validate_defaults_stream() {
        let (adapter, _) = setup();
        let mut options = Options::new();
        options.insert("target".into(), json!("events"));

        let normalized = adapter.validate(&options).unwrap();
        assert_eq!(normalized["stream"], "default");
    }

    #[tokio::test]
    async fn enqueues_on_named_stream() {
        let (adapter, memory) = setup();
        let mut options = Options::new();
        options.insert("target".into(), json!("events"));
        options.insert("stream".into(), json!("audit"));

        let opts = adapter.validate(&options).unwrap();
        adapter.deliver(&signal(), &opts).await.unwrap();

        assert_eq!(memory.depth("audit"), 1);
        assert_eq!(memory.depth("default"), 0);
    }

    #[tokio::test]
    async fn miss_is_bus_not_found() {
        let (adapter, _) = setup();
        let mut options = Options::new();
        options.insert("target".into(), json!("ghost"));

        let opts = adapter.validate(&options).unwrap();
        let err = adapter.deliver(&signal(), &opts).await.unwrap_err();
        assert_eq!(err, DispatchError::BusNotFound("ghost".into()));
    }
}
