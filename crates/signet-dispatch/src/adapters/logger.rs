//! Logger adapter: emit signals through the log sink.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use signet_signal::{Options, Signal};

use crate::adapter::{invalid, reject_unknown, Adapter};
use crate::DispatchError;

const LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

/// Formats a signal and emits it at the configured level.
///
/// # Options
///
/// | Key | Type | Default |
/// |-----|------|---------|
/// | `level` | `"debug"` \| `"info"` \| `"warn"` \| `"error"` | `"info"` |
pub struct LoggerAdapter;

impl LoggerAdapter {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for LoggerAdapter {
    fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
        reject_unknown("logger", options, &["level"])?;
        let level = match options.get("level") {
            None => "info".to_string(),
            Some(value) => value
                .as_str()
                .filter(|s| LEVELS.contains(s))
                .map(str::to_string)
                .ok_or_else(|| {
                    invalid("logger", "\"level\" must be debug, info, warn, or error")
                })?,
        };

        let mut normalized = Options::new();
        normalized.insert("level".into(), Value::String(level));
        Ok(normalized)
    }

    async fn deliver(&self, signal: &Signal, options: &Options) -> Result<(), DispatchError> {
        let level = options
            .get("level")
            .and_then(Value::as_str)
            .unwrap_or("info");

        match level {
            "debug" => debug!(
                id = %signal.id,
                source = %signal.source,
                signal_type = %signal.signal_type,
                "signal"
            ),
            "warn" => warn!(
                id = %signal.id,
                source = %signal.source,
                signal_type = %signal.signal_type,
                "signal"
            ),
            "error" => error!(
                id = %signal.id,
                source = %signal.source,
                signal_type = %signal.signal_type,
                "signal"
            ),
            _ => info!(
                id = %signal.id,
                source = %signal.source,
                signal_type = %signal.signal_type,
                "signal"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_defaults_to_info() {
        let adapter = LoggerAdapter::new();
        let normalized = adapter.validate(&Options::new()).unwrap();
        assert_eq!(normalized["level"], "info");
    }

    #[test]
    fn validate_accepts_known_levels() {
        let adapter = LoggerAdapter::new();
        for level in LEVELS {
            let mut options = Options::new();
            options.insert("level".into(), json!(level));
            assert_eq!(adapter.validate(&options).unwrap()["level"], level);
        }
    }

    #[test]
    fn validate_rejects_unknown_level() {
        let adapter = LoggerAdapter::new();
        let mut options = Options::new();
        options.insert("level".into(), json!("shout"));
        assert!(adapter.validate(&options).is_err());
    }

    #[tokio::test]
    async fn deliver_succeeds_at_every_level() {
        let adapter = LoggerAdapter::new();
        let signal = Signal::builder("a.b", "/test").build().unwrap();
        for level in LEVELS {
            let mut options = Options::new();
            options.insert("level".into(), json!(level));
            let opts = adapter.validate(&options).unwrap();
            assert!(adapter.deliver(&signal, &opts).await.is_ok());
        }
    }
}
