//! Console adapter: human-readable print.

use async_trait::async_trait;

use signet_signal::{Options, Signal};

use crate::adapter::{reject_unknown, Adapter};
use crate::DispatchError;

/// Prints a signal in a human-readable layout to stdout.
///
/// Takes no options; any key is rejected.
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn render(signal: &Signal) -> String {
        let mut out = format!(
            "[{}] {} (from {})",
            signal.time.as_deref().unwrap_or("-"),
            signal.signal_type,
            signal.source,
        );
        if let Some(subject) = &signal.subject {
            out.push_str(&format!("\n  subject: {subject}"));
        }
        if let Some(data) = &signal.data {
            out.push_str(&format!("\n  data: {data}"));
        }
        out
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for ConsoleAdapter {
    fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
        reject_unknown("console", options, &[])?;
        Ok(Options::new())
    }

    async fn deliver(&self, signal: &Signal, _options: &Options) -> Result<(), DispatchError> {
        println!("{}", Self::render(signal));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_rejects_any_option() {
        let adapter = ConsoleAdapter::new();
        assert!(adapter.validate(&Options::new()).is_ok());

        let mut options = Options::new();
        options.insert("color".into(), json!(true));
        assert!(adapter.validate(&options).is_err());
    }

    #[test]
    fn render_includes_type_source_and_data() {
        let signal = Signal::builder("user.created", "/svc/users")
            .subject("user-1")
            .data(json!({"k": 1}))
            .build()
            .unwrap();

        let rendered = ConsoleAdapter::render(&signal);
        assert!(rendered.contains("user.created"));
        assert!(rendered.contains("/svc/users"));
        assert!(rendered.contains("subject: user-1"));
        assert!(rendered.contains("\"k\":1"));
    }

    #[tokio::test]
    async fn deliver_succeeds() {
        let adapter = ConsoleAdapter::new();
        let signal = Signal::builder("a.b", "/test").build().unwrap();
        assert!(adapter.deliver(&signal, &Options::new()).await.is_ok());
    }
}
