//! Construction-time defaults for signal envelopes.
//!
//! The envelope constructor fills `specversion`, `id`, and `time` on its
//! own. The `source` attribute has no universal default, so consumers
//! that want one configure it here explicitly rather than relying on any
//! kind of caller introspection.

/// Defaults consulted when an attribute bag omits optional-at-build
/// fields.
///
/// # Example
///
/// ```
/// use signet_signal::{Signal, SignalDefaults};
/// use serde_json::Map;
///
/// let defaults = SignalDefaults::new().with_source("/service/enrichment");
///
/// let mut map = Map::new();
/// map.insert("type".into(), "user.created".into());
///
/// let signal = Signal::from_map_with(map, &defaults).unwrap();
/// assert_eq!(signal.source, "/service/enrichment");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalDefaults {
    /// Default `source` injected when the attribute bag omits one.
    pub source: Option<String>,
}

impl SignalDefaults {
    /// Creates an empty defaults bag (no default source).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default `source`.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
