//! Dispatch directives carried by a signal.
//!
//! A [`DispatchSpec`] names how a signal should be delivered: either a
//! single `(adapter, options)` target or an ordered list of them. The
//! spec is transport-side routing metadata; it travels on the in-memory
//! envelope but is never serialized to the wire.
//!
//! Adapter semantics (what `"bus"` or `"logger"` mean, which option
//! keys each recognizes) live in the dispatch layer. This module only
//! defines the shape and its parse rules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::SignalError;

/// Attribute bag of adapter options.
pub type Options = Map<String, Value>;

/// A single delivery target: an adapter tag plus its options.
///
/// # Example
///
/// ```
/// use signet_signal::DispatchTarget;
///
/// let target = DispatchTarget::new("logger").with_option("level", "warn");
/// assert_eq!(target.adapter, "logger");
/// assert_eq!(target.options["level"], "warn");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchTarget {
    /// Adapter tag: a built-in name (`"direct"`, `"bus"`, …) or the tag
    /// of a registered custom adapter.
    pub adapter: String,
    /// Options recognized by the adapter.
    #[serde(default)]
    pub options: Options,
}

impl DispatchTarget {
    /// Creates a target with empty options.
    #[must_use]
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
            options: Options::new(),
        }
    }

    /// Replaces the option bag wholesale.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Inserts a single option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Dispatch configuration: one target or an ordered sequence.
///
/// # Accepted JSON shapes
///
/// | Shape | Meaning |
/// |-------|---------|
/// | `{"adapter": "bus", "options": {...}}` | single target |
/// | `["bus", {...}]` | single target, pair form |
/// | `[<target>, <target>, ...]` | ordered list of targets |
///
/// Anything else is rejected with `invalid dispatch config`.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchSpec {
    /// Exactly one delivery target.
    Single(DispatchTarget),
    /// An ordered sequence of delivery targets.
    Many(Vec<DispatchTarget>),
}

impl DispatchSpec {
    /// Wraps a single target.
    #[must_use]
    pub fn single(target: DispatchTarget) -> Self {
        Self::Single(target)
    }

    /// Wraps an ordered list of targets.
    #[must_use]
    pub fn many(targets: Vec<DispatchTarget>) -> Self {
        Self::Many(targets)
    }

    /// Number of targets in the spec.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(targets) => targets.len(),
        }
    }

    /// Returns `true` if the spec carries no targets.
    ///
    /// Only possible for an explicit empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates targets in declared order.
    pub fn targets(&self) -> impl Iterator<Item = &DispatchTarget> {
        match self {
            Self::Single(target) => std::slice::from_ref(target).iter(),
            Self::Many(targets) => targets.iter(),
        }
    }

    /// Parses a dispatch configuration from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Parse`] with an `invalid dispatch config`
    /// message for any shape outside the accepted forms.
    pub fn from_value(value: &Value) -> Result<Self, SignalError> {
        match value {
            Value::Object(_) => Ok(Self::Single(parse_target(value)?)),
            Value::Array(items) => {
                // Pair form: ["logger", {...}] is a single target, not a list.
                if is_pair(items) {
                    return Ok(Self::Single(parse_pair(items)?));
                }
                let targets = items
                    .iter()
                    .map(parse_target)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Many(targets))
            }
            other => Err(invalid(format!(
                "expected object, pair, or array, got {}",
                kind_name(other)
            ))),
        }
    }

    /// Serializes the spec back to its JSON representation.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(target) => target_value(target),
            Self::Many(targets) => Value::Array(targets.iter().map(target_value).collect()),
        }
    }
}

impl From<DispatchTarget> for DispatchSpec {
    fn from(target: DispatchTarget) -> Self {
        Self::Single(target)
    }
}

impl From<Vec<DispatchTarget>> for DispatchSpec {
    fn from(targets: Vec<DispatchTarget>) -> Self {
        Self::Many(targets)
    }
}

fn is_pair(items: &[Value]) -> bool {
    items.len() == 2 && items[0].is_string() && items[1].is_object()
}

fn parse_pair(items: &[Value]) -> Result<DispatchTarget, SignalError> {
    let adapter = items[0]
        .as_str()
        .ok_or_else(|| invalid("pair tag must be a string"))?;
    if adapter.is_empty() {
        return Err(invalid("adapter tag must be non-empty"));
    }
    let options = items[1]
        .as_object()
        .cloned()
        .ok_or_else(|| invalid("pair options must be a map"))?;
    Ok(DispatchTarget {
        adapter: adapter.to_string(),
        options,
    })
}

fn parse_target(value: &Value) -> Result<DispatchTarget, SignalError> {
    if let Value::Array(items) = value {
        if is_pair(items) {
            return parse_pair(items);
        }
        return Err(invalid("array element must be a [tag, options] pair"));
    }

    let map = value
        .as_object()
        .ok_or_else(|| invalid(format!("target must be a map, got {}", kind_name(value))))?;

    let adapter = map
        .get("adapter")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("target requires a string 'adapter' tag"))?;
    if adapter.is_empty() {
        return Err(invalid("adapter tag must be non-empty"));
    }

    let options = match map.get("options") {
        None | Some(Value::Null) => Options::new(),
        Some(Value::Object(options)) => options.clone(),
        Some(other) => {
            return Err(invalid(format!(
                "options must be a map, got {}",
                kind_name(other)
            )))
        }
    };

    for key in map.keys() {
        if key != "adapter" && key != "options" {
            return Err(invalid(format!("unknown target key '{key}'")));
        }
    }

    Ok(DispatchTarget {
        adapter: adapter.to_string(),
        options,
    })
}

fn target_value(target: &DispatchTarget) -> Value {
    let mut map = Map::new();
    map.insert("adapter".into(), Value::String(target.adapter.clone()));
    map.insert("options".into(), Value::Object(target.options.clone()));
    Value::Object(map)
}

fn invalid(detail: impl std::fmt::Display) -> SignalError {
    SignalError::Parse(format!("invalid dispatch config: {detail}"))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
