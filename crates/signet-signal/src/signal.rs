//! Signal envelope: construction, defaults, validation.
//!
//! A [`Signal`] is an immutable event envelope conforming to CloudEvents
//! v1.0.2 plus an optional [`DispatchSpec`] extension. Construction goes
//! through one of two surfaces:
//!
//! - [`Signal::from_map`] - an attribute bag (`serde_json::Map`) in,
//!   validated envelope out. This is the surface the JSON codec reuses,
//!   so wire decode and in-process construction share one validation
//!   path.
//! - [`Signal::builder`] - a typed builder for Rust callers.
//!
//! # Validation Order
//!
//! Rules run in a fixed order and the first failure short-circuits:
//!
//! 1. `specversion` equals `"1.0.2"`
//! 2. `type` present and non-empty
//! 3. `source` present and non-empty (a configured default may fill it)
//! 4. `id` absent (auto-generated) or non-empty
//! 5. `subject`, `time`, `datacontenttype`, `dataschema` non-empty when present
//! 6. `data` not an empty string
//! 7. `dispatch` null, a target, or a list of targets
//!
//! Failures are [`SignalError::Parse`] with a `parse error:` prefix
//! naming the offending field.
//!
//! # Example
//!
//! ```
//! use signet_signal::Signal;
//! use serde_json::json;
//!
//! let signal = Signal::builder("user.created", "/service/users")
//!     .subject("user-42")
//!     .data(json!({"email": "a@example.com"}))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(signal.specversion, "1.0.2");
//! assert_eq!(signal.datacontenttype.as_deref(), Some("application/json"));
//! assert!(!signal.id.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dispatch::DispatchSpec;
use crate::{id, SignalDefaults, SignalError};

/// The only CloudEvents spec version this envelope speaks.
pub const SPEC_VERSION: &str = "1.0.2";

/// Content type injected when `data` is present and no content type was
/// given.
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Immutable event envelope (CloudEvents v1.0.2 + dispatch extension).
///
/// # Fields
///
/// | Field | Required | Notes |
/// |-------|----------|-------|
/// | `specversion` | yes | always `"1.0.2"` |
/// | `id` | yes | defaults to a fresh UUID v4 |
/// | `source` | yes | non-empty, conventional URI-path shape |
/// | `signal_type` | yes | dotted lowercase segments, wire name `type` |
/// | `subject` | no | non-empty when present |
/// | `time` | no | ISO-8601; defaults to creation time |
/// | `datacontenttype` | no | defaults to `application/json` iff `data` present |
/// | `dataschema` | no | non-empty when present |
/// | `data` | no | arbitrary JSON payload |
/// | `dispatch` | no | delivery directives; never serialized |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// CloudEvents spec version, always [`SPEC_VERSION`].
    pub specversion: String,
    /// Unique event identifier.
    pub id: String,
    /// Origin of the event.
    pub source: String,
    /// Hierarchical dotted event type (e.g. `user.profile.updated`).
    #[serde(rename = "type")]
    pub signal_type: String,
    /// Subject of the event within the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Occurrence time, ISO-8601 UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Media type of `data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacontenttype: Option<String>,
    /// Schema reference for `data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataschema: Option<String>,
    /// Opaque payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Delivery directives. Transport-side metadata, never on the wire.
    #[serde(skip)]
    pub dispatch: Option<DispatchSpec>,
}

impl Signal {
    /// Starts a typed builder.
    ///
    /// `signal_type` and `source` are the two attributes with no
    /// default; everything else can be filled in or left to defaulting.
    #[must_use]
    pub fn builder(signal_type: impl Into<String>, source: impl Into<String>) -> SignalBuilder {
        SignalBuilder::new(signal_type, source)
    }

    /// Builds a signal from an attribute bag.
    ///
    /// Equivalent to [`Signal::from_map_with`] with empty defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Parse`] on the first validation failure.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, SignalError> {
        Self::from_map_with(map, &SignalDefaults::default())
    }

    /// Builds a signal from an attribute bag with configured defaults.
    ///
    /// Missing `specversion`, `id`, and `time` are filled automatically;
    /// a missing `source` is filled from `defaults` when configured.
    /// User-supplied values always win over defaults. Unrecognized keys
    /// are ignored (CloudEvents extension tolerance); an explicit JSON
    /// `null` counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Parse`] on the first validation failure,
    /// in the documented rule order.
    pub fn from_map_with(
        map: Map<String, Value>,
        defaults: &SignalDefaults,
    ) -> Result<Self, SignalError> {
        let specversion = match get(&map, "specversion") {
            None => SPEC_VERSION.to_string(),
            Some(value) => {
                let version = value
                    .as_str()
                    .ok_or_else(|| parse("specversion must be a string"))?;
                if version != SPEC_VERSION {
                    return Err(parse(format!(
                        "specversion must be \"{SPEC_VERSION}\", got \"{version}\""
                    )));
                }
                version.to_string()
            }
        };

        let signal_type = required_string(&map, "type")?;
        let source = match optional_string(&map, "source")? {
            Some(source) => source,
            None => defaults
                .source
                .clone()
                .ok_or_else(|| parse("source is required"))?,
        };
        let id = optional_string(&map, "id")?.unwrap_or_else(id::generate);

        let subject = optional_string(&map, "subject")?;
        let time = optional_string(&map, "time")?;
        let datacontenttype = optional_string(&map, "datacontenttype")?;
        let dataschema = optional_string(&map, "dataschema")?;

        let data = match get(&map, "data") {
            None => None,
            Some(Value::String(s)) if s.is_empty() => {
                return Err(parse("data must not be an empty string"))
            }
            Some(value) => Some(value.clone()),
        };

        let dispatch = match get(&map, "dispatch") {
            None => None,
            Some(value) => Some(DispatchSpec::from_value(value)?),
        };

        let time = Some(time.unwrap_or_else(id::timestamp));
        let datacontenttype = match (datacontenttype, &data) {
            (None, Some(_)) => Some(DEFAULT_CONTENT_TYPE.to_string()),
            (ct, _) => ct,
        };

        Ok(Self {
            specversion,
            id,
            source,
            signal_type,
            subject,
            time,
            datacontenttype,
            dataschema,
            data,
            dispatch,
        })
    }

    /// Returns the dotted type split into segments.
    ///
    /// No validation happens here; the router owns type validation.
    pub fn type_segments(&self) -> impl Iterator<Item = &str> {
        self.signal_type.split('.')
    }
}

/// Typed builder for [`Signal`].
///
/// Every setter returns `self`; [`build`](Self::build) runs the same
/// validation as [`Signal::from_map`].
#[derive(Debug, Clone)]
pub struct SignalBuilder {
    map: Map<String, Value>,
    dispatch: Option<DispatchSpec>,
    defaults: SignalDefaults,
}

impl SignalBuilder {
    fn new(signal_type: impl Into<String>, source: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("type".into(), Value::String(signal_type.into()));
        map.insert("source".into(), Value::String(source.into()));
        Self {
            map,
            dispatch: None,
            defaults: SignalDefaults::default(),
        }
    }

    /// Sets an explicit event ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.map.insert("id".into(), Value::String(id.into()));
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.map
            .insert("subject".into(), Value::String(subject.into()));
        self
    }

    /// Sets an explicit occurrence time (ISO-8601).
    #[must_use]
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.map.insert("time".into(), Value::String(time.into()));
        self
    }

    /// Sets the data content type.
    #[must_use]
    pub fn datacontenttype(mut self, content_type: impl Into<String>) -> Self {
        self.map
            .insert("datacontenttype".into(), Value::String(content_type.into()));
        self
    }

    /// Sets the data schema reference.
    #[must_use]
    pub fn dataschema(mut self, schema: impl Into<String>) -> Self {
        self.map
            .insert("dataschema".into(), Value::String(schema.into()));
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.map.insert("data".into(), data.into());
        self
    }

    /// Attaches dispatch directives.
    #[must_use]
    pub fn dispatch(mut self, spec: impl Into<DispatchSpec>) -> Self {
        self.dispatch = Some(spec.into());
        self
    }

    /// Sets the defaults bag consulted during build.
    #[must_use]
    pub fn defaults(mut self, defaults: SignalDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Validates and produces the signal.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Parse`] on the first validation failure.
    pub fn build(self) -> Result<Signal, SignalError> {
        let mut map = self.map;
        if let Some(spec) = &self.dispatch {
            map.insert("dispatch".into(), spec.to_value());
        }
        Signal::from_map_with(map, &self.defaults)
    }
}

/// Map lookup that treats explicit `null` as absent.
fn get<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match map.get(key) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

fn required_string(map: &Map<String, Value>, key: &str) -> Result<String, SignalError> {
    optional_string(map, key)?.ok_or_else(|| parse(format!("{key} is required")))
}

fn optional_string(map: &Map<String, Value>, key: &str) -> Result<Option<String>, SignalError> {
    match get(map, key) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => {
            Err(parse(format!("{key} must be a non-empty string")))
        }
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(parse(format!("{key} must be a string"))),
    }
}

fn parse(detail: impl Into<String>) -> SignalError {
    SignalError::Parse(detail.into())
}
