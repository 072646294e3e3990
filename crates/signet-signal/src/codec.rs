//! JSON wire codec for signals.
//!
//! Encoding emits only the CloudEvents-standard fields plus `data`; the
//! `dispatch` extension is transport-side routing metadata and never
//! reaches the wire. Absent optionals are omitted rather than emitted
//! as `null`.
//!
//! Decoding dispatches on the top-level JSON kind: an object is a single
//! signal, an array is a homogeneous sequence. Every element passes
//! through the same validation as envelope construction
//! ([`Signal::from_map`]); the first failing element aborts the whole
//! decode.
//!
//! # Round-trip
//!
//! For any constructed signal, `from_json(to_json(s))` restores `s`
//! except for `dispatch`, which decodes as `None`.

use serde_json::Value;

use crate::{Signal, SignalError};

/// Result of decoding a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The document was a single object.
    One(Signal),
    /// The document was an array.
    Many(Vec<Signal>),
}

/// Encodes one signal as a JSON object.
///
/// # Errors
///
/// Returns [`SignalError::Encode`] if serialization fails.
pub fn to_json(signal: &Signal) -> Result<String, SignalError> {
    serde_json::to_string(signal).map_err(|e| SignalError::Encode(e.to_string()))
}

/// Encodes a sequence of signals as a JSON array.
///
/// # Errors
///
/// Returns [`SignalError::Encode`] if serialization fails.
pub fn to_json_many(signals: &[Signal]) -> Result<String, SignalError> {
    serde_json::to_string(signals).map_err(|e| SignalError::Encode(e.to_string()))
}

/// Decodes a JSON document into one signal or a sequence.
///
/// # Errors
///
/// - [`SignalError::Decode`] if the input is not JSON, or its top-level
///   kind is neither object nor array, or an array element is not an
///   object.
/// - [`SignalError::Parse`] if any element fails envelope validation;
///   the first failure aborts the entire decode.
pub fn from_json(input: &str) -> Result<Decoded, SignalError> {
    let value: Value =
        serde_json::from_str(input).map_err(|e| SignalError::Decode(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(Decoded::One(Signal::from_map(map)?)),
        Value::Array(items) => {
            let mut signals = Vec::with_capacity(items.len());
            for item in items {
                let Value::Object(map) = item else {
                    return Err(SignalError::Decode(
                        "array elements must be JSON objects".into(),
                    ));
                };
                signals.push(Signal::from_map(map)?);
            }
            Ok(Decoded::Many(signals))
        }
        _ => Err(SignalError::Decode(
            "expected a JSON object or array at the top level".into(),
        )),
    }
}

/// Decodes a document that must be a single signal.
///
/// # Errors
///
/// As [`from_json`], plus [`SignalError::Decode`] when the document is
/// an array.
pub fn signal_from_json(input: &str) -> Result<Signal, SignalError> {
    match from_json(input)? {
        Decoded::One(signal) => Ok(signal),
        Decoded::Many(_) => Err(SignalError::Decode(
            "expected a single signal, got an array".into(),
        )),
    }
}

/// Decodes a document that must be a sequence of signals.
///
/// # Errors
///
/// As [`from_json`], plus [`SignalError::Decode`] when the document is
/// a single object.
pub fn signals_from_json(input: &str) -> Result<Vec<Signal>, SignalError> {
    match from_json(input)? {
        Decoded::Many(signals) => Ok(signals),
        Decoded::One(_) => Err(SignalError::Decode(
            "expected an array of signals, got a single object".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DispatchTarget;
    use serde_json::json;

    fn sample() -> Signal {
        Signal::builder("user.created", "/svc/users")
            .id("evt-1")
            .time("2026-01-01T00:00:00Z")
            .data(json!({"email": "a@example.com"}))
            .build()
            .expect("sample signal builds")
    }

    #[test]
    fn encode_omits_absent_optionals() {
        let json = to_json(&sample()).expect("encodes");
        assert!(!json.contains("subject"));
        assert!(!json.contains("dataschema"));
    }

    #[test]
    fn encode_never_emits_dispatch() {
        let signal = Signal::builder("a.b", "/s")
            .dispatch(DispatchTarget::new("console"))
            .build()
            .expect("builds");
        let json = to_json(&signal).expect("encodes");
        assert!(!json.contains("dispatch"));
    }

    #[test]
    fn decode_single_object() {
        let decoded = from_json(r#"{"type": "a.b", "source": "/s"}"#).expect("decodes");
        match decoded {
            Decoded::One(signal) => assert_eq!(signal.signal_type, "a.b"),
            Decoded::Many(_) => panic!("expected single"),
        }
    }

    #[test]
    fn decode_array() {
        let decoded = from_json(
            r#"[{"type": "a.b", "source": "/s"}, {"type": "c.d", "source": "/t"}]"#,
        )
        .expect("decodes");
        match decoded {
            Decoded::Many(signals) => assert_eq!(signals.len(), 2),
            Decoded::One(_) => panic!("expected array"),
        }
    }

    #[test]
    fn decode_rejects_scalar_top_level() {
        let err = from_json("42").unwrap_err();
        assert!(err.to_string().contains("object or array"));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(from_json("{"), Err(SignalError::Decode(_))));
    }

    #[test]
    fn element_failure_aborts_whole_decode() {
        let err = from_json(r#"[{"type": "a.b", "source": "/s"}, {"type": ""}]"#).unwrap_err();
        assert!(matches!(err, SignalError::Parse(_)));
    }

    #[test]
    fn roundtrip_preserves_fields() {
        let original = sample();
        let json = to_json(&original).expect("encodes");
        let restored = signal_from_json(&json).expect("decodes");
        assert_eq!(restored, original);
    }

    #[test]
    fn roundtrip_drops_dispatch() {
        let original = Signal::builder("a.b", "/s")
            .id("x")
            .time("2026-01-01T00:00:00Z")
            .dispatch(DispatchTarget::new("noop"))
            .build()
            .expect("builds");
        let restored =
            signal_from_json(&to_json(&original).expect("encodes")).expect("decodes");
        assert_eq!(restored.dispatch, None);
        assert_eq!(restored.id, original.id);
    }

    #[test]
    fn shape_enforcing_helpers() {
        assert!(signal_from_json("[]").is_err());
        assert!(signals_from_json(r#"{"type": "a.b", "source": "/s"}"#).is_err());
        assert_eq!(signals_from_json("[]").expect("empty array decodes").len(), 0);
    }
}
