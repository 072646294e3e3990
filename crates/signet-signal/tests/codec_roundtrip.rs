//! Integration tests for the envelope + codec round-trip.
//!
//! Covers the wire contract: encode emits only CloudEvents fields,
//! decode re-validates, and round-trips are lossless for the
//! serialized field subset.

use serde_json::{json, Value};
use signet_signal::{codec, DispatchTarget, Signal, SignalDefaults, SPEC_VERSION};

fn full_signal() -> Signal {
    Signal::builder("user.profile.updated", "/service/users")
        .id("evt-roundtrip-1")
        .subject("user-42")
        .time("2026-02-01T08:30:00Z")
        .dataschema("https://example.com/schemas/user")
        .data(json!({"email": "a@example.com", "plan": "pro"}))
        .build()
        .unwrap()
}

/// Encode → decode restores every serialized field.
#[test]
fn roundtrip_full_envelope() {
    let original = full_signal();
    let wire = codec::to_json(&original).unwrap();
    let restored = codec::signal_from_json(&wire).unwrap();
    assert_eq!(restored, original);
}

/// Decode → encode is JSON-equivalent for the serialized subset.
#[test]
fn decode_encode_is_json_stable() {
    let wire = codec::to_json(&full_signal()).unwrap();
    let restored = codec::signal_from_json(&wire).unwrap();
    let rewire = codec::to_json(&restored).unwrap();

    let a: Value = serde_json::from_str(&wire).unwrap();
    let b: Value = serde_json::from_str(&rewire).unwrap();
    assert_eq!(a, b);
}

/// Sequences encode as arrays and survive the round-trip element-wise.
#[test]
fn roundtrip_sequence() {
    let signals = vec![
        full_signal(),
        Signal::builder("order.completed", "/service/orders")
            .id("evt-roundtrip-2")
            .time("2026-02-01T09:00:00Z")
            .build()
            .unwrap(),
    ];

    let wire = codec::to_json_many(&signals).unwrap();
    assert!(wire.starts_with('['));

    let restored = codec::signals_from_json(&wire).unwrap();
    assert_eq!(restored, signals);
}

/// The dispatch extension never reaches the wire and decodes as absent.
#[test]
fn dispatch_is_transport_side_only() {
    let signal = Signal::builder("audit.recorded", "/service/audit")
        .dispatch(vec![
            DispatchTarget::new("bus").with_option("target", "audit"),
            DispatchTarget::new("logger").with_option("level", "info"),
        ])
        .build()
        .unwrap();

    let wire = codec::to_json(&signal).unwrap();
    assert!(!wire.contains("dispatch"));

    let restored = codec::signal_from_json(&wire).unwrap();
    assert!(restored.dispatch.is_none());
}

/// Hand-written wire JSON passes through full envelope validation.
#[test]
fn decode_validates_like_construction() {
    // Missing source: rejected.
    let err = codec::signal_from_json(r#"{"type": "a.b"}"#).unwrap_err();
    assert!(err.to_string().contains("source"));

    // Wrong specversion: rejected.
    let err = codec::signal_from_json(
        r#"{"specversion": "1.0", "type": "a.b", "source": "/s"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("specversion"));

    // Minimal valid document: defaults injected.
    let signal = codec::signal_from_json(r#"{"type": "a.b", "source": "/s"}"#).unwrap();
    assert_eq!(signal.specversion, SPEC_VERSION);
    assert!(!signal.id.is_empty());
    assert!(signal.time.is_some());
}

/// One invalid element poisons the whole sequence decode.
#[test]
fn sequence_decode_is_all_or_nothing() {
    let err = codec::signals_from_json(
        r#"[
            {"type": "a.b", "source": "/s"},
            {"type": "c.d", "source": ""},
            {"type": "e.f", "source": "/s"}
        ]"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("source"));
}

/// Configured defaults apply to bag construction but not the codec.
#[test]
fn codec_does_not_inject_configured_source() {
    let defaults = SignalDefaults::new().with_source("/svc/fallback");
    let mut map = serde_json::Map::new();
    map.insert("type".into(), json!("a.b"));

    // Bag construction with defaults succeeds.
    assert!(Signal::from_map_with(map, &defaults).is_ok());

    // Wire decode has no defaults bag: source stays required.
    assert!(codec::signal_from_json(r#"{"type": "a.b"}"#).is_err());
}
