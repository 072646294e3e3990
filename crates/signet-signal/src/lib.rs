//! Signal envelope layer for the Signet messaging substrate.
//!
//! This crate provides the event envelope shared by every Signet layer:
//! construction with defaulting and validation, dispatch directives, and
//! the JSON wire codec.
//!
//! # Crate Architecture
//!
//! This crate is the base of the Signet stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  signet-signal   : Signal, DispatchSpec, codec  ◄── HERE    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  signet-router   : pattern trie, match/ordering             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  signet-dispatch : adapters, registry, dispatcher, pipeline │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Envelope
//!
//! A [`Signal`] is an immutable CloudEvents v1.0.2 envelope with an
//! optional [`DispatchSpec`] extension. The extension configures how the
//! dispatch layer delivers the signal; it never appears on the wire.
//!
//! | Surface | Use |
//! |---------|-----|
//! | [`Signal::builder`] | typed construction from Rust |
//! | [`Signal::from_map`] | attribute-bag construction, shared with decode |
//! | [`codec`] | JSON encode/decode for singles and sequences |
//!
//! # Example
//!
//! ```
//! use signet_signal::{codec, DispatchTarget, Signal};
//! use serde_json::json;
//!
//! let signal = Signal::builder("user.created", "/service/users")
//!     .data(json!({"email": "a@example.com"}))
//!     .dispatch(DispatchTarget::new("logger").with_option("level", "info"))
//!     .build()?;
//!
//! // The wire form carries the CloudEvents fields, never `dispatch`.
//! let wire = codec::to_json(&signal)?;
//! let restored = codec::signal_from_json(&wire)?;
//! assert_eq!(restored.signal_type, "user.created");
//! assert!(restored.dispatch.is_none());
//! # Ok::<(), signet_signal::SignalError>(())
//! ```
//!
//! # Error Handling
//!
//! All errors implement [`ErrorCode`] for unified handling:
//!
//! ```
//! use signet_signal::{ErrorCode, Signal};
//!
//! let err = Signal::builder("", "/s").build().unwrap_err();
//! assert_eq!(err.code(), "SIGNAL_PARSE_ERROR");
//! assert!(!err.is_recoverable());
//! ```

pub mod codec;
mod defaults;
mod dispatch;
mod error;
pub mod id;
mod signal;

pub use codec::Decoded;
pub use defaults::SignalDefaults;
pub use dispatch::{DispatchSpec, DispatchTarget, Options};
pub use error::{assert_error_code, assert_error_codes, ErrorCode, SignalError};
pub use signal::{Signal, SignalBuilder, SPEC_VERSION};
