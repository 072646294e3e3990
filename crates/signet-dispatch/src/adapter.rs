//! Adapter contract and shared option helpers.
//!
//! Each adapter exposes two operations:
//!
//! 1. `validate(options)` - invoked at route registration and whenever
//!    a dispatch spec is attached at signal-build time; rejects unknown
//!    or ill-typed options and returns the normalized bag (defaults
//!    filled in).
//! 2. `deliver(signal, options)` - invoked per signal, per target, with
//!    the normalized bag.
//!
//! Adapters declare their own blocking profile; the dispatcher makes no
//! ordering guarantee across distinct targets.

use async_trait::async_trait;

use signet_signal::{Options, Signal};

use crate::DispatchError;

/// Delivery mechanism for one adapter tag.
///
/// # Implementing
///
/// ```
/// use async_trait::async_trait;
/// use signet_dispatch::{Adapter, DispatchError};
/// use signet_signal::{Options, Signal};
///
/// struct DropAdapter;
///
/// #[async_trait]
/// impl Adapter for DropAdapter {
///     fn validate(&self, options: &Options) -> Result<Options, DispatchError> {
///         Ok(options.clone())
///     }
///
///     async fn deliver(&self, _: &Signal, _: &Options) -> Result<(), DispatchError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Validates and normalizes an option bag.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidOptions`] for unknown keys,
    /// missing required keys, or ill-typed values.
    fn validate(&self, options: &Options) -> Result<Options, DispatchError>;

    /// Delivers one signal to this adapter's target.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] describing the failure; the
    /// dispatcher records it and continues with remaining targets.
    async fn deliver(&self, signal: &Signal, options: &Options) -> Result<(), DispatchError>;
}

/// Rejects any key outside `allowed`.
pub(crate) fn reject_unknown(
    adapter: &str,
    options: &Options,
    allowed: &[&str],
) -> Result<(), DispatchError> {
    for key in options.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid(adapter, format!("unknown option \"{key}\"")));
        }
    }
    Ok(())
}

/// Fetches a required string option.
pub(crate) fn require_str(
    adapter: &str,
    options: &Options,
    key: &str,
) -> Result<String, DispatchError> {
    match options.get(key) {
        None => Err(invalid(adapter, format!("\"{key}\" is required"))),
        Some(value) => value
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| invalid(adapter, format!("\"{key}\" must be a non-empty string"))),
    }
}

/// Fetches an optional string option.
pub(crate) fn optional_str(
    adapter: &str,
    options: &Options,
    key: &str,
) -> Result<Option<String>, DispatchError> {
    match options.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| invalid(adapter, format!("\"{key}\" must be a non-empty string"))),
    }
}

pub(crate) fn invalid(adapter: &str, reason: impl Into<String>) -> DispatchError {
    DispatchError::InvalidOptions {
        adapter: adapter.to_string(),
        reason: reason.into(),
    }
}
