//! Dispatch layer errors.
//!
//! # Error Code Convention
//!
//! All dispatch errors use the `DISPATCH_` prefix for their codes:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`DispatchError::AdapterNotFound`] | `DISPATCH_ADAPTER_NOT_FOUND` | No |
//! | [`DispatchError::AdapterExists`] | `DISPATCH_ADAPTER_EXISTS` | No |
//! | [`DispatchError::InvalidOptions`] | `DISPATCH_INVALID_OPTIONS` | No |
//! | [`DispatchError::ProcessNotFound`] | `DISPATCH_PROCESS_NOT_FOUND` | No |
//! | [`DispatchError::BusNotFound`] | `DISPATCH_BUS_NOT_FOUND` | No |
//! | [`DispatchError::DeliveryFailed`] | `DISPATCH_DELIVERY_FAILED` | Yes |
//! | [`DispatchError::Partial`] | `DISPATCH_PARTIAL_FAILURE` | Yes |
//!
//! Delivery failures are transient by nature (a closed endpoint may be
//! re-registered, a busy sink may accept the retry); configuration
//! failures are not.

use std::fmt;

use signet_signal::ErrorCode;
use thiserror::Error;

/// One failed target inside a multi-target dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    /// Adapter tag of the failing target.
    pub adapter: String,
    /// What went wrong for this target.
    pub error: DispatchError,
}

impl fmt::Display for TargetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.adapter, self.error)
    }
}

/// Dispatch configuration and delivery error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No adapter is registered under the requested tag.
    #[error("adapter not found: {0}")]
    AdapterNotFound(String),

    /// The tag is already taken; the registry is append-only.
    #[error("adapter already registered: {0}")]
    AdapterExists(String),

    /// The option bag was rejected by the adapter's `validate`.
    #[error("invalid options for adapter \"{adapter}\": {reason}")]
    InvalidOptions {
        /// Adapter tag that rejected the options.
        adapter: String,
        /// Human-readable rejection reason.
        reason: String,
    },

    /// A direct or named endpoint target could not be resolved.
    #[error("process not found: {0}")]
    ProcessNotFound(String),

    /// A bus target could not be resolved.
    #[error("bus not found: {0}")]
    BusNotFound(String),

    /// Adapter-specific delivery failure; carries an opaque reason.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    /// Best-effort fan-out finished with at least one failed target.
    ///
    /// Successful targets were still delivered; `failures` enumerates
    /// the rest.
    #[error("dispatch failed for {} target(s)", failures.len())]
    Partial {
        /// The failed targets, in declared order.
        failures: Vec<TargetFailure>,
    },
}

impl ErrorCode for DispatchError {
    fn code(&self) -> &'static str {
        match self {
            Self::AdapterNotFound(_) => "DISPATCH_ADAPTER_NOT_FOUND",
            Self::AdapterExists(_) => "DISPATCH_ADAPTER_EXISTS",
            Self::InvalidOptions { .. } => "DISPATCH_INVALID_OPTIONS",
            Self::ProcessNotFound(_) => "DISPATCH_PROCESS_NOT_FOUND",
            Self::BusNotFound(_) => "DISPATCH_BUS_NOT_FOUND",
            Self::DeliveryFailed(_) => "DISPATCH_DELIVERY_FAILED",
            Self::Partial { .. } => "DISPATCH_PARTIAL_FAILURE",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::DeliveryFailed(_) | Self::Partial { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_signal::assert_error_codes;

    fn all_variants() -> Vec<DispatchError> {
        vec![
            DispatchError::AdapterNotFound("x".into()),
            DispatchError::AdapterExists("x".into()),
            DispatchError::InvalidOptions {
                adapter: "x".into(),
                reason: "y".into(),
            },
            DispatchError::ProcessNotFound("x".into()),
            DispatchError::BusNotFound("x".into()),
            DispatchError::DeliveryFailed("x".into()),
            DispatchError::Partial { failures: vec![] },
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "DISPATCH_");
    }

    #[test]
    fn delivery_failures_are_recoverable() {
        assert!(DispatchError::DeliveryFailed("sink busy".into()).is_recoverable());
        assert!(DispatchError::Partial { failures: vec![] }.is_recoverable());
        assert!(!DispatchError::AdapterNotFound("x".into()).is_recoverable());
    }

    #[test]
    fn partial_counts_failures() {
        let err = DispatchError::Partial {
            failures: vec![
                TargetFailure {
                    adapter: "bus".into(),
                    error: DispatchError::BusNotFound("audit".into()),
                },
                TargetFailure {
                    adapter: "named".into(),
                    error: DispatchError::ProcessNotFound("worker".into()),
                },
            ],
        };
        assert_eq!(err.to_string(), "dispatch failed for 2 target(s)");
    }

    #[test]
    fn target_failure_display() {
        let failure = TargetFailure {
            adapter: "bus".into(),
            error: DispatchError::BusNotFound("audit".into()),
        };
        assert_eq!(failure.to_string(), "bus: bus not found: audit");
    }
}
