//! Routing errors.
//!
//! # Error Code Convention
//!
//! All routing errors use the `ROUTING_` prefix for their codes:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`RoutingError::InvalidPattern`] | `ROUTING_INVALID_PATTERN` | No |
//! | [`RoutingError::InvalidPriority`] | `ROUTING_INVALID_PRIORITY` | No |
//! | [`RoutingError::InvalidType`] | `ROUTING_INVALID_TYPE` | No |
//! | [`RoutingError::GuardFailure`] | `ROUTING_GUARD_FAILURE` | No |
//! | [`RoutingError::NoMatch`] | `ROUTING_NO_MATCH` | No |
//!
//! Route matching never panics across the API: guard panics are caught
//! and normalized into [`RoutingError::GuardFailure`].

use signet_signal::ErrorCode;
use thiserror::Error;

/// Router registration and matching error.
///
/// # Variants
///
/// | Variant | When |
/// |---------|------|
/// | [`InvalidPattern`](Self::InvalidPattern) | Pattern failed compilation |
/// | [`InvalidPriority`](Self::InvalidPriority) | Priority outside `[-100, 100]` |
/// | [`InvalidType`](Self::InvalidType) | Signal type failed validation at match time |
/// | [`GuardFailure`](Self::GuardFailure) | A guard panicked during evaluation |
/// | [`NoMatch`](Self::NoMatch) | No handler matched the signal |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The route pattern failed compilation.
    #[error("invalid route pattern: {0}")]
    InvalidPattern(String),

    /// Priority outside the allowed range.
    #[error("priority {0} out of range [-100, 100]")]
    InvalidPriority(i32),

    /// The signal type is not routable (empty segment, invalid
    /// character, wildcard, or excessive length).
    #[error("invalid signal type: {0}")]
    InvalidType(String),

    /// A guard panicked or otherwise failed to produce a boolean.
    ///
    /// Guards must be total and pure; a failing guard poisons the whole
    /// route call rather than silently dropping a candidate.
    #[error("guard failed: {0}")]
    GuardFailure(String),

    /// The match set was empty after structural and guard filtering.
    #[error("No matching handlers found for signal")]
    NoMatch,
}

impl ErrorCode for RoutingError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidPattern(_) => "ROUTING_INVALID_PATTERN",
            Self::InvalidPriority(_) => "ROUTING_INVALID_PRIORITY",
            Self::InvalidType(_) => "ROUTING_INVALID_TYPE",
            Self::GuardFailure(_) => "ROUTING_GUARD_FAILURE",
            Self::NoMatch => "ROUTING_NO_MATCH",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Matching is pure: the same inputs fail the same way on retry.
        false
    }
}
