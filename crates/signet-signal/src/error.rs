//! Unified error interface and envelope errors.
//!
//! This module defines the [`ErrorCode`] trait shared by every Signet
//! crate, plus [`SignalError`] for envelope construction and codec
//! failures.
//!
//! # Error Code Convention
//!
//! All envelope errors use the `SIGNAL_` prefix for their codes:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`SignalError::Parse`] | `SIGNAL_PARSE_ERROR` | No |
//! | [`SignalError::Decode`] | `SIGNAL_DECODE_ERROR` | No |
//! | [`SignalError::Encode`] | `SIGNAL_ENCODE_ERROR` | No |
//!
//! # Recoverability
//!
//! An error is **recoverable** if retrying the operation may succeed.
//! Validation failures never are: the input won't change on retry.
//!
//! # Example
//!
//! ```
//! use signet_signal::{ErrorCode, SignalError};
//!
//! let err = SignalError::Parse("type is required".into());
//! assert_eq!(err.code(), "SIGNAL_PARSE_ERROR");
//! assert!(!err.is_recoverable());
//! assert!(err.to_string().starts_with("parse error:"));
//! ```

use thiserror::Error;

/// Unified error code interface for Signet errors.
///
/// Implement this trait for all error types to enable:
///
/// - Consistent error code format across crates
/// - Unified error handling at the dispatch boundary
/// - Standardized logging and monitoring
///
/// # Code Format
///
/// Error codes should be:
///
/// - **UPPER_SNAKE_CASE**: e.g., `"SIGNAL_PARSE_ERROR"`
/// - **Namespace-prefixed**: `SIGNAL_`, `ROUTING_`, `DISPATCH_`
/// - **Stable**: Codes should not change once defined (API contract)
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    ///
    /// UPPER_SNAKE_CASE, prefixed with the owning domain, stable
    /// across versions (changing a code is a breaking change).
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    ///
    /// # Returns
    ///
    /// - `true`: Retry may succeed, or the caller can take corrective action
    /// - `false`: Retry will not help, requires code/config change
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows Signet conventions.
///
/// # Checks
///
/// 1. Code is UPPER_SNAKE_CASE
/// 2. Code starts with expected prefix
/// 3. Code is not empty
///
/// # Panics
///
/// Panics with a descriptive message if validation fails.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Envelope construction and codec error.
///
/// # Variants
///
/// | Variant | When |
/// |---------|------|
/// | [`Parse`](Self::Parse) | A field failed validation during construction or decode |
/// | [`Decode`](Self::Decode) | The input was not decodable JSON of the expected shape |
/// | [`Encode`](Self::Encode) | Serialization itself failed |
///
/// # Example
///
/// ```
/// use signet_signal::SignalError;
///
/// let err = SignalError::Parse("source is required".into());
/// assert_eq!(
///     err.to_string(),
///     "parse error: source is required"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// A field failed envelope validation.
    ///
    /// The message names the offending field. Construction and decode
    /// share the same validation path, so both surface this variant.
    #[error("parse error: {0}")]
    Parse(String),

    /// The input was not valid JSON, or its top-level shape was neither
    /// an object nor an array of objects.
    #[error("decode error: {0}")]
    Decode(String),

    /// JSON serialization failed.
    #[error("encode error: {0}")]
    Encode(String),
}

impl ErrorCode for SignalError {
    fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "SIGNAL_PARSE_ERROR",
            Self::Decode(_) => "SIGNAL_DECODE_ERROR",
            Self::Encode(_) => "SIGNAL_ENCODE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Parse(_) => false,
            Self::Decode(_) => false,
            Self::Encode(_) => false,
        }
    }
}
