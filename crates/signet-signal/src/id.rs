//! Identifier and timestamp utilities.
//!
//! Signal IDs are UUID strings for network compatibility; timestamps
//! are RFC 3339 / ISO-8601 in UTC, matching the CloudEvents `time`
//! attribute format.
//!
//! # UUID Strategy
//!
//! - [`generate`]: UUID v4 (random) for per-event signal IDs
//! - [`derive`]: UUID v5 (deterministic from a name) for well-known,
//!   process-stable identities such as named endpoints
//!
//! Deriving from a name means the same identity resolves to the same
//! ID across processes and machines, with no coordination.

use chrono::{SecondsFormat, Utc};
use uuid::{uuid, Uuid};

/// Signet namespace UUID for deterministic UUID v5 generation.
///
/// Used as the namespace when deriving stable IDs from well-known
/// names via UUID v5 (SHA-1 based).
const SIGNET_NAMESPACE: Uuid = uuid!("7a0f1e52-9c4d-4b8e-a1d3-5e2f8c6b9a04");

/// Generates a fresh signal ID (UUID v4, hyphenated).
///
/// # Example
///
/// ```
/// let id = signet_signal::id::generate();
/// assert_eq!(id.len(), 36);
/// ```
#[must_use]
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// Derives a deterministic ID from a well-known name (UUID v5).
///
/// The same name always produces the same ID; different names produce
/// different IDs. Use this for identities that must stay stable across
/// processes (named endpoints, fixed sources), never for per-event
/// signal IDs.
///
/// # Example
///
/// ```
/// use signet_signal::id;
///
/// assert_eq!(id::derive("audit"), id::derive("audit"));
/// assert_ne!(id::derive("audit"), id::derive("billing"));
/// ```
#[must_use]
pub fn derive(name: &str) -> String {
    Uuid::new_v5(&SIGNET_NAMESPACE, name.as_bytes()).to_string()
}

/// Returns the current UTC time as an ISO-8601 string.
///
/// Microsecond precision with a `Z` suffix, e.g.
/// `2026-08-02T09:30:00.123456Z`.
///
/// # Example
///
/// ```
/// let ts = signet_signal::id::timestamp();
/// assert!(ts.ends_with('Z'));
/// ```
#[must_use]
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
