//! Trie-based signal router for the Signet messaging substrate.
//!
//! Maps hierarchical dotted signal types (e.g. `user.profile.updated`)
//! to ordered handler lists with wildcard patterns, guard predicates,
//! priorities, and deterministic tie-breaking.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  signet-signal   : Signal, DispatchSpec, codec              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  signet-router   : pattern trie, match/ordering  ◄── HERE   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  signet-dispatch : adapters, registry, dispatcher, pipeline │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Patterns
//!
//! | Token | Matches |
//! |-------|---------|
//! | `user.created` | that exact type |
//! | `*` | exactly one segment |
//! | `**` | zero or more segments (at most one per pattern) |
//!
//! # Match Ordering
//!
//! Matched routes sort by priority (higher first), then specificity
//! (literal > `*` > `**`, segment by segment), then insertion order.
//! The result is deterministic and stable under repeated calls.
//!
//! # Value Semantics
//!
//! A [`Router`] is an immutable value over a persistent trie:
//! [`Router::route`] takes `&self` and never blocks, while
//! [`Router::add`] / [`Router::remove`] return new routers sharing
//! untouched structure. Publish updates by swapping the shared handle.
//!
//! # Example
//!
//! ```
//! use signet_router::{Handler, Route, Router};
//! use signet_signal::Signal;
//! use serde_json::json;
//!
//! let router = Router::new(vec![
//!     Route::new("user.*.updated", Handler::instruction("refresh", json!({})))?,
//!     Route::new("user.**", Handler::instruction("audit", json!({})))?
//!         .with_priority(-10),
//! ])?;
//!
//! let signal = Signal::builder("user.42.updated", "/svc/users")
//!     .build()
//!     .unwrap();
//!
//! let handlers = router.route(&signal)?;
//! assert_eq!(handlers.len(), 2); // refresh first, audit second
//! # Ok::<(), signet_router::RoutingError>(())
//! ```

mod error;
mod handler;
mod pattern;
mod route;
mod router;
mod trie;

pub use error::RoutingError;
pub use handler::{Handler, Instruction};
pub use pattern::{Segment, TypePattern};
pub use route::{Guard, Route, MAX_PRIORITY, MIN_PRIORITY};
pub use router::Router;
