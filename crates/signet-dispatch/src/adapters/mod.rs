//! Built-in adapters.
//!
//! | Tag | Options | Semantics |
//! |-----|---------|-----------|
//! | `direct` | `target` (endpoint ID), `delivery_mode` | deliver to one endpoint |
//! | `named` | `target` (registered name) | resolve-then-deliver |
//! | `bus` | `target` (bus name), `stream` | enqueue onto a stream |
//! | `pubsub` | `target` (broker name), `topic` | fan-out publish |
//! | `logger` | `level` | emit through the log sink |
//! | `console` | none | human-readable print |
//! | `noop` | arbitrary | discard |

mod bus;
mod console;
mod direct;
mod logger;
mod named;
mod noop;
mod pubsub;

pub use bus::BusAdapter;
pub use console::ConsoleAdapter;
pub use direct::DirectAdapter;
pub use logger::LoggerAdapter;
pub use named::NamedAdapter;
pub use noop::NoopAdapter;
pub use pubsub::PubSubAdapter;
