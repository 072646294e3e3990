//! Dispatch layer for the Signet messaging substrate.
//!
//! Delivers signals to their targets through a pluggable adapter
//! registry and binds router output to delivery via the pipeline.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  signet-signal   : Signal, DispatchSpec, codec              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  signet-router   : pattern trie, match/ordering             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  signet-dispatch : adapters, dispatcher, pipeline ◄── HERE  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Delivery Flow
//!
//! ```text
//! ┌──────────┐  route   ┌──────────┐  targets  ┌──────────────┐
//! │  Signal  │ ───────► │  Router  │ ────────► │  Dispatcher  │
//! └──────────┘          └──────────┘           └──────────────┘
//!                                                     │ per tag
//!                   ┌───────────┬───────────┬─────────┼──────────┐
//!                   ▼           ▼           ▼         ▼          ▼
//!               ┌────────┐ ┌────────┐  ┌────────┐ ┌────────┐ ┌──────┐
//!               │ direct │ │  bus   │  │ pubsub │ │ logger │ │ ...  │
//!               │ /named │ │        │  │        │ │        │ │      │
//!               └────────┘ └────────┘  └────────┘ └────────┘ └──────┘
//! ```
//!
//! Every adapter implements [`Adapter`]: `validate` normalizes the
//! option bag up front, `deliver` moves one signal. Multi-target
//! dispatch is best-effort; the caller gets every failure enumerated
//! in [`DispatchError::Partial`].
//!
//! # Collaborator Seams
//!
//! Real transports live behind narrow traits: [`Bus`] for
//! stream-oriented sinks, [`Broker`] for topic fan-out, and
//! [`Endpoint`] handles for in-process consumers. [`MemoryBus`] and
//! [`MemoryBroker`] are in-memory reference implementations.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use signet_dispatch::{
//!     AdapterRegistry, BrokerRegistry, Bus, BusRegistry, Dispatcher, EndpointRegistry,
//!     MemoryBus,
//! };
//! use signet_signal::{DispatchTarget, Signal};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let buses = Arc::new(BusRegistry::new());
//! let audit = Arc::new(MemoryBus::new());
//! buses.register("audit", Arc::clone(&audit) as Arc<dyn Bus>);
//!
//! let registry = AdapterRegistry::with_builtins(
//!     Arc::new(EndpointRegistry::new()),
//!     buses,
//!     Arc::new(BrokerRegistry::new()),
//! );
//! let dispatcher = Dispatcher::new(Arc::new(registry));
//!
//! let signal = Signal::builder("user.created", "/svc/users")
//!     .dispatch(DispatchTarget::new("bus").with_option("target", "audit"))
//!     .build()
//!     .unwrap();
//!
//! dispatcher.dispatch(&signal).await.unwrap();
//! assert_eq!(audit.depth("default"), 1);
//! # });
//! ```

mod adapter;
pub mod adapters;
mod broker;
mod bus;
mod dispatcher;
mod endpoint;
mod error;
mod pipeline;
mod registry;
pub mod testing;

pub use adapter::Adapter;
pub use broker::{Broker, BrokerRegistry, MemoryBroker};
pub use bus::{Bus, BusRegistry, MemoryBus, DEFAULT_STREAM};
pub use dispatcher::Dispatcher;
pub use endpoint::{DeliveryMode, Endpoint, EndpointRegistry};
pub use error::{DispatchError, TargetFailure};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use registry::AdapterRegistry;

// Re-export the option bag alias for adapter implementors.
pub use signet_signal::Options;
