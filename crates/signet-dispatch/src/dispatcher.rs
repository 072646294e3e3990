//! Dispatcher: resolve targets, deliver, aggregate.
//!
//! Delivery across a multi-target spec is best-effort: one failing
//! target never aborts the rest. The caller gets `Ok(())` iff every
//! target succeeded, otherwise [`DispatchError::Partial`] enumerating
//! each failure in declared order.

use std::sync::Arc;

use tracing::{debug, warn};

use signet_signal::{DispatchSpec, DispatchTarget, Signal};

use crate::{AdapterRegistry, DispatchError, TargetFailure};

/// Delivers signals through registered adapters.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use signet_dispatch::{
///     AdapterRegistry, BrokerRegistry, BusRegistry, Dispatcher, EndpointRegistry,
/// };
/// use signet_signal::{DispatchTarget, Signal};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let registry = AdapterRegistry::with_builtins(
///     Arc::new(EndpointRegistry::new()),
///     Arc::new(BusRegistry::new()),
///     Arc::new(BrokerRegistry::new()),
/// );
/// let dispatcher = Dispatcher::new(Arc::new(registry));
///
/// let signal = Signal::builder("user.created", "/svc")
///     .dispatch(DispatchTarget::new("noop"))
///     .build()
///     .unwrap();
///
/// dispatcher.dispatch(&signal).await.unwrap();
/// # });
/// ```
pub struct Dispatcher {
    adapters: Arc<AdapterRegistry>,
}

impl Dispatcher {
    /// Creates a dispatcher over an adapter registry.
    #[must_use]
    pub fn new(adapters: Arc<AdapterRegistry>) -> Self {
        Self { adapters }
    }

    /// The underlying adapter registry.
    #[must_use]
    pub fn adapters(&self) -> &Arc<AdapterRegistry> {
        &self.adapters
    }

    /// Validates every target of a spec and returns it with normalized
    /// option bags.
    ///
    /// Use this at route registration and at signal-build time, before
    /// any delivery happens. Validation is all-or-nothing: the first
    /// failing target aborts.
    ///
    /// # Errors
    ///
    /// [`DispatchError::AdapterNotFound`] for an unknown tag,
    /// [`DispatchError::InvalidOptions`] for a rejected option bag.
    pub fn validate_spec(&self, spec: &DispatchSpec) -> Result<DispatchSpec, DispatchError> {
        let mut normalized = Vec::with_capacity(spec.len());
        for target in spec.targets() {
            let adapter = self
                .adapters
                .resolve(&target.adapter)
                .ok_or_else(|| DispatchError::AdapterNotFound(target.adapter.clone()))?;
            let options = adapter.validate(&target.options)?;
            normalized.push(DispatchTarget {
                adapter: target.adapter.clone(),
                options,
            });
        }

        Ok(match spec {
            DispatchSpec::Single(_) => {
                // validate_spec never changes arity, only option bags.
                DispatchSpec::Single(normalized.remove(0))
            }
            DispatchSpec::Many(_) => DispatchSpec::Many(normalized),
        })
    }

    /// Dispatches a signal according to its own `dispatch` field.
    ///
    /// A signal without dispatch directives is a no-op.
    ///
    /// # Errors
    ///
    /// As [`Dispatcher::dispatch_to`].
    pub async fn dispatch(&self, signal: &Signal) -> Result<(), DispatchError> {
        match &signal.dispatch {
            None => {
                debug!(id = %signal.id, "signal carries no dispatch config");
                Ok(())
            }
            Some(spec) => self.dispatch_to(signal, spec).await,
        }
    }

    /// Dispatches a signal to every target of an explicit spec.
    ///
    /// Targets are processed in declared order; failures are recorded
    /// and the remaining targets still run.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Partial`] when at least one target
    /// failed; the variant enumerates every failure.
    pub async fn dispatch_to(
        &self,
        signal: &Signal,
        spec: &DispatchSpec,
    ) -> Result<(), DispatchError> {
        let mut failures = Vec::new();

        for target in spec.targets() {
            if let Err(error) = self.deliver_target(signal, target).await {
                warn!(
                    adapter = %target.adapter,
                    id = %signal.id,
                    error = %error,
                    "dispatch target failed"
                );
                failures.push(TargetFailure {
                    adapter: target.adapter.clone(),
                    error,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::Partial { failures })
        }
    }

    /// Resolves, validates, and delivers one target.
    ///
    /// # Errors
    ///
    /// The adapter-level error for this target, unaggregated.
    pub async fn deliver_target(
        &self,
        signal: &Signal,
        target: &DispatchTarget,
    ) -> Result<(), DispatchError> {
        let adapter = self
            .adapters
            .resolve(&target.adapter)
            .ok_or_else(|| DispatchError::AdapterNotFound(target.adapter.clone()))?;
        let options = adapter.validate(&target.options)?;

        debug!(adapter = %target.adapter, id = %signal.id, "delivering signal");
        adapter.deliver(signal, &options).await
    }
}
