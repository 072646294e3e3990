//! Route→dispatch pipeline.
//!
//! Binds a [`Router`] to a [`Dispatcher`]: a signal is matched, the
//! resulting instruction handlers are collected for the caller, and
//! every dispatch-target handler is delivered best-effort.

use signet_router::{Handler, Instruction, Router, RoutingError};
use signet_signal::Signal;

use crate::{Dispatcher, TargetFailure};

/// Aggregated result of one pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Instruction handlers, in match order. Execution is the
    /// caller's concern.
    pub instructions: Vec<Instruction>,
    /// Number of dispatch targets delivered successfully.
    pub delivered: usize,
    /// Dispatch targets that failed, in match order.
    pub failures: Vec<TargetFailure>,
}

impl PipelineOutcome {
    /// Returns `true` when every dispatch target was delivered.
    #[must_use]
    pub fn fully_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Routes signals and feeds their dispatch targets to the adapters.
///
/// Both halves are values: swap in an updated router with
/// [`Pipeline::with_router`] and republish the pipeline handle.
pub struct Pipeline {
    router: Router,
    dispatcher: Dispatcher,
}

impl Pipeline {
    /// Creates a pipeline.
    #[must_use]
    pub fn new(router: Router, dispatcher: Dispatcher) -> Self {
        Self { router, dispatcher }
    }

    /// The current router value.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Returns a pipeline over an updated router, keeping the
    /// dispatcher.
    #[must_use]
    pub fn with_router(self, router: Router) -> Self {
        Self { router, ..self }
    }

    /// Routes one signal and delivers its dispatch targets.
    ///
    /// Routing failure aborts the run. Delivery failures do not: they
    /// are collected into the outcome while remaining targets still
    /// run.
    ///
    /// # Errors
    ///
    /// Returns the [`RoutingError`] when matching fails (including the
    /// empty match set).
    pub async fn run(&self, signal: &Signal) -> Result<PipelineOutcome, RoutingError> {
        let handlers = self.router.route(signal)?;

        let mut outcome = PipelineOutcome {
            instructions: Vec::new(),
            delivered: 0,
            failures: Vec::new(),
        };

        for handler in handlers {
            match handler {
                Handler::Instruction(instruction) => outcome.instructions.push(instruction),
                Handler::Dispatch(target) => {
                    match self.dispatcher.deliver_target(signal, &target).await {
                        Ok(()) => outcome.delivered += 1,
                        Err(error) => outcome.failures.push(TargetFailure {
                            adapter: target.adapter,
                            error,
                        }),
                    }
                }
                // Router output is already flattened.
                Handler::DispatchGroup(targets) => {
                    for target in targets {
                        match self.dispatcher.deliver_target(signal, &target).await {
                            Ok(()) => outcome.delivered += 1,
                            Err(error) => outcome.failures.push(TargetFailure {
                                adapter: target.adapter,
                                error,
                            }),
                        }
                    }
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingAdapter;
    use crate::{AdapterRegistry, BrokerRegistry, BusRegistry, EndpointRegistry};
    use serde_json::json;
    use signet_router::Route;
    use signet_signal::DispatchTarget;
    use std::sync::Arc;

    fn dispatcher() -> Dispatcher {
        let registry = AdapterRegistry::with_builtins(
            Arc::new(EndpointRegistry::new()),
            Arc::new(BusRegistry::new()),
            Arc::new(BrokerRegistry::new()),
        );
        Dispatcher::new(Arc::new(registry))
    }

    fn signal(signal_type: &str) -> Signal {
        Signal::builder(signal_type, "/test").build().unwrap()
    }

    #[tokio::test]
    async fn collects_instructions_and_delivers_targets() {
        let dispatcher = dispatcher();
        let recorder = RecordingAdapter::ok();
        dispatcher
            .adapters()
            .register("recorder", Arc::new(recorder.clone()))
            .unwrap();

        let router = Router::new([
            Route::new("user.*", Handler::instruction("enrich", json!({}))).unwrap(),
            Route::new("user.**", DispatchTarget::new("recorder")).unwrap(),
        ])
        .unwrap();

        let pipeline = Pipeline::new(router, dispatcher);
        let outcome = pipeline.run(&signal("user.created")).await.unwrap();

        assert_eq!(outcome.instructions.len(), 1);
        assert_eq!(outcome.instructions[0].action, "enrich");
        assert_eq!(outcome.delivered, 1);
        assert!(outcome.fully_delivered());
        assert_eq!(recorder.calls(), 1);
    }

    #[tokio::test]
    async fn routing_failure_aborts() {
        let router = Router::new([
            Route::new("order.**", Handler::instruction("x", json!({}))).unwrap()
        ])
        .unwrap();
        let pipeline = Pipeline::new(router, dispatcher());

        let err = pipeline.run(&signal("user.created")).await.unwrap_err();
        assert_eq!(err, RoutingError::NoMatch);
    }

    #[tokio::test]
    async fn delivery_failures_are_collected_not_fatal() {
        let dispatcher = dispatcher();
        let recorder = RecordingAdapter::ok();
        dispatcher
            .adapters()
            .register("recorder", Arc::new(recorder.clone()))
            .unwrap();

        let router = Router::new([Route::new(
            "a.b",
            Handler::group(vec![
                DispatchTarget::new("ghost"),
                DispatchTarget::new("recorder"),
            ]),
        )
        .unwrap()])
        .unwrap();

        let pipeline = Pipeline::new(router, dispatcher);
        let outcome = pipeline.run(&signal("a.b")).await.unwrap();

        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].adapter, "ghost");
        assert!(!outcome.fully_delivered());
        assert_eq!(recorder.calls(), 1);
    }

    #[tokio::test]
    async fn with_router_swaps_routing() {
        let dispatcher = dispatcher();
        let pipeline = Pipeline::new(
            Router::new([Route::new("a.b", DispatchTarget::new("noop")).unwrap()]).unwrap(),
            dispatcher,
        );

        assert!(pipeline.run(&signal("c.d")).await.is_err());

        let pipeline = pipeline.with_router(
            Router::new([Route::new("c.d", DispatchTarget::new("noop")).unwrap()]).unwrap(),
        );
        assert!(pipeline.run(&signal("c.d")).await.is_ok());
    }
}
