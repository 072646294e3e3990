//! Route definition: pattern, guard, handler, priority.

use std::fmt;
use std::sync::Arc;

use signet_signal::Signal;

use crate::{Handler, RoutingError, TypePattern};

/// Lowest accepted route priority.
pub const MIN_PRIORITY: i32 = -100;
/// Highest accepted route priority.
pub const MAX_PRIORITY: i32 = 100;

/// Pure boolean predicate over a signal.
///
/// Guards further qualify a structurally matched route. They MUST be
/// pure, total, and non-blocking; the router evaluates them through a
/// failure-safe wrapper that turns a panicking guard into
/// [`RoutingError::GuardFailure`] for the whole call.
///
/// Any `Fn(&Signal) -> bool + Send + Sync` closure is a guard:
///
/// ```
/// use signet_router::{Handler, Route};
/// use serde_json::json;
///
/// let route = Route::new("user.enrich", Handler::instruction("enrich", json!({})))
///     .unwrap()
///     .with_guard(|signal: &signet_signal::Signal| {
///         signal
///             .data
///             .as_ref()
///             .and_then(|d| d.get("email"))
///             .is_some()
///     });
/// assert!(route.has_guard());
/// ```
pub trait Guard: Send + Sync {
    /// Returns whether the signal passes this guard.
    fn check(&self, signal: &Signal) -> bool;
}

impl<F> Guard for F
where
    F: Fn(&Signal) -> bool + Send + Sync,
{
    fn check(&self, signal: &Signal) -> bool {
        self(signal)
    }
}

/// A registered routing rule.
///
/// Binds a compiled [`TypePattern`] (plus optional guard and priority)
/// to a [`Handler`]. The insertion index used for tie-breaking is
/// assigned by the [`Router`](crate::Router) at registration, not here.
#[derive(Clone)]
pub struct Route {
    pattern: TypePattern,
    guard: Option<Arc<dyn Guard>>,
    handler: Handler,
    priority: i32,
}

impl Route {
    /// Compiles `pattern` and binds it to `handler`.
    ///
    /// Priority defaults to 0.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidPattern`] when the pattern fails
    /// compilation. Priority bounds are enforced at registration.
    pub fn new(pattern: &str, handler: impl Into<Handler>) -> Result<Self, RoutingError> {
        Ok(Self {
            pattern: TypePattern::parse(pattern)?,
            guard: None,
            handler: handler.into(),
            priority: 0,
        })
    }

    /// Sets the priority. Range-checked at registration.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Attaches a guard predicate.
    #[must_use]
    pub fn with_guard(mut self, guard: impl Guard + 'static) -> Self {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// The compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &TypePattern {
        &self.pattern
    }

    /// The bound handler.
    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The priority, default 0.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns `true` when a guard is attached.
    #[must_use]
    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    pub(crate) fn guard(&self) -> Option<&Arc<dyn Guard>> {
        self.guard.as_ref()
    }

    /// Validates the priority range.
    pub(crate) fn check_priority(&self) -> Result<(), RoutingError> {
        if (MIN_PRIORITY..=MAX_PRIORITY).contains(&self.priority) {
            Ok(())
        } else {
            Err(RoutingError::InvalidPriority(self.priority))
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.to_string())
            .field("guard", &self.guard.as_ref().map(|_| "<guard>"))
            .field("handler", &self.handler)
            .field("priority", &self.priority)
            .finish()
    }
}
