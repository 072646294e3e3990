//! Router: registration, persistent updates, match/ordering.
//!
//! The router is a value. [`route`](Router::route) is referentially
//! transparent and safe to call concurrently against a shared router
//! without synchronization; [`add`](Router::add) and
//! [`remove`](Router::remove) return a *new* router sharing most of
//! its trie with the old one. Consumers publish updates by swapping
//! the handle they hand out (a single `Arc` swap); the router itself
//! holds no locks.
//!
//! # Ordering
//!
//! Matched routes sort by a composite key, descending:
//!
//! 1. **Priority** - higher first.
//! 2. **Specificity** - per-segment, literal > `*` > `**`, left to
//!    right; on a shared prefix the longer pattern wins.
//! 3. **Insertion index** - earlier first (stable tie-break).

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use signet_signal::Signal;

use crate::pattern::split_type;
use crate::trie::{self, Node, RouteEntry};
use crate::{Handler, Route, RoutingError, TypePattern};

/// Trie-based matcher from signal types to ordered handler lists.
///
/// # Example
///
/// ```
/// use signet_router::{Handler, Route, Router};
/// use signet_signal::Signal;
/// use serde_json::json;
///
/// let router = Router::new(vec![
///     Route::new("user.created", Handler::instruction("add", json!({})))?,
///     Route::new("user.**", Handler::instruction("audit", json!({})))?,
/// ])?;
///
/// let signal = Signal::builder("user.created", "/svc").build().unwrap();
/// let handlers = router.route(&signal)?;
/// assert_eq!(handlers.len(), 2);
/// # Ok::<(), signet_router::RoutingError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router {
    root: Arc<Node>,
    next_index: u64,
}

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a router from one or more routes.
    ///
    /// # Errors
    ///
    /// Returns the first pattern or priority validation failure;
    /// nothing is registered on error.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, RoutingError> {
        Self::empty().add(routes)
    }

    /// Returns a new router with the given routes appended.
    ///
    /// Registration is all-or-nothing: every route is validated before
    /// any is inserted, and `self` is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidPriority`] for a priority outside
    /// `[-100, 100]`. Pattern failures surface earlier, from
    /// [`Route::new`].
    pub fn add(&self, routes: impl IntoIterator<Item = Route>) -> Result<Self, RoutingError> {
        let routes: Vec<Route> = routes.into_iter().collect();
        for route in &routes {
            route.check_priority()?;
        }

        let mut root = (*self.root).clone();
        let mut next_index = self.next_index;
        for route in routes {
            let rank = route.pattern().rank();
            let segments = route.pattern().segments().to_vec();
            let entry = Arc::new(RouteEntry {
                route,
                index: next_index,
                rank,
            });
            next_index += 1;
            root = trie::insert(&root, &segments, entry);
        }

        Ok(Self {
            root: Arc::new(root),
            next_index,
        })
    }

    /// Returns a new router with every route at `pattern` removed.
    ///
    /// A pattern that parses but is not registered, or does not parse
    /// at all, is a no-op.
    #[must_use]
    pub fn remove(&self, pattern: &str) -> Self {
        self.remove_where(pattern, |_| true)
    }

    /// Returns a new router with routes at `pattern` whose handler
    /// equals `handler` removed.
    #[must_use]
    pub fn remove_handler(&self, pattern: &str, handler: &Handler) -> Self {
        self.remove_where(pattern, |entry| entry.route.handler() == handler)
    }

    fn remove_where(&self, pattern: &str, matches: impl Fn(&RouteEntry) -> bool) -> Self {
        let Ok(compiled) = TypePattern::parse(pattern) else {
            return self.clone();
        };

        let (root, _removed) =
            trie::remove(&self.root, compiled.segments(), &|entry| !matches(entry));
        Self {
            root: Arc::new(root.unwrap_or_default()),
            next_index: self.next_index,
        }
    }

    /// Matches a signal and returns its handlers in order.
    ///
    /// Dispatch groups are flattened: the result contains only
    /// instruction and single-target handlers.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::InvalidType`] when the signal type fails
    ///   validation.
    /// - [`RoutingError::GuardFailure`] when any matched guard panics.
    /// - [`RoutingError::NoMatch`] when nothing matched (including
    ///   guard rejections of every structural match).
    pub fn route(&self, signal: &Signal) -> Result<Vec<Handler>, RoutingError> {
        let segments = split_type(&signal.signal_type)?;
        let mut entries = trie::collect(&self.root, &segments);

        let mut accepted = Vec::with_capacity(entries.len());
        for entry in entries.drain(..) {
            match entry.route.guard() {
                None => accepted.push(entry),
                Some(guard) => {
                    let guard = Arc::clone(guard);
                    let passed = catch_unwind(AssertUnwindSafe(|| guard.check(signal)))
                        .map_err(|_| {
                            RoutingError::GuardFailure(format!(
                                "guard panicked for pattern \"{}\"",
                                entry.route.pattern()
                            ))
                        })?;
                    if passed {
                        accepted.push(entry);
                    }
                }
            }
        }

        accepted.sort_by(|a, b| {
            b.route
                .priority()
                .cmp(&a.route.priority())
                .then_with(|| b.rank.cmp(&a.rank))
                .then_with(|| a.index.cmp(&b.index))
        });
        accepted.dedup_by(|a, b| a.index == b.index);

        if accepted.is_empty() {
            return Err(RoutingError::NoMatch);
        }

        let mut handlers = Vec::with_capacity(accepted.len());
        for entry in &accepted {
            entry.route.handler().flatten_into(&mut handlers);
        }
        Ok(handlers)
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        trie::count(&self.root)
    }

    /// Returns `true` when no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instruction(name: &str) -> Handler {
        Handler::instruction(name, json!(null))
    }

    fn signal(signal_type: &str) -> Signal {
        Signal::builder(signal_type, "/test").build().unwrap()
    }

    fn actions(handlers: &[Handler]) -> Vec<String> {
        handlers
            .iter()
            .map(|h| match h {
                Handler::Instruction(i) => i.action.clone(),
                Handler::Dispatch(t) => t.adapter.clone(),
                Handler::DispatchGroup(_) => panic!("groups must be flattened"),
            })
            .collect()
    }

    // ── Registration ─────────────────────────────────────────

    #[test]
    fn new_from_single_route() {
        let router = Router::new([Route::new("a.b", instruction("x")).unwrap()]).unwrap();
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn add_is_all_or_nothing() {
        let router = Router::empty();
        let result = router.add([
            Route::new("a.b", instruction("ok")).unwrap(),
            Route::new("c.d", instruction("bad")).unwrap().with_priority(101),
        ]);
        assert!(matches!(result, Err(RoutingError::InvalidPriority(101))));
        assert!(router.is_empty());
    }

    #[test]
    fn add_does_not_mutate_original() {
        let router = Router::new([Route::new("a.b", instruction("x")).unwrap()]).unwrap();
        let bigger = router
            .add([Route::new("c.d", instruction("y")).unwrap()])
            .unwrap();
        assert_eq!(router.len(), 1);
        assert_eq!(bigger.len(), 2);
    }

    #[test]
    fn duplicate_routes_are_retained() {
        let router = Router::new([
            Route::new("a.b", instruction("x")).unwrap(),
            Route::new("a.b", instruction("x")).unwrap(),
        ])
        .unwrap();
        assert_eq!(router.len(), 2);
        let handlers = router.route(&signal("a.b")).unwrap();
        assert_eq!(actions(&handlers), ["x", "x"]);
    }

    // ── Removal ──────────────────────────────────────────────

    #[test]
    fn remove_clears_all_routes_at_pattern() {
        let router = Router::new([
            Route::new("a.b", instruction("x")).unwrap(),
            Route::new("a.b", instruction("y")).unwrap(),
            Route::new("a.c", instruction("z")).unwrap(),
        ])
        .unwrap();

        let trimmed = router.remove("a.b");
        assert_eq!(trimmed.len(), 1);
        assert!(trimmed.route(&signal("a.b")).is_err());
        assert!(trimmed.route(&signal("a.c")).is_ok());
    }

    #[test]
    fn remove_handler_is_selective() {
        let router = Router::new([
            Route::new("a.b", instruction("x")).unwrap(),
            Route::new("a.b", instruction("y")).unwrap(),
        ])
        .unwrap();

        let trimmed = router.remove_handler("a.b", &instruction("x"));
        assert_eq!(trimmed.len(), 1);
        assert_eq!(actions(&trimmed.route(&signal("a.b")).unwrap()), ["y"]);
    }

    #[test]
    fn remove_missing_pattern_is_noop() {
        let router = Router::new([Route::new("a.b", instruction("x")).unwrap()]).unwrap();
        assert_eq!(router.remove("no.such").len(), 1);
        assert_eq!(router.remove("not a pattern!").len(), 1);
    }

    // ── Matching ─────────────────────────────────────────────

    #[test]
    fn route_rejects_invalid_type() {
        let router = Router::new([Route::new("**", instruction("x")).unwrap()]).unwrap();
        let bad = Signal::builder("user.@bad", "/test").build().unwrap();
        assert!(matches!(
            router.route(&bad),
            Err(RoutingError::InvalidType(_))
        ));
    }

    #[test]
    fn route_empty_match_is_no_match() {
        let router = Router::new([Route::new("a.b", instruction("x")).unwrap()]).unwrap();
        assert_eq!(
            router.route(&signal("c.d")).unwrap_err(),
            RoutingError::NoMatch
        );
    }

    #[test]
    fn route_is_deterministic() {
        let router = Router::new([
            Route::new("a.*", instruction("one")).unwrap(),
            Route::new("a.**", instruction("two")).unwrap(),
            Route::new("a.b", instruction("three")).unwrap(),
        ])
        .unwrap();

        let first = actions(&router.route(&signal("a.b")).unwrap());
        for _ in 0..10 {
            assert_eq!(actions(&router.route(&signal("a.b")).unwrap()), first);
        }
    }

    #[test]
    fn priority_orders_before_specificity() {
        let router = Router::new([
            Route::new("a.b", instruction("exact")).unwrap(),
            Route::new("a.**", instruction("boosted")).unwrap().with_priority(10),
        ])
        .unwrap();
        assert_eq!(
            actions(&router.route(&signal("a.b")).unwrap()),
            ["boosted", "exact"]
        );
    }

    #[test]
    fn insertion_order_breaks_full_ties() {
        let router = Router::new([
            Route::new("a.b", instruction("first")).unwrap(),
            Route::new("a.b", instruction("second")).unwrap(),
        ])
        .unwrap();
        assert_eq!(
            actions(&router.route(&signal("a.b")).unwrap()),
            ["first", "second"]
        );
    }

    #[test]
    fn groups_flatten_at_route_position() {
        use signet_signal::DispatchTarget;

        let router = Router::new([
            Route::new(
                "a.b",
                Handler::group(vec![
                    DispatchTarget::new("console"),
                    DispatchTarget::new("bus"),
                ]),
            )
            .unwrap()
            .with_priority(1),
            Route::new("a.b", instruction("after")).unwrap(),
        ])
        .unwrap();

        assert_eq!(
            actions(&router.route(&signal("a.b")).unwrap()),
            ["console", "bus", "after"]
        );
    }

    // ── Guards ───────────────────────────────────────────────

    #[test]
    fn guard_filters_candidates() {
        let router = Router::new([Route::new("user.enrich", instruction("enrich"))
            .unwrap()
            .with_guard(|s: &Signal| {
                s.data
                    .as_ref()
                    .and_then(|d| d.get("email"))
                    .is_some()
            })])
        .unwrap();

        let with_email = Signal::builder("user.enrich", "/test")
            .data(json!({"email": "a@b"}))
            .build()
            .unwrap();
        assert!(router.route(&with_email).is_ok());

        let without = Signal::builder("user.enrich", "/test")
            .data(json!({"name": "a"}))
            .build()
            .unwrap();
        assert_eq!(router.route(&without).unwrap_err(), RoutingError::NoMatch);
    }

    #[test]
    fn panicking_guard_fails_whole_call() {
        let router = Router::new([
            Route::new("a.b", instruction("guarded"))
                .unwrap()
                .with_guard(|_: &Signal| panic!("bad guard")),
            Route::new("a.b", instruction("plain")).unwrap(),
        ])
        .unwrap();

        assert!(matches!(
            router.route(&signal("a.b")),
            Err(RoutingError::GuardFailure(_))
        ));
    }

    // ── Value semantics ──────────────────────────────────────

    #[test]
    fn old_snapshot_routes_after_update() {
        let v1 = Router::new([Route::new("a.b", instruction("x")).unwrap()]).unwrap();
        let v2 = v1.remove("a.b");

        assert!(v1.route(&signal("a.b")).is_ok());
        assert!(v2.route(&signal("a.b")).is_err());
    }

    #[test]
    fn concurrent_reads_share_one_router() {
        let router = Arc::new(
            Router::new([Route::new("a.**", instruction("x")).unwrap()]).unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let router = Arc::clone(&router);
                std::thread::spawn(move || {
                    let s = Signal::builder("a.b.c", "/test").build().unwrap();
                    router.route(&s).map(|h| h.len())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 1);
        }
    }
}
