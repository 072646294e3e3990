//! Route handlers: instructions and dispatch targets.
//!
//! A matched route resolves to one of:
//!
//! - an [`Instruction`] - an opaque action payload executed by an
//!   external collaborator;
//! - a single [`DispatchTarget`] - delivery directions for the
//!   dispatch layer;
//! - a group of dispatch targets, flattened into individual targets
//!   (in declared order) when the router produces its output.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use signet_signal::DispatchTarget;

/// Opaque handler payload naming an action and its arguments.
///
/// The router never interprets instructions; it only orders and
/// returns them. Execution semantics belong to the consumer.
///
/// # Example
///
/// ```
/// use signet_router::Instruction;
/// use serde_json::json;
///
/// let add = Instruction::new("add", json!({"amount": 1}));
/// assert_eq!(add.action, "add");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Action identifier.
    pub action: String,
    /// Action arguments, opaque to the router.
    pub args: Value,
}

impl Instruction {
    /// Creates an instruction.
    #[must_use]
    pub fn new(action: impl Into<String>, args: impl Into<Value>) -> Self {
        Self {
            action: action.into(),
            args: args.into(),
        }
    }
}

/// What a route does when it matches.
///
/// `DispatchGroup` exists only at registration time: route output
/// flattens each group into its targets at the route's position, so
/// consumers of [`Router::route`](crate::Router::route) never see it.
#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    /// Run an opaque instruction.
    Instruction(Instruction),
    /// Deliver through a single dispatch target.
    Dispatch(DispatchTarget),
    /// Deliver through several targets, in declared order.
    DispatchGroup(Vec<DispatchTarget>),
}

impl Handler {
    /// Instruction handler shorthand.
    #[must_use]
    pub fn instruction(action: impl Into<String>, args: impl Into<Value>) -> Self {
        Self::Instruction(Instruction::new(action, args))
    }

    /// Single dispatch target shorthand.
    #[must_use]
    pub fn dispatch(target: DispatchTarget) -> Self {
        Self::Dispatch(target)
    }

    /// Dispatch group shorthand.
    #[must_use]
    pub fn group(targets: Vec<DispatchTarget>) -> Self {
        Self::DispatchGroup(targets)
    }

    /// Returns `true` for instruction handlers.
    #[must_use]
    pub fn is_instruction(&self) -> bool {
        matches!(self, Self::Instruction(_))
    }

    /// Flattens this handler into route output, preserving order.
    pub(crate) fn flatten_into(&self, out: &mut Vec<Handler>) {
        match self {
            Self::DispatchGroup(targets) => {
                out.extend(targets.iter().cloned().map(Handler::Dispatch));
            }
            other => out.push(other.clone()),
        }
    }
}

impl From<Instruction> for Handler {
    fn from(instruction: Instruction) -> Self {
        Self::Instruction(instruction)
    }
}

impl From<DispatchTarget> for Handler {
    fn from(target: DispatchTarget) -> Self {
        Self::Dispatch(target)
    }
}
