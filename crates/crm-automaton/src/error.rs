//! Errors raised building or stepping a [`crate::crm::Crm`] (§4.3, §7).

use crm_core::{AlphabetError, State};
use crm_expr::{ExprParseError, UnknownEventError};
use thiserror::Error;

/// Detected while building a CRM. Every variant names the offending source
/// state and/or expression so the message is actionable without a
/// debugger (§7 "user-visible failure behaviour").
#[derive(Debug, Clone, Error)]
pub enum ConstructionError {
    #[error("alphabet declaration error: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("transition expression for state {state}, edge {expr:?}: {source}")]
    ParseError {
        state: State,
        expr: String,
        #[source]
        source: ExprParseError,
    },

    #[error("transition expression for state {state}, edge {expr:?}: {source}")]
    UnknownEvent {
        state: State,
        expr: String,
        #[source]
        source: UnknownEventError,
    },

    #[error(
        "counter update for state {state}, edge {expr:?} has arity {found} but the CRM's \
         counter arity is {expected}"
    )]
    ArityMismatch {
        state: State,
        expr: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "state {state} has no default edge (an edge with empty formula and all-wildcard \
         pattern is required for every non-terminal state)"
    )]
    MissingDefault { state: State },

    #[error(
        "state {state} declares more than one default edge; only one default edge is allowed \
         per state"
    )]
    DuplicateDefault { state: State },

    #[error(
        "the state-transition, counter-update, and reward maps disagree for state {state}: {detail}"
    )]
    KeyMismatch { state: State, detail: String },

    #[error("transition for state {state}, edge {expr:?} targets undeclared state {target}")]
    UnknownState {
        state: State,
        expr: String,
        target: State,
    },

    #[error("initial counter tuple has arity {found}, but the CRM's counter arity is {expected}")]
    InitialCounterArityMismatch { expected: usize, found: usize },

    #[error("reachable configuration set must not be empty")]
    EmptyReachableSet,

    #[error(
        "reachable configuration ({state}, {counters:?}) has counter arity {found}, but the \
         CRM's counter arity is {expected}"
    )]
    ReachableArityMismatch {
        state: State,
        counters: Vec<i64>,
        expected: usize,
        found: usize,
    },

    #[error("reachable configuration references undeclared state {state}")]
    ReachableUnknownState { state: State },
}

/// The CRM's `step` was invoked on a state in the terminal set `F`.
///
/// This is always a caller bug: the cross-product environment (`crm-env`)
/// never calls `step` once it has observed a terminal transition, so
/// surfacing this means the integration around the CRM is broken, not the
/// CRM itself.
#[derive(Debug, Clone, Copy, Error)]
#[error("CRM step invoked on terminal state {0}")]
pub struct TerminalStep(pub State);
