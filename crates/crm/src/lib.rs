//! Counting reward machines: automata that read a stream of symbolic
//! events and a bounded integer memory to emit non-Markovian reward,
//! composed with a ground environment into an ordinary, steppable MDP.
//!
//! - [`crm_core`] — the alphabet, counter tuples, and reward emitters.
//! - [`crm_expr`] — the transition-expression language (`"A and not B / (NZ)"`).
//! - [`crm_automaton`] — the [`Crm`] automaton itself and its builders.
//! - [`crm_env`] — [`CrossProduct`], the ground-env + labelling + CRM
//!   composition, and counterfactual experience generation.
//!
//! Everything is re-exported here so a caller depends on one crate.

pub use crm_core::{
    is_terminal_sentinel, Alphabet, AlphabetError, CounterTuple, Event, EventSet, RewardEmitter,
    State, TERMINAL_SINK,
};
pub use crm_expr::{
    parse_formula, parse_pattern, parse_transition_expr, CounterPattern, ExprParseError, Formula,
    PatternItem, TransitionExpr, UnknownEventError,
};
pub use crm_automaton::{
    ConstructionError, Crm, CrmBuilder, CrmSpec, Detector, LabellingFunction, TerminalStep,
    TransitionEdge, TransitionSpec,
};
pub use crm_env::{
    assert_round_trip, generate_counterfactual_experience, CrossProduct, CrossProductError,
    EncoderError, Experience, GroundEnv, NoopTracer, ObservationCodec, RecordingTracer,
    StateError, StepOutcome, StepRecord, Tracer,
};

#[cfg(test)]
mod letter_world;
