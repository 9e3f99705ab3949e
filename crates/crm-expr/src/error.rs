//! Errors raised while parsing a transition expression or resolving its
//! atoms against a declared alphabet.

use thiserror::Error;

/// A syntax error in a `«formula» / «counter-pattern»` string.
///
/// All variants are detected once, at CRM construction time (§4.2); there
/// are no evaluation-time parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprParseError {
    #[error("unexpected token {found:?} at byte offset {pos} in formula {src:?}")]
    UnexpectedToken {
        src: String,
        found: String,
        pos: usize,
    },

    #[error("formula {src:?} ended unexpectedly, expected an atom or `(`")]
    UnexpectedEnd { src: String },

    #[error("formula {src:?} has trailing input after a complete expression")]
    TrailingTokens { src: String },

    #[error("counter pattern {pattern:?} is not a parenthesised comma-separated list")]
    MalformedPattern { pattern: String },

    #[error("counter pattern {pattern:?} has unknown item {item:?} (expected `Z`, `NZ`, or `-`)")]
    UnknownPatternItem { pattern: String, item: String },

    #[error(
        "counter pattern {pattern:?} has arity {found} but the CRM's counter arity is {expected}"
    )]
    PatternArityMismatch {
        pattern: String,
        expected: usize,
        found: usize,
    },
}

/// An atom in a parsed formula names an event outside the declared alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("formula {formula:?} references undeclared event {event:?}")]
pub struct UnknownEventError {
    pub formula: String,
    pub event: String,
}
