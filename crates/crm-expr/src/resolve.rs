//! Resolving raw identifier atoms against a declared alphabet.
//!
//! Parsing (`crate::parser`) never sees an [`Alphabet`]; resolution is a
//! separate pass so a freshly parsed [`Formula<String>`] can be checked
//! against whichever alphabet a CRM under construction declares.

use crm_core::{Alphabet, Event};

use crate::ast::{Formula, TransitionExpr};
use crate::error::UnknownEventError;

impl Formula<String> {
    /// Resolve every atom's name to an [`Event`], failing on the first name
    /// the alphabet doesn't declare.
    pub fn resolve(&self, alphabet: &Alphabet) -> Result<Formula<Event>, UnknownEventError> {
        self.resolve_inner(alphabet, &self.to_string())
    }

    fn resolve_inner(
        &self,
        alphabet: &Alphabet,
        original: &str,
    ) -> Result<Formula<Event>, UnknownEventError> {
        Ok(match self {
            Formula::Empty => Formula::Empty,
            Formula::Atom(name) => {
                let event = alphabet.event(name).ok_or_else(|| UnknownEventError {
                    formula: original.to_string(),
                    event: name.clone(),
                })?;
                Formula::Atom(event)
            }
            Formula::Not(inner) => {
                Formula::Not(Box::new(inner.resolve_inner(alphabet, original)?))
            }
            Formula::And(l, r) => Formula::And(
                Box::new(l.resolve_inner(alphabet, original)?),
                Box::new(r.resolve_inner(alphabet, original)?),
            ),
            Formula::Or(l, r) => Formula::Or(
                Box::new(l.resolve_inner(alphabet, original)?),
                Box::new(r.resolve_inner(alphabet, original)?),
            ),
        })
    }
}

impl TransitionExpr<String> {
    pub fn resolve(
        &self,
        alphabet: &Alphabet,
    ) -> Result<TransitionExpr<Event>, UnknownEventError> {
        Ok(TransitionExpr {
            formula: self.formula.resolve(alphabet)?,
            pattern: self.pattern.clone(),
        })
    }
}
