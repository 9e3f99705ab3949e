//! Evaluating a resolved transition expression against an observed event
//! set and counter tuple (§4.2 evaluator).

use crm_core::{CounterTuple, Event, EventSet};

use crate::ast::{CounterPattern, Formula, PatternItem, TransitionExpr};

impl Formula<Event> {
    /// `E ⊆ Σ` is the formula's free variable assignment: an atom holds iff
    /// it's a member of `E`; the empty formula holds iff `E` is empty.
    pub fn evaluate(&self, events: &EventSet) -> bool {
        match self {
            Formula::Empty => events.is_empty(),
            Formula::Atom(event) => events.contains(*event),
            Formula::Not(inner) => !inner.evaluate(events),
            Formula::And(l, r) => l.evaluate(events) && r.evaluate(events),
            Formula::Or(l, r) => l.evaluate(events) || r.evaluate(events),
        }
    }
}

impl CounterPattern {
    /// Whether `counters` satisfies this pattern, position by position.
    ///
    /// # Panics
    /// Panics if `counters.arity() != self.arity()`; arity agreement is
    /// established once at CRM construction and never varies at runtime.
    pub fn matches(&self, counters: &CounterTuple) -> bool {
        assert_eq!(
            self.arity(),
            counters.arity(),
            "counter pattern arity {} does not match counter tuple arity {}",
            self.arity(),
            counters.arity()
        );
        self.0.iter().zip(counters.values()).all(|(item, c)| match item {
            PatternItem::Zero => *c == 0,
            PatternItem::NonZero => *c != 0,
            PatternItem::Wildcard => true,
        })
    }
}

impl TransitionExpr<Event> {
    /// The expression matches iff both the formula and the counter pattern
    /// hold.
    pub fn matches(&self, events: &EventSet, counters: &CounterTuple) -> bool {
        self.formula.evaluate(events) && self.pattern.matches(counters)
    }
}
