//! Fixed-arity signed integer counter tuples, the CRM's extended memory.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// A fixed-arity ordered tuple of signed integers `c = (c_1, ..., c_k)`.
///
/// Arity is determined by the tuple's length at construction and never
/// changes; combining two tuples of different arity (via [`CounterTuple::apply_delta`])
/// panics, which indicates a caller bug rather than a recoverable condition —
/// arity is validated once at CRM construction time and is uniform
/// thereafter (see `crm_automaton`'s construction validators).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterTuple(Vec<i64>);

impl CounterTuple {
    pub fn new(values: impl Into<Vec<i64>>) -> Self {
        Self(values.into())
    }

    /// All-zero tuple of the given arity.
    pub fn zero(arity: usize) -> Self {
        Self(vec![0; arity])
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> &[i64] {
        &self.0
    }

    /// `c + δ`, component-wise.
    ///
    /// # Panics
    /// Panics if `delta.len() != self.arity()`.
    pub fn apply_delta(&self, delta: &[i64]) -> Self {
        assert_eq!(
            delta.len(),
            self.0.len(),
            "counter delta arity {} does not match counter arity {}",
            delta.len(),
            self.0.len()
        );
        Self(
            self.0
                .iter()
                .zip(delta)
                .map(|(c, d)| c.saturating_add(*d))
                .collect(),
        )
    }
}

impl Index<usize> for CounterTuple {
    type Output = i64;
    fn index(&self, index: usize) -> &i64 {
        &self.0[index]
    }
}

impl fmt::Debug for CounterTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}
