//! Reward emitters: the payload a CRM transition carries.
//!
//! A scalar-or-callable split as an explicit two-variant enum rather than a
//! single boxed closure, so the overwhelmingly common constant-reward case
//! needs no allocation.

use std::fmt;
use std::sync::Arc;

/// Emits the scalar reward for a CRM transition, given the ground
/// transition `(o, a, o')` that triggered it.
///
/// `Constant` emitters ignore the ground transition entirely. `Functional`
/// emitters are pure: the core never retries or caches a call, so a
/// panicking emitter propagates straight out of the step that invoked it
/// (see `crm_env`'s cross-product `step`).
#[derive(Clone)]
pub enum RewardEmitter<O, A> {
    Constant(f64),
    Functional(Arc<dyn Fn(&O, &A, &O) -> f64 + Send + Sync>),
}

impl<O, A> RewardEmitter<O, A> {
    /// Build a functional emitter from a plain closure.
    pub fn functional<F>(f: F) -> Self
    where
        F: Fn(&O, &A, &O) -> f64 + Send + Sync + 'static,
    {
        Self::Functional(Arc::new(f))
    }

    /// Invoke the emitter against an actual ground transition.
    pub fn emit(&self, o: &O, a: &A, o_next: &O) -> f64 {
        match self {
            Self::Constant(r) => *r,
            Self::Functional(f) => f(o, a, o_next),
        }
    }
}

impl<O, A> From<f64> for RewardEmitter<O, A> {
    fn from(r: f64) -> Self {
        Self::Constant(r)
    }
}

impl<O, A> fmt::Debug for RewardEmitter<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(r) => write!(f, "RewardEmitter::Constant({r})"),
            Self::Functional(_) => write!(f, "RewardEmitter::Functional(..)"),
        }
    }
}
