//! Step tracing, a zero-cost observation hook in place of a logging facade.
//!
//! The core never writes logs itself (§5: no I/O); a caller that wants
//! structured output implements [`Tracer`] and plugs it into
//! [`crate::cross_product::CrossProduct`]. [`NoopTracer`] is the default and
//! compiles away to nothing.

use crm_core::{CounterTuple, Event, EventSet, State};

/// Observes one cross-product step after it has committed (§4.4 step 7).
pub trait Tracer {
    #[inline(always)]
    fn trace_step(&mut self, _u: State, _c: &CounterTuple, _events: &EventSet, _u_next: State, _c_next: &CounterTuple, _reward: f64) {}

    #[inline(always)]
    fn trace_reset(&mut self, _u0: State, _c0: &CounterTuple) {}
}

/// A tracer that does nothing; all calls are optimized away.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Collects every step as a plain record, useful in tests that want to
/// assert on the full trajectory (see §8 scenarios S1-S4).
#[derive(Debug, Default)]
pub struct RecordingTracer {
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub u: State,
    pub c: CounterTuple,
    pub events: Vec<Event>,
    pub u_next: State,
    pub c_next: CounterTuple,
    pub reward: f64,
}

impl Tracer for RecordingTracer {
    fn trace_step(
        &mut self,
        u: State,
        c: &CounterTuple,
        _events: &EventSet,
        u_next: State,
        c_next: &CounterTuple,
        reward: f64,
    ) {
        self.steps.push(StepRecord {
            u,
            c: c.clone(),
            events: Vec::new(),
            u_next,
            c_next: c_next.clone(),
            reward,
        });
    }
}
