//! Incremental CRM construction, sugar over [`crate::crm::Crm::try_new`]'s
//! raw three-map form.

use indexmap::IndexMap;

use crm_core::{Alphabet, CounterTuple, RewardEmitter, State, TERMINAL_SINK};

use crate::crm::Crm;
use crate::error::ConstructionError;

/// Builds a [`Crm`] one transition at a time.
///
/// ```
/// # use crm_automaton::builder::CrmBuilder;
/// # use crm_core::{Alphabet, CounterTuple};
/// let alphabet = Alphabet::new(["A"]).unwrap();
/// let crm = CrmBuilder::<(), ()>::new(alphabet, 1, 0, CounterTuple::zero(1))
///     .transition(0, "A", -1, vec![1], 1.0)
///     .transition(0, "", 0, vec![0], -0.1)
///     .reachable([(0, CounterTuple::zero(1))])
///     .build()
///     .unwrap();
/// assert_eq!(crm.u0(), 0);
/// ```
pub struct CrmBuilder<O, A> {
    alphabet: Alphabet,
    counter_arity: usize,
    u0: State,
    c0: CounterTuple,
    terminal_states: Vec<State>,
    delta_u: IndexMap<State, IndexMap<String, State>>,
    delta_c: IndexMap<State, IndexMap<String, Vec<i64>>>,
    delta_r: IndexMap<State, IndexMap<String, RewardEmitter<O, A>>>,
    reachable: Vec<(State, CounterTuple)>,
}

impl<O, A> CrmBuilder<O, A> {
    pub fn new(alphabet: Alphabet, counter_arity: usize, u0: State, c0: CounterTuple) -> Self {
        Self {
            alphabet,
            counter_arity,
            u0,
            c0,
            terminal_states: vec![TERMINAL_SINK],
            delta_u: IndexMap::new(),
            delta_c: IndexMap::new(),
            delta_r: IndexMap::new(),
            reachable: Vec::new(),
        }
    }

    /// Override the terminal set `F` (defaults to `{-1}`).
    pub fn terminal_states(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.terminal_states = states.into_iter().collect();
        self
    }

    /// Declare one edge `src --expr/δ,r--> dst`.
    pub fn transition(
        mut self,
        src: State,
        expr: impl Into<String>,
        dst: State,
        delta: impl Into<Vec<i64>>,
        reward: impl Into<RewardEmitter<O, A>>,
    ) -> Self {
        let expr = expr.into();
        self.delta_u.entry(src).or_default().insert(expr.clone(), dst);
        self.delta_c
            .entry(src)
            .or_default()
            .insert(expr.clone(), delta.into());
        self.delta_r
            .entry(src)
            .or_default()
            .insert(expr, reward.into());
        self
    }

    /// Declare the finite set of `(u, c)` configurations the counterfactual
    /// generator may replay against (§4.3, §4.5).
    pub fn reachable(mut self, configs: impl IntoIterator<Item = (State, CounterTuple)>) -> Self {
        self.reachable.extend(configs);
        self
    }

    pub fn build(self) -> Result<Crm<O, A>, ConstructionError> {
        Crm::try_new(
            self.alphabet,
            self.counter_arity,
            self.u0,
            self.c0,
            self.terminal_states,
            self.delta_u,
            self.delta_c,
            self.delta_r,
            self.reachable,
        )
    }
}
