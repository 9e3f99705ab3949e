//! Declarative, serializable CRM definitions.
//!
//! A CRM's declarative skeleton — the alphabet, counter arity, transition
//! table, and reachable set — round-trips through `serde_json`: parsed once
//! into a plain [`CrmSpec`], which is everything about a CRM *except* the reward
//! emitters (closures aren't serializable, and the spec's reward emitters
//! are always supplied from code — §6 "no persisted state" covers the
//! automaton, not its callers' process). [`CrmSpec::build`] combines a spec
//! with a caller-supplied reward table to produce a working [`Crm`].

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crm_core::{Alphabet, CounterTuple, RewardEmitter, State};

use crate::builder::CrmBuilder;
use crate::crm::Crm;
use crate::error::ConstructionError;

/// One edge's non-reward data: destination state and counter delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub dst: State,
    pub delta: Vec<i64>,
}

/// The declarative (reward-free) half of a CRM definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmSpec {
    pub alphabet: Vec<String>,
    pub counter_arity: usize,
    pub initial_state: State,
    pub initial_counters: Vec<i64>,
    #[serde(default = "default_terminal_states")]
    pub terminal_states: Vec<State>,
    pub transitions: IndexMap<State, IndexMap<String, TransitionSpec>>,
    pub reachable_configurations: Vec<(State, Vec<i64>)>,
}

fn default_terminal_states() -> Vec<State> {
    vec![crm_core::TERMINAL_SINK]
}

impl CrmSpec {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Combine this spec with a reward emitter for every `(state, expr)`
    /// edge it declares, producing a working [`Crm`].
    ///
    /// `rewards` must have exactly the same `(state, expr)` keys as
    /// [`Self::transitions`]; any mismatch surfaces as
    /// [`ConstructionError::KeyMismatch`].
    pub fn build<O, A>(
        &self,
        mut rewards: HashMap<(State, String), RewardEmitter<O, A>>,
    ) -> Result<Crm<O, A>, ConstructionError> {
        let alphabet = Alphabet::new(self.alphabet.iter().cloned())?;

        let mut builder = CrmBuilder::<O, A>::new(
            alphabet,
            self.counter_arity,
            self.initial_state,
            CounterTuple::new(self.initial_counters.clone()),
        )
        .terminal_states(self.terminal_states.iter().copied());

        for (&state, exprs) in &self.transitions {
            for (expr, edge) in exprs {
                let reward = rewards.remove(&(state, expr.clone())).ok_or_else(|| {
                    ConstructionError::KeyMismatch {
                        state,
                        detail: format!(
                            "no reward emitter supplied for edge {expr:?} (transitions and \
                             rewards must share the same (state, expr) keys)"
                        ),
                    }
                })?;
                builder = builder.transition(state, expr.clone(), edge.dst, edge.delta.clone(), reward);
            }
        }

        if let Some(((state, expr), _)) = rewards.into_iter().next() {
            return Err(ConstructionError::KeyMismatch {
                state,
                detail: format!(
                    "reward emitter supplied for edge {expr:?} which is not in the transition table"
                ),
            });
        }

        builder = builder.reachable(
            self.reachable_configurations
                .iter()
                .map(|(u, c)| (*u, CounterTuple::new(c.clone()))),
        );

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let mut transitions = IndexMap::new();
        let mut state_0 = IndexMap::new();
        state_0.insert(
            "A".to_string(),
            TransitionSpec {
                dst: -1,
                delta: vec![1],
            },
        );
        state_0.insert(
            String::new(),
            TransitionSpec {
                dst: 0,
                delta: vec![0],
            },
        );
        transitions.insert(0, state_0);

        let spec = CrmSpec {
            alphabet: vec!["A".to_string()],
            counter_arity: 1,
            initial_state: 0,
            initial_counters: vec![0],
            terminal_states: vec![-1],
            transitions,
            reachable_configurations: vec![(0, vec![0])],
        };

        let json = spec.to_json().unwrap();
        let parsed = CrmSpec::from_json(&json).unwrap();

        let mut rewards = HashMap::new();
        rewards.insert((0, "A".to_string()), RewardEmitter::<(), ()>::from(1.0));
        rewards.insert((0, String::new()), RewardEmitter::<(), ()>::from(-0.1));

        let crm = parsed.build(rewards).unwrap();
        assert_eq!(crm.u0(), 0);
    }

    #[test]
    fn missing_reward_is_a_key_mismatch() {
        let mut transitions = IndexMap::new();
        let mut state_0 = IndexMap::new();
        state_0.insert(
            String::new(),
            TransitionSpec {
                dst: 0,
                delta: vec![0],
            },
        );
        transitions.insert(0, state_0);

        let spec = CrmSpec {
            alphabet: vec![],
            counter_arity: 1,
            initial_state: 0,
            initial_counters: vec![0],
            terminal_states: vec![-1],
            transitions,
            reachable_configurations: vec![(0, vec![0])],
        };

        let err = spec.build::<(), ()>(HashMap::new()).unwrap_err();
        assert!(matches!(err, ConstructionError::KeyMismatch { .. }));
    }
}
