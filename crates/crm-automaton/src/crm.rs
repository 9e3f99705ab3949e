//! The CRM automaton (§4.3): states, counters, and the ordered per-state
//! transition lists constructed from it.

use indexmap::IndexMap;
use std::collections::HashSet;

use crm_core::{Alphabet, CounterTuple, Event, RewardEmitter, State};
use crm_expr::TransitionExpr;

use crate::error::{ConstructionError, TerminalStep};

/// One normalised edge: a parsed, alphabet-resolved expression plus the
/// destination state, counter delta, and reward emitter it carries.
pub struct TransitionEdge<O, A> {
    expr_src: String,
    expr: TransitionExpr<Event>,
    dst: State,
    delta: Vec<i64>,
    reward: RewardEmitter<O, A>,
}

impl<O, A> TransitionEdge<O, A> {
    pub fn expr_src(&self) -> &str {
        &self.expr_src
    }

    pub fn dst(&self) -> State {
        self.dst
    }

    pub fn delta(&self) -> &[i64] {
        &self.delta
    }
}

/// An immutable counting reward machine.
///
/// Built once by [`crate::builder::CrmBuilder`] or
/// [`Crm::try_new`] and freely shareable afterward — see §5: a `Crm` owns
/// no mutable state, so it can be held behind a plain `Arc` and used from
/// many cross-product instances or threads at once.
pub struct Crm<O, A> {
    alphabet: Alphabet,
    counter_arity: usize,
    u0: State,
    c0: CounterTuple,
    terminal_states: HashSet<State>,
    edges: IndexMap<State, Vec<TransitionEdge<O, A>>>,
    reachable: Vec<(State, CounterTuple)>,
}

impl<O, A> Crm<O, A> {
    /// Build and validate a CRM from the three parallel string-keyed maps
    /// described in §3/§4.3: state transitions, counter updates, and reward
    /// emitters, all keyed first by source state and then by the
    /// transition-expression string labelling that edge.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        alphabet: Alphabet,
        counter_arity: usize,
        u0: State,
        c0: CounterTuple,
        terminal_states: impl IntoIterator<Item = State>,
        delta_u: IndexMap<State, IndexMap<String, State>>,
        delta_c: IndexMap<State, IndexMap<String, Vec<i64>>>,
        delta_r: IndexMap<State, IndexMap<String, RewardEmitter<O, A>>>,
        reachable: Vec<(State, CounterTuple)>,
    ) -> Result<Self, ConstructionError> {
        if c0.arity() != counter_arity {
            return Err(ConstructionError::InitialCounterArityMismatch {
                expected: counter_arity,
                found: c0.arity(),
            });
        }

        let terminal_states: HashSet<State> = terminal_states.into_iter().collect();

        let declared_states: HashSet<State> = delta_u
            .keys()
            .chain(delta_c.keys())
            .chain(delta_r.keys())
            .copied()
            .collect();

        let mut edges: IndexMap<State, Vec<TransitionEdge<O, A>>> = IndexMap::new();

        for &state in &declared_states {
            let u_exprs = delta_u.get(&state);
            let c_exprs = delta_c.get(&state);
            let r_exprs = delta_r.get(&state);

            match (u_exprs, c_exprs, r_exprs) {
                (Some(u), Some(c), Some(r)) => {
                    check_key_congruence(state, u.keys(), c.keys(), r.keys())?;
                }
                _ => {
                    return Err(ConstructionError::KeyMismatch {
                        state,
                        detail: "state is missing from one of the state/counter/reward maps"
                            .to_string(),
                    });
                }
            }

            let u_exprs = u_exprs.unwrap();
            let c_exprs = c_exprs.unwrap();
            let r_exprs = r_exprs.unwrap();

            let mut state_edges = Vec::with_capacity(u_exprs.len());
            let mut default_count = 0usize;

            for (expr_src, &dst) in u_exprs {
                let delta = c_exprs.get(expr_src).expect("key congruence checked above");

                if delta.len() != counter_arity {
                    return Err(ConstructionError::ArityMismatch {
                        state,
                        expr: expr_src.clone(),
                        expected: counter_arity,
                        found: delta.len(),
                    });
                }

                let valid_target =
                    terminal_states.contains(&dst) || declared_states.contains(&dst);
                if !valid_target {
                    return Err(ConstructionError::UnknownState {
                        state,
                        expr: expr_src.clone(),
                        target: dst,
                    });
                }

                let parsed =
                    crm_expr::parse_transition_expr(expr_src, counter_arity).map_err(|source| {
                        ConstructionError::ParseError {
                            state,
                            expr: expr_src.clone(),
                            source,
                        }
                    })?;
                let resolved = parsed.resolve(&alphabet).map_err(|source| {
                    ConstructionError::UnknownEvent {
                        state,
                        expr: expr_src.clone(),
                        source,
                    }
                })?;

                if resolved.is_default_edge() {
                    default_count += 1;
                }

                state_edges.push(TransitionEdge {
                    expr_src: expr_src.clone(),
                    expr: resolved,
                    dst,
                    delta: delta.clone(),
                    reward: r_exprs
                        .get(expr_src)
                        .expect("key congruence checked above")
                        .clone(),
                });
            }

            if !terminal_states.contains(&state) {
                match default_count {
                    0 => return Err(ConstructionError::MissingDefault { state }),
                    1 => {}
                    _ => return Err(ConstructionError::DuplicateDefault { state }),
                }
                // Normalise: the default edge is tried last regardless of
                // declared position (§4.3, design notes).
                let default_pos = state_edges
                    .iter()
                    .position(|e| e.expr.is_default_edge())
                    .expect("counted above");
                let default_edge = state_edges.remove(default_pos);
                state_edges.push(default_edge);
            }

            edges.insert(state, state_edges);
        }

        if reachable.is_empty() {
            return Err(ConstructionError::EmptyReachableSet);
        }
        for (state, counters) in &reachable {
            if counters.arity() != counter_arity {
                return Err(ConstructionError::ReachableArityMismatch {
                    state: *state,
                    counters: counters.values().to_vec(),
                    expected: counter_arity,
                    found: counters.arity(),
                });
            }
            if !terminal_states.contains(state) && !declared_states.contains(state) {
                return Err(ConstructionError::ReachableUnknownState { state: *state });
            }
        }

        Ok(Self {
            alphabet,
            counter_arity,
            u0,
            c0,
            terminal_states,
            edges,
            reachable,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn counter_arity(&self) -> usize {
        self.counter_arity
    }

    pub fn u0(&self) -> State {
        self.u0
    }

    pub fn c0(&self) -> &CounterTuple {
        &self.c0
    }

    pub fn terminal_states(&self) -> &HashSet<State> {
        &self.terminal_states
    }

    pub fn is_terminal(&self, state: State) -> bool {
        self.terminal_states.contains(&state)
    }

    pub fn reachable_configurations(&self) -> &[(State, CounterTuple)] {
        &self.reachable
    }

    pub fn edges(&self, state: State) -> Option<&[TransitionEdge<O, A>]> {
        self.edges.get(&state).map(Vec::as_slice)
    }

    /// One step of the automaton (§4.3): `(u, c, E) -> (u', c', reward_emitter)`.
    ///
    /// At least one edge always matches (§8 invariant 1): every non-default
    /// edge is tried in declared order against `E` and `c` as written, but
    /// the default edge — tried last, by construction — is taken
    /// unconditionally if nothing else matched. Its nominal empty formula
    /// is a construction-time marker, not a runtime condition; §8 property 6
    /// ("empty formula matches iff `E = ∅`") governs ordinary edges whose
    /// formula happens to be empty, not this distinguished catch-all.
    pub fn step(
        &self,
        u: State,
        c: &CounterTuple,
        events: &crm_core::EventSet,
    ) -> Result<(State, CounterTuple, &RewardEmitter<O, A>), TerminalStep> {
        if self.terminal_states.contains(&u) {
            return Err(TerminalStep(u));
        }

        let edges = self
            .edges
            .get(&u)
            .expect("non-terminal state reached step() without declared edges");

        let (default, non_default) = edges
            .split_last()
            .expect("construction guarantees at least one edge per non-terminal state");

        for edge in non_default {
            if edge.expr.matches(events, c) {
                let next_c = c.apply_delta(&edge.delta);
                return Ok((edge.dst, next_c, &edge.reward));
            }
        }

        let next_c = c.apply_delta(&default.delta);
        Ok((default.dst, next_c, &default.reward))
    }
}

fn check_key_congruence<'a>(
    state: State,
    u_keys: impl Iterator<Item = &'a String>,
    c_keys: impl Iterator<Item = &'a String>,
    r_keys: impl Iterator<Item = &'a String>,
) -> Result<(), ConstructionError> {
    let u_keys: HashSet<&String> = u_keys.collect();
    let c_keys: HashSet<&String> = c_keys.collect();
    let r_keys: HashSet<&String> = r_keys.collect();

    if u_keys != c_keys {
        return Err(ConstructionError::KeyMismatch {
            state,
            detail: "state-transition and counter-update maps have different expression keys"
                .to_string(),
        });
    }
    if u_keys != r_keys {
        return Err(ConstructionError::KeyMismatch {
            state,
            detail: "state-transition and reward maps have different expression keys".to_string(),
        });
    }
    Ok(())
}
