//! Counterfactual experience generation (§4.5): replay one real ground
//! transition against every reachable `(u, c)` configuration to synthesize
//! many training tuples from a single environment interaction.

use crm_automaton::{Crm, LabellingFunction};

use crate::codec::ObservationCodec;

/// One synthesized experience tuple.
///
/// There is no ground `Info` field: counterfactual experiences never step
/// the ground environment, so no ground-environment info object exists to
/// attach to them (§4.5 step 4 covers only `(obs, action, next_obs, reward,
/// done)`).
#[derive(Debug, Clone)]
pub struct Experience<A, Obs> {
    pub obs: Obs,
    pub action: A,
    pub next_obs: Obs,
    pub reward: f64,
    pub done: bool,
}

/// For every reachable non-terminal `(u, c)`, replay the event set produced
/// by `(o, a, o_next)` through the CRM and synthesize an experience tuple
/// (§4.5 algorithm):
///
/// 1. Label `(o, a, o_next)` once — the event set doesn't depend on `(u, c)`.
/// 2. For each reachable `(u, c)` with `u` non-terminal, step the CRM on
///    that shared event set.
/// 3. Emit the reward the edge taken carries, and mark `done` iff the
///    resulting state is terminal.
/// 4. Encode `(o, u, c)` and `(o_next, u', c')` through the codec to produce
///    the augmented observation pair.
///
/// Terminal `(u, c)` entries in the reachable set are skipped: a terminal
/// state has no outgoing edges to replay (§4.5, §7 `TerminalStep`).
pub fn generate_counterfactual_experience<O, A, C>(
    o: &O,
    a: &A,
    o_next: &O,
    labelling: &LabellingFunction<O, A>,
    crm: &Crm<O, A>,
    codec: &C,
) -> Vec<Experience<A, C::AugmentedObs>>
where
    C: ObservationCodec<GroundObs = O>,
    A: Clone,
{
    let events = labelling.label(o, a, o_next);
    let mut out = Vec::with_capacity(crm.reachable_configurations().len());

    for (u, c) in crm.reachable_configurations() {
        if crm.is_terminal(*u) {
            continue;
        }
        let (u_next, c_next, reward_emitter) = crm
            .step(*u, c, &events)
            .expect("u is non-terminal by the check above, so step() cannot fail");
        let reward = reward_emitter.emit(o, a, o_next);
        let done = crm.is_terminal(u_next);

        let obs = codec.encode(o, *u, c);
        let next_obs = codec.encode(o_next, u_next, &c_next);

        out.push(Experience {
            obs,
            action: a.clone(),
            next_obs,
            reward,
            done,
        });
    }

    out
}
