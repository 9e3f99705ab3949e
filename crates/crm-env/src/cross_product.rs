//! The cross-product environment (§4.4): a ground env, a labelling
//! function, and a CRM composed into one steppable, Markov environment.

use thiserror::Error;

use crm_automaton::{Crm, LabellingFunction, TerminalStep};
use crm_core::{CounterTuple, State};

use crate::codec::ObservationCodec;
use crate::error::StateError;
use crate::ground::GroundEnv;
use crate::trace::{NoopTracer, Tracer};

/// Errors surfaced by [`CrossProduct::step`]: either the cross-product was
/// used out of protocol, or the CRM itself rejected the step. The latter
/// should not happen in practice — construction guarantees every
/// non-terminal state has a matching default edge — but `step()` is not
/// called when `u` is terminal, so [`TerminalStep`] is unreachable in
/// correct use and is only surfaced for completeness.
#[derive(Debug, Error)]
pub enum CrossProductError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Terminal(#[from] TerminalStep),
}

/// What `step()` hands back: the augmented observation, the CRM-emitted
/// reward, the terminated/truncated flags, and the ground environment's
/// own info.
#[derive(Debug, Clone)]
pub struct StepOutcome<Obs, Info> {
    pub obs: Obs,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

struct Episode<Obs> {
    u: State,
    c: CounterTuple,
    step_count: u64,
    last_ground_obs: Obs,
    done: bool,
}

/// Composes a [`GroundEnv`], a [`LabellingFunction`], and a [`Crm`] into a
/// single Markov decision process over augmented observations `(o, u, c)`
/// (§2, component D).
///
/// Not shareable across threads or episodes (§5): it owns the mutable
/// `(u, c)` state of one episode in progress. Build a fresh `CrossProduct`
/// per concurrent rollout; the underlying [`Crm`] can be shared (wrap it in
/// an `Arc` and clone the `Arc` into each instance).
pub struct CrossProduct<G, C, T = NoopTracer>
where
    G: GroundEnv,
    C: ObservationCodec<GroundObs = G::Obs>,
{
    ground: G,
    labelling: LabellingFunction<G::Obs, G::Action>,
    crm: Crm<G::Obs, G::Action>,
    codec: C,
    max_steps: u64,
    tracer: T,
    episode: Option<Episode<G::Obs>>,
}

impl<G, C> CrossProduct<G, C, NoopTracer>
where
    G: GroundEnv,
    C: ObservationCodec<GroundObs = G::Obs>,
{
    pub fn new(
        ground: G,
        labelling: LabellingFunction<G::Obs, G::Action>,
        crm: Crm<G::Obs, G::Action>,
        codec: C,
        max_steps: u64,
    ) -> Self {
        Self {
            ground,
            labelling,
            crm,
            codec,
            max_steps,
            tracer: NoopTracer,
            episode: None,
        }
    }
}

impl<G, C, T> CrossProduct<G, C, T>
where
    G: GroundEnv,
    C: ObservationCodec<GroundObs = G::Obs>,
    T: Tracer,
{
    pub fn with_tracer(
        ground: G,
        labelling: LabellingFunction<G::Obs, G::Action>,
        crm: Crm<G::Obs, G::Action>,
        codec: C,
        max_steps: u64,
        tracer: T,
    ) -> Self {
        Self {
            ground,
            labelling,
            crm,
            codec,
            max_steps,
            tracer,
            episode: None,
        }
    }

    pub fn crm(&self) -> &Crm<G::Obs, G::Action> {
        &self.crm
    }

    /// Reset both the ground environment and the automaton state (§4.4
    /// "reset").
    pub fn reset(&mut self, seed: Option<u64>) -> (C::AugmentedObs, G::Info) {
        let (o0, info) = self.ground.reset(seed);
        let u0 = self.crm.u0();
        let c0 = self.crm.c0().clone();

        self.tracer.trace_reset(u0, &c0);

        let augmented = self.codec.encode(&o0, u0, &c0);
        self.episode = Some(Episode {
            u: u0,
            c: c0,
            step_count: 0,
            last_ground_obs: o0,
            done: false,
        });
        (augmented, info)
    }

    /// One step of the composed MDP (§4.4 "step"):
    /// 1. Step the ground environment.
    /// 2. Label the ground transition into an event set.
    /// 3. Step the CRM on that event set.
    /// 4. Emit reward from the edge taken.
    /// 5. Terminated iff the new automaton state is terminal; truncated iff
    ///    the step budget is exhausted.
    pub fn step(
        &mut self,
        action: &G::Action,
    ) -> Result<StepOutcome<C::AugmentedObs, G::Info>, CrossProductError> {
        let episode = self.episode.as_mut().ok_or(StateError::NotReset)?;
        if episode.done {
            return Err(StateError::EpisodeOver.into());
        }

        episode.step_count += 1;

        let (o_next, _ground_reward, _ground_terminated, _ground_truncated, info) =
            self.ground.step(action);

        let events = self
            .labelling
            .label(&episode.last_ground_obs, action, &o_next);

        let (u_next, c_next, reward_emitter) = self.crm.step(episode.u, &episode.c, &events)?;
        let reward = reward_emitter.emit(&episode.last_ground_obs, action, &o_next);

        let terminated = self.crm.is_terminal(u_next);
        let truncated = episode.step_count >= self.max_steps;

        self.tracer
            .trace_step(episode.u, &episode.c, &events, u_next, &c_next, reward);

        let augmented = self.codec.encode(&o_next, u_next, &c_next);

        episode.u = u_next;
        episode.c = c_next;
        episode.last_ground_obs = o_next;
        episode.done = terminated || truncated;

        Ok(StepOutcome {
            obs: augmented,
            reward,
            terminated,
            truncated,
            info,
        })
    }

    /// Decode an augmented observation back into its ground component.
    pub fn decode_ground(&self, augmented: &C::AugmentedObs) -> G::Obs {
        self.codec.decode_ground(augmented)
    }

    pub fn action_space(&self) -> &G::ActionSpace {
        self.ground.action_space()
    }

    /// Synthesize experience tuples for every reachable non-terminal
    /// `(u, c)` from one real ground transition (§4.5), without touching
    /// episode state.
    pub fn generate_counterfactual_experience(
        &self,
        o: &G::Obs,
        a: &G::Action,
        o_next: &G::Obs,
    ) -> Vec<crate::counterfactual::Experience<G::Action, C::AugmentedObs>>
    where
        G::Action: Clone,
    {
        crate::counterfactual::generate_counterfactual_experience(
            o,
            a,
            o_next,
            &self.labelling,
            &self.crm,
            &self.codec,
        )
    }
}
