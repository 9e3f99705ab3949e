//! The ground-environment contract (§6) — the only thing the cross-product
//! consumes from the base MDP.

/// A ground (base) environment: `reset`/`step`, as any RL library provides.
///
/// The cross-product discards `GroundEnv::step`'s own reward and
/// terminated/truncated flags — the CRM is the sole source of reward and
/// of episode-ending signals (§4.4 step 2). Randomness, if any, lives only
/// here (§5 "Determinism").
pub trait GroundEnv {
    type Obs;
    type Action;
    type Info;
    /// Opaque action-space descriptor, passed through unchanged by the
    /// cross-product (§4.4 "Observation/action spaces").
    type ActionSpace;

    /// Reset the ground environment, returning its initial observation.
    fn reset(&mut self, seed: Option<u64>) -> (Self::Obs, Self::Info);

    /// Step the ground environment. The returned reward and
    /// terminated/truncated flags are ignored by the cross-product.
    fn step(&mut self, action: &Self::Action) -> (Self::Obs, f64, bool, bool, Self::Info);

    fn action_space(&self) -> &Self::ActionSpace;
}
