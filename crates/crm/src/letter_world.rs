//! End-to-end fixture exercising the whole stack against the Letter-World
//! CRM: `Σ = {A, B, C}`, arity 1, counting how many `A`s have been seen
//! since the last `B` and paying off when that many `C`s follow.
//!
//! State 0: `A` increments the counter and loops; `B` moves to state 1
//! without touching the counter; anything else loops. State 1: `C` decrements
//! the counter while it's non-zero and loops; `C` while the counter is
//! already zero pays `+1.0` and moves to the terminal sink; anything else
//! loops. Every other edge pays `-0.1`.

use crm_automaton::{CrmBuilder, Detector, LabellingFunction};
use crm_core::{Alphabet, CounterTuple, State};
use crm_env::{CrossProduct, ObservationCodec};

/// One position on the tape: the symbol that just occurred, or `None` for
/// "no event fired this step".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick(pub Option<char>);

/// A ground environment that does nothing but play back a fixed tape of
/// symbols, one per step, ignoring the action entirely.
pub struct LetterTape {
    tape: Vec<Option<char>>,
    pos: usize,
}

impl LetterTape {
    pub fn new(tape: Vec<Option<char>>) -> Self {
        Self { tape, pos: 0 }
    }
}

impl crm_env::GroundEnv for LetterTape {
    type Obs = Tick;
    type Action = ();
    type Info = ();
    type ActionSpace = ();

    fn reset(&mut self, _seed: Option<u64>) -> (Tick, ()) {
        self.pos = 0;
        (Tick(None), ())
    }

    fn step(&mut self, _action: &()) -> (Tick, f64, bool, bool, ()) {
        let symbol = self.tape[self.pos];
        self.pos += 1;
        (Tick(symbol), 0.0, false, false, ())
    }

    fn action_space(&self) -> &() {
        &()
    }
}

struct PassthroughCodec;

impl ObservationCodec for PassthroughCodec {
    type GroundObs = Tick;
    type AugmentedObs = (Tick, State, CounterTuple);

    fn encode(&self, o: &Tick, u: State, c: &CounterTuple) -> (Tick, State, CounterTuple) {
        (*o, u, c.clone())
    }

    fn decode_ground(&self, augmented: &(Tick, State, CounterTuple)) -> Tick {
        augmented.0
    }
}

fn build_crm(reachable: Vec<(State, CounterTuple)>) -> crm_automaton::Crm<Tick, ()> {
    let alphabet = Alphabet::new(["A", "B", "C"]).unwrap();
    CrmBuilder::new(alphabet, 1, 0, CounterTuple::zero(1))
        .terminal_states([-1])
        .transition(0, "A", 0, vec![1], -0.1)
        .transition(0, "B", 1, vec![0], -0.1)
        .transition(0, "", 0, vec![0], -0.1)
        .transition(1, "C / (NZ)", 1, vec![-1], -0.1)
        .transition(1, "C / (Z)", -1, vec![0], 1.0)
        .transition(1, "", 1, vec![0], -0.1)
        .reachable(reachable)
        .build()
        .unwrap()
}

fn labelling() -> LabellingFunction<Tick, ()> {
    let alphabet = Alphabet::new(["A", "B", "C"]).unwrap();
    let a = alphabet.event("A").unwrap();
    let b = alphabet.event("B").unwrap();
    let c = alphabet.event("C").unwrap();
    LabellingFunction::new(vec![(
        "letter",
        Box::new(move |_o: &Tick, _a: &(), o_next: &Tick| match o_next.0 {
            Some('A') => Some(a),
            Some('B') => Some(b),
            Some('C') => Some(c),
            _ => None,
        }) as Detector<Tick, ()>,
    )])
}

fn tape_of(symbols: &str) -> LetterTape {
    let tape = symbols
        .chars()
        .map(|c| if c == '.' { None } else { Some(c) })
        .collect();
    LetterTape::new(tape)
}

fn full_reachable_set() -> Vec<(State, CounterTuple)> {
    (0..=10)
        .flat_map(|n| {
            [
                (0, CounterTuple::new(vec![n])),
                (1, CounterTuple::new(vec![n])),
            ]
        })
        .collect()
}

fn run_trajectory(tape: &str, crm: crm_automaton::Crm<Tick, ()>, max_steps: u64) -> String {
    let mut env = CrossProduct::new(tape_of(tape), labelling(), crm, PassthroughCodec, max_steps);
    let mut out = String::new();
    env.reset(None);
    for symbol in tape.chars() {
        let step = env.step(&()).unwrap();
        out.push_str(&format!(
            "{symbol} -> state {}, counter {:?}, reward {}, terminated {}\n",
            step.obs.1,
            step.obs.2.values(),
            step.reward,
            step.terminated
        ));
    }
    out
}

#[test]
fn s1_trajectory_snapshot() {
    let crm = build_crm(full_reachable_set());
    insta::assert_snapshot!(run_trajectory(".AABCC", crm, 100), @r"
    . -> state 0, counter [0], reward -0.1, terminated false
    A -> state 0, counter [1], reward -0.1, terminated false
    A -> state 0, counter [2], reward -0.1, terminated false
    B -> state 1, counter [2], reward -0.1, terminated false
    C -> state 1, counter [1], reward -0.1, terminated false
    C -> state 1, counter [0], reward -0.1, terminated false
    ");
}

#[test]
fn s1_tracks_counter_and_reward_through_mixed_events() {
    let crm = build_crm(full_reachable_set());
    let tape = tape_of(".AABCC");
    let mut env = CrossProduct::new(tape, labelling(), crm, PassthroughCodec, 100);
    let (obs0, _) = env.reset(None);
    assert_eq!((obs0.1, obs0.2.values().to_vec()), (0, vec![0]));

    let expected = [
        ((0, vec![0]), -0.1),
        ((0, vec![1]), -0.1),
        ((0, vec![2]), -0.1),
        ((1, vec![2]), -0.1),
        ((1, vec![1]), -0.1),
        ((1, vec![0]), -0.1),
    ];
    for (i, (state, reward)) in expected.iter().enumerate() {
        let out = env.step(&()).unwrap_or_else(|e| panic!("step {i}: {e}"));
        assert_eq!(
            (out.obs.1, out.obs.2.values().to_vec()),
            *state,
            "step {i}"
        );
        assert_eq!(out.reward, *reward, "step {i}");
    }
}

#[test]
fn s2_reaches_terminal_in_two_steps_from_zero_count() {
    let crm = build_crm(full_reachable_set());
    let tape = tape_of("BC");
    let mut env = CrossProduct::new(tape, labelling(), crm, PassthroughCodec, 100);
    env.reset(None);

    let out1 = env.step(&()).unwrap();
    assert_eq!((out1.obs.1, out1.obs.2.values().to_vec()), (1, vec![0]));
    assert_eq!(out1.reward, -0.1);
    assert!(!out1.terminated);

    let out2 = env.step(&()).unwrap();
    assert_eq!((out2.obs.1, out2.obs.2.values().to_vec()), (-1, vec![0]));
    assert_eq!(out2.reward, 1.0);
    assert!(out2.terminated);
}

#[test]
fn s3_single_a_then_b_then_two_cs() {
    let crm = build_crm(full_reachable_set());
    let tape = tape_of("ABCC");
    let mut env = CrossProduct::new(tape, labelling(), crm, PassthroughCodec, 100);
    env.reset(None);

    let expected = [
        ((0, vec![1]), -0.1, false),
        ((1, vec![1]), -0.1, false),
        ((1, vec![0]), -0.1, false),
        ((-1, vec![0]), 1.0, true),
    ];
    for (i, (state, reward, terminated)) in expected.iter().enumerate() {
        let out = env.step(&()).unwrap_or_else(|e| panic!("step {i}: {e}"));
        assert_eq!(
            (out.obs.1, out.obs.2.values().to_vec()),
            *state,
            "step {i}"
        );
        assert_eq!(out.reward, *reward, "step {i}");
        assert_eq!(out.terminated, *terminated, "step {i}");
    }
}

#[test]
fn s4_truncates_after_max_steps_without_any_events() {
    let crm = build_crm(full_reachable_set());
    let tape = LetterTape::new(vec![None; 200]);
    let mut env = CrossProduct::new(tape, labelling(), crm, PassthroughCodec, 200);
    env.reset(None);

    let mut last = None;
    for _ in 0..200 {
        let out = env.step(&()).unwrap();
        assert_eq!(out.obs.1, 0);
        assert_eq!(out.obs.2.values(), &[0]);
        assert_eq!(out.reward, -0.1);
        last = Some(out);
    }
    let last = last.unwrap();
    assert!(!last.terminated);
    assert!(last.truncated);
}

#[test]
fn s5_counterfactual_replays_one_event_set_against_every_reachable_config() {
    let crm = build_crm(vec![
        (0, CounterTuple::zero(1)),
        (0, CounterTuple::new(vec![1])),
        (1, CounterTuple::zero(1)),
        (1, CounterTuple::new(vec![2])),
    ]);
    let lf = labelling();
    let codec = PassthroughCodec;

    let o = Tick(None);
    let o_next = Tick(Some('A'));
    let experiences =
        crm_env::generate_counterfactual_experience(&o, &(), &o_next, &lf, &crm, &codec);

    assert_eq!(experiences.len(), 4);

    let find = |u: State, c: i64| {
        experiences
            .iter()
            .find(|e| e.obs.1 == u && e.obs.2.values() == [c])
            .unwrap_or_else(|| panic!("no experience starting at ({u}, {c})"))
    };

    let from_0_0 = find(0, 0);
    assert_eq!((from_0_0.next_obs.1, from_0_0.next_obs.2.values()[0]), (0, 1));
    assert_eq!(from_0_0.reward, -0.1);

    let from_0_1 = find(0, 1);
    assert_eq!((from_0_1.next_obs.1, from_0_1.next_obs.2.values()[0]), (0, 2));

    let from_1_0 = find(1, 0);
    assert_eq!((from_1_0.next_obs.1, from_1_0.next_obs.2.values()[0]), (1, 0));
    assert_eq!(from_1_0.reward, -0.1);

    let from_1_2 = find(1, 2);
    assert_eq!((from_1_2.next_obs.1, from_1_2.next_obs.2.values()[0]), (1, 2));
}
