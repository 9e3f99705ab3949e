//! Augmenting a ground observation with automaton state and counters
//! (§4.4 "Augmented observation").

use crm_core::{CounterTuple, State};

use crate::error::EncoderError;

/// Encodes `(o, u, c)` into whatever shape the cross-product exposes to its
/// caller, and decodes a ground observation back out of it.
///
/// `encode` and `decode_ground` must be mutually inverse on the `(o, u, c)`
/// domain actually produced at runtime (§8 property 3): for any
/// `x = encode(o, u, c)`, `decode_ground(x) == o`. The cross-product never
/// checks this on every call — that would defeat the point of a cheap
/// encoding — but [`ObservationCodec::assert_round_trip`] is available for
/// test builds to catch a broken codec early (§7 `EncoderError`).
pub trait ObservationCodec {
    type GroundObs;
    type AugmentedObs;

    fn encode(&self, o: &Self::GroundObs, u: State, c: &CounterTuple) -> Self::AugmentedObs;

    fn decode_ground(&self, augmented: &Self::AugmentedObs) -> Self::GroundObs;
}

/// Round-trip check for test builds: `decode_ground(encode(o, u, c)) == o`.
pub fn assert_round_trip<C>(
    codec: &C,
    o: &C::GroundObs,
    u: State,
    c: &CounterTuple,
) -> Result<(), EncoderError>
where
    C: ObservationCodec,
    C::GroundObs: PartialEq + Clone,
{
    let augmented = codec.encode(o, u, c);
    let decoded = codec.decode_ground(&augmented);
    if &decoded == o {
        Ok(())
    } else {
        Err(EncoderError::RoundTripMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PairCodec;

    impl ObservationCodec for PairCodec {
        type GroundObs = i32;
        type AugmentedObs = (i32, State, CounterTuple);

        fn encode(&self, o: &i32, u: State, c: &CounterTuple) -> (i32, State, CounterTuple) {
            (*o, u, c.clone())
        }

        fn decode_ground(&self, augmented: &(i32, State, CounterTuple)) -> i32 {
            augmented.0
        }
    }

    #[test]
    fn round_trip_holds_for_a_faithful_codec() {
        let codec = PairCodec;
        let c = CounterTuple::zero(1);
        assert!(assert_round_trip(&codec, &5, 0, &c).is_ok());
    }

    struct BrokenCodec;

    impl ObservationCodec for BrokenCodec {
        type GroundObs = i32;
        type AugmentedObs = (i32, State, CounterTuple);

        fn encode(&self, o: &i32, u: State, c: &CounterTuple) -> (i32, State, CounterTuple) {
            (*o, u, c.clone())
        }

        fn decode_ground(&self, _augmented: &(i32, State, CounterTuple)) -> i32 {
            -1
        }
    }

    #[test]
    fn round_trip_catches_a_broken_codec() {
        let codec = BrokenCodec;
        let c = CounterTuple::zero(1);
        assert!(assert_round_trip(&codec, &5, 0, &c).is_err());
    }
}
