//! Errors raised by the cross-product environment (§7).

use thiserror::Error;

/// The cross-product was used out of protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("step() called before reset()")]
    NotReset,

    #[error("step() called after the episode terminated or was truncated, without an intervening reset()")]
    EpisodeOver,
}

/// A user-supplied `encode`/`decode_ground` pair disagreed on a round-trip
/// check (test builds only — see [`crate::codec::assert_round_trip`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncoderError {
    #[error("decode_ground(encode(o, u, c)) did not recover o")]
    RoundTripMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_error_messages() {
        insta::assert_snapshot!(StateError::NotReset.to_string(), @"step() called before reset()");
        insta::assert_snapshot!(
            StateError::EpisodeOver.to_string(),
            @"step() called after the episode terminated or was truncated, without an intervening reset()"
        );
    }

    #[test]
    fn encoder_error_message() {
        insta::assert_snapshot!(
            EncoderError::RoundTripMismatch.to_string(),
            @"decode_ground(encode(o, u, c)) did not recover o"
        );
    }
}
