//! The cross-product environment (§4.4) and counterfactual experience
//! generation (§4.5) — everything that turns a ground env plus a CRM into
//! something an RL loop can drive.

pub mod codec;
pub mod counterfactual;
pub mod cross_product;
pub mod error;
pub mod ground;
pub mod trace;

pub use codec::{assert_round_trip, ObservationCodec};
pub use counterfactual::{generate_counterfactual_experience, Experience};
pub use cross_product::{CrossProduct, CrossProductError, StepOutcome};
pub use error::{EncoderError, StateError};
pub use ground::GroundEnv;
pub use trace::{NoopTracer, RecordingTracer, StepRecord, Tracer};
