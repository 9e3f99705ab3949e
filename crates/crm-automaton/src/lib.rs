//! The labelling function and the CRM automaton itself (§4.1, §4.3).
//!
//! - [`labelling::LabellingFunction`]: a fixed bank of event detectors run
//!   over a ground transition.
//! - [`crm::Crm`]: the automaton — immutable once built, validated eagerly
//!   by [`builder::CrmBuilder`] (or the lower-level [`crm::Crm::try_new`]),
//!   executing one step at a time via [`crm::Crm::step`].
//! - [`spec::CrmSpec`]: a serializable declarative CRM definition, for
//!   authoring a CRM as data and combining it with reward emitters supplied
//!   from code.

pub mod builder;
pub mod crm;
pub mod error;
pub mod labelling;
pub mod spec;

pub use builder::CrmBuilder;
pub use crm::{Crm, TransitionEdge};
pub use error::{ConstructionError, TerminalStep};
pub use labelling::{Detector, LabellingFunction};
pub use spec::{CrmSpec, TransitionSpec};
