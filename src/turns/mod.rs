//! Turn sequencing over a fixed roster.

pub mod sequencer;

pub use sequencer::{TurnPhase, TurnSequencer};
