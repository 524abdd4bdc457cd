//! Game drivers.
//!
//! Each driver wires the validator, turn sequencer, mystery pool and
//! outcome evaluator into one mode's turn loop:
//!
//! - `SprintGame`: take turns placing cards, first to N cards wins
//! - `FiendGame`: everyone guesses the year, best total after N rounds wins
//!
//! Both expose `RulesEngine` and can be snapshotted for persistence.

pub mod snapshot;
pub mod sprint;
pub mod fiend;

pub use sprint::{PlacementOutcome, SprintGame, SprintSnapshot, TurnEvent};
pub use fiend::{FiendGame, FiendSnapshot, GuessOutcome, RevealedGuess, RoundAdvance, RoundReveal};
