//! Rules: win conditions and the engine trait.
//!
//! - `RoundOutcomeEvaluator` decides wins for sprint and fiend mode
//! - `RulesEngine` is the surface both game drivers expose
//!
//! The game drivers in `games` call into these but hold all the state.

pub mod engine;
pub mod outcome;

pub use engine::{GameResult, RoundState, RoundStatus, RulesEngine};
pub use outcome::{GuessScore, Guesses, RoundOutcomeEvaluator, PENALTY_PER_YEAR};
