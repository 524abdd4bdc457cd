//! # timeline-rules
//!
//! Rules engine for a "name the year" music-timeline party game.
//!
//! ## Design Principles
//!
//! 1. **Pure and synchronous**: no I/O, no async, no global state. The host
//!    serializes calls and interleaves its own animation and networking
//!    around them.
//!
//! 2. **One rule, one place**: placement legality lives only in
//!    `PlacementValidator`, so host and client checks cannot disagree.
//!
//! 3. **Reproducible**: all randomness flows through a seeded `GameRng`
//!    whose position is part of every snapshot.
//!
//! ## Modules
//!
//! - `core`: songs, players, roster, catalog validation, config, RNG, errors
//! - `timeline`: sorted timelines and the placement validator
//! - `turns`: turn order over a fixed roster
//! - `pool`: no-repeat mystery card selection
//! - `rules`: win conditions and the `RulesEngine` trait
//! - `games`: sprint and fiend mode drivers

pub mod core;
pub mod timeline;
pub mod turns;
pub mod pool;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Catalog, EngineError, FiendConfig, GameConfig, GameRng, GameRngState, OrderingPolicy,
    Player, PlayerId, Result, Roster, Song, SongId, SprintConfig,
};

pub use crate::timeline::{IllegalPlacement, PlacementValidator, PlacementVerdict, Timeline};

pub use crate::turns::{TurnPhase, TurnSequencer};

pub use crate::pool::{MysteryPool, PoolSnapshot};

pub use crate::rules::{
    GameResult, GuessScore, Guesses, RoundOutcomeEvaluator, RoundState, RoundStatus, RulesEngine,
};

pub use crate::games::{
    FiendGame, FiendSnapshot, GuessOutcome, PlacementOutcome, RevealedGuess, RoundAdvance,
    RoundReveal, SprintGame, SprintSnapshot, TurnEvent,
};
