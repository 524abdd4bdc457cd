//! Core engine types: songs, players, configuration, RNG, errors.
//!
//! Everything else in the crate builds on these. None of them know about
//! turn order or scoring rules.

pub mod error;
pub mod song;
pub mod player;
pub mod catalog;
pub mod rng;
pub mod config;

pub use error::{EngineError, Result};
pub use song::{Song, SongId};
pub use player::{Player, PlayerId, Roster};
pub use catalog::Catalog;
pub use rng::{GameRng, GameRngState};
pub use config::{FiendConfig, GameConfig, OrderingPolicy, SprintConfig};
