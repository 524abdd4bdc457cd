//! Game configuration types.
//!
//! Hosts configure a session at startup by providing:
//! - `SprintConfig`: card target and placement ordering rule for sprint mode
//! - `FiendConfig`: round count for fiend mode
//! - `GameConfig`: which mode to run
//!
//! All configs deserialize with defaults for missing fields, so a host can
//! keep them in whatever serde format it already uses.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// How equal years are treated when validating a placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Equal years on either side are legal (`<=` / `>=`).
    #[default]
    AllowTies,
    /// Neighbours must be strictly earlier / later (`<` / `>`).
    Strict,
}

/// Sprint (classic) mode: first to `target_card_count` timeline cards wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintConfig {
    /// Timeline length that wins the game. The starting card counts.
    pub target_card_count: usize,

    /// Deal one starting card to every player before the first turn.
    pub deal_starting_card: bool,

    /// Tie rule for placements.
    pub ordering: OrderingPolicy,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            target_card_count: 10,
            deal_starting_card: true,
            ordering: OrderingPolicy::AllowTies,
        }
    }
}

impl SprintConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_target_card_count(mut self, count: usize) -> Self {
        self.target_card_count = count;
        self
    }

    #[must_use]
    pub fn with_starting_card(mut self, deal: bool) -> Self {
        self.deal_starting_card = deal;
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_card_count == 0 {
            return Err(EngineError::InvalidConfig(
                "target_card_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Fiend mode: every player guesses the year, highest total after
/// `total_rounds` wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiendConfig {
    pub total_rounds: u32,
}

impl Default for FiendConfig {
    fn default() -> Self {
        Self { total_rounds: 10 }
    }
}

impl FiendConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_total_rounds(mut self, rounds: u32) -> Self {
        self.total_rounds = rounds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_rounds == 0 {
            return Err(EngineError::InvalidConfig(
                "total_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GameConfig {
    Sprint(SprintConfig),
    Fiend(FiendConfig),
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::Sprint(SprintConfig::default())
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        match self {
            GameConfig::Sprint(c) => c.validate(),
            GameConfig::Fiend(c) => c.validate(),
        }
    }
}
