//! Rules engine trait shared by the game drivers.
//!
//! Drivers implement the few required accessors; standings, terminal
//! checks and the round-state view come for free.

use serde::{Deserialize, Serialize};

use super::outcome::leader as score_leader;
use crate::core::player::{Player, PlayerId, Roster};
use crate::core::song::Song;

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// The pool ran dry before anyone won.
    PoolExhausted,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => p == player,
            GameResult::PoolExhausted => false,
        }
    }
}

/// Lifecycle of a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    #[default]
    InProgress,
    Finished(GameResult),
}

impl RoundStatus {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, RoundStatus::Finished(_))
    }
}

/// Point-in-time view of a round, for broadcasting to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Index into the roster of the player whose turn it is.
    pub current_player: usize,
    pub mystery: Option<Song>,
    pub status: RoundStatus,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - All methods are synchronous; callers serialize mutations.
/// - `status` must only leave `InProgress` once.
pub trait RulesEngine {
    /// Players in turn order.
    fn roster(&self) -> &Roster;

    fn status(&self) -> &RoundStatus;

    /// Song the players are currently working on, if any.
    fn mystery_card(&self) -> Option<&Song>;

    /// Roster index of the player to act. In simultaneous modes this is
    /// the round's lead player.
    fn current_player_index(&self) -> usize;

    // === Convenience Methods ===

    /// `Some(result)` once the game has ended.
    fn is_terminal(&self) -> Option<GameResult> {
        match self.status() {
            RoundStatus::Finished(result) => Some(result.clone()),
            RoundStatus::InProgress => None,
        }
    }

    fn current_player(&self) -> &Player {
        &self.roster()[self.current_player_index()]
    }

    fn round_state(&self) -> RoundState {
        RoundState {
            current_player: self.current_player_index(),
            mystery: self.mystery_card().cloned(),
            status: self.status().clone(),
        }
    }

    /// Players by descending score; roster order among equals.
    fn standings(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.roster().iter().collect();
        players.sort_by(|a, b| b.score.cmp(&a.score));
        players
    }

    /// Current score leader.
    fn leader(&self) -> Option<&Player> {
        score_leader(self.roster())
    }
}
