//! Turn order.
//!
//! The sequencer holds the turn order fixed at construction and an index
//! into it. Every player keeps a turn until the game is finished; there is
//! no elimination.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{EngineError, Result};
use crate::core::player::{PlayerId, Roster};

/// Where the current turn is in its cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The current player holds a mystery card.
    #[default]
    AwaitingPlacement,
    /// The placement was resolved; the next player is being chosen.
    Advancing,
    /// The game is over. No further advances.
    Finished,
}

/// Tracks whose turn it is.
///
/// ## Example
///
/// ```
/// use timeline_rules::core::{Player, Roster};
/// use timeline_rules::turns::TurnSequencer;
///
/// let roster = Roster::new(vec![Player::new("a", "A"), Player::new("b", "B")]).unwrap();
/// let mut turns = TurnSequencer::new(&roster);
///
/// assert_eq!(turns.current_player().unwrap().as_str(), "a");
/// assert_eq!(turns.advance().unwrap().as_str(), "b");
/// assert_eq!(turns.advance().unwrap().as_str(), "a");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSequencer {
    order: Vec<PlayerId>,
    current: usize,
    /// Starts at 1, +1 per advance.
    turn_number: u32,
    phase: TurnPhase,
}

impl TurnSequencer {
    /// Sequencer over the roster's order, first player to move.
    #[must_use]
    pub fn new(roster: &Roster) -> Self {
        Self::from_order(roster.ids().cloned().collect())
    }

    /// Sequencer over an explicit order. An empty order is accepted here;
    /// queries on it fail with `EmptyRoster`.
    #[must_use]
    pub fn from_order(order: Vec<PlayerId>) -> Self {
        Self {
            order,
            current: 0,
            turn_number: 1,
            phase: TurnPhase::AwaitingPlacement,
        }
    }

    /// Start with the player at `index` (taken modulo the order length).
    #[must_use]
    pub fn starting_at(mut self, index: usize) -> Self {
        if !self.order.is_empty() {
            self.current = index % self.order.len();
        }
        self
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.order.len()
    }

    /// Check that the order is exactly `roster`'s and the turn sits on an
    /// existing seat. Used when resuming saved state.
    pub fn check_roster(&self, roster: &Roster) -> Result<()> {
        if !self.order.iter().eq(roster.ids()) {
            return Err(EngineError::InvalidConfig(
                "turn order does not match roster".into(),
            ));
        }
        if self.current >= self.order.len() {
            return Err(EngineError::InvalidConfig(format!(
                "turn index {} out of range for {} players",
                self.current,
                self.order.len()
            )));
        }
        Ok(())
    }

    pub fn current_player(&self) -> Result<&PlayerId> {
        self.order.get(self.current).ok_or(EngineError::EmptyRoster)
    }

    /// Mark the current placement resolved.
    pub fn resolve(&mut self) {
        if self.phase == TurnPhase::AwaitingPlacement {
            self.phase = TurnPhase::Advancing;
        }
    }

    /// Enter the terminal phase.
    pub fn finish(&mut self) {
        self.phase = TurnPhase::Finished;
    }

    /// Pass the turn to the next player in order, wrapping.
    pub fn advance(&mut self) -> Result<&PlayerId> {
        if self.order.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        if self.phase == TurnPhase::Finished {
            return Err(EngineError::RoundFinished);
        }

        self.current = (self.current + 1) % self.order.len();
        self.turn_number += 1;
        self.phase = TurnPhase::AwaitingPlacement;

        let next = &self.order[self.current];
        debug!(player = %next, turn = self.turn_number, "turn advanced");
        Ok(next)
    }
}
