//! Players and the roster.
//!
//! ## PlayerId
//!
//! Opaque player identifier assigned by the host (session id, user id).
//!
//! ## Roster
//!
//! The fixed, ordered list of players in a round. Turn order is roster
//! order. Each player exclusively owns its `Timeline`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::error::{EngineError, Result};
use super::song::SongId;
use crate::timeline::Timeline;

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A participant: identity, cumulative score and timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    /// Correct placements in sprint mode, accumulated points in fiend mode.
    pub score: i64,
    pub timeline: Timeline,
}

impl Player {
    /// Create a player with score 0 and an empty timeline.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            color: String::new(),
            score: 0,
            timeline: Timeline::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Number of cards on this player's timeline.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.timeline.len()
    }
}

/// Ordered, fixed list of players.
///
/// ## Example
///
/// ```
/// use timeline_rules::core::{Player, PlayerId, Roster};
///
/// let roster = Roster::new(vec![
///     Player::new("p1", "Ada"),
///     Player::new("p2", "Grace"),
/// ]).unwrap();
///
/// assert_eq!(roster.len(), 2);
/// assert_eq!(roster.position(&PlayerId::new("p2")), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Player>", into = "Vec<Player>")]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster, rejecting an empty list or repeated ids.
    pub fn new(players: Vec<Player>) -> Result<Self> {
        if players.is_empty() {
            return Err(EngineError::EmptyRoster);
        }

        let mut seen = FxHashSet::default();
        for player in &players {
            if !seen.insert(&player.id) {
                return Err(EngineError::DuplicatePlayer(player.id.clone()));
            }
        }

        Ok(Self { players })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate players in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate player ids in turn order.
    pub fn ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.iter().map(|p| &p.id)
    }

    /// Roster index of a player.
    #[must_use]
    pub fn position(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Like `get`, but a miss is an `UnknownPlayer` error.
    pub fn require(&self, id: &PlayerId) -> Result<&Player> {
        self.get(id).ok_or_else(|| EngineError::UnknownPlayer(id.clone()))
    }

    /// Like `get_mut`, but a miss is an `UnknownPlayer` error.
    pub fn require_mut(&mut self, id: &PlayerId) -> Result<&mut Player> {
        self.get_mut(id).ok_or_else(|| EngineError::UnknownPlayer(id.clone()))
    }

    /// Ids of every song on any player's timeline.
    #[must_use]
    pub fn placed_song_ids(&self) -> FxHashSet<SongId> {
        self.players
            .iter()
            .flat_map(|p| p.timeline.song_ids())
            .collect()
    }
}

impl Index<usize> for Roster {
    type Output = Player;

    fn index(&self, index: usize) -> &Self::Output {
        &self.players[index]
    }
}

impl TryFrom<Vec<Player>> for Roster {
    type Error = EngineError;

    fn try_from(players: Vec<Player>) -> Result<Self> {
        Self::new(players)
    }
}

impl From<Roster> for Vec<Player> {
    fn from(roster: Roster) -> Self {
        roster.players
    }
}
