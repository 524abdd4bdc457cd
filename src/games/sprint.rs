//! Sprint (classic) mode driver.
//!
//! Players take turns placing the mystery card on their own timeline. A
//! correct placement keeps the card and scores a point; a wrong one
//! discards it. First to the target card count wins.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::snapshot;
use crate::core::{
    Catalog, EngineError, GameRng, PlayerId, Result, Roster, Song, SprintConfig,
};
use crate::pool::{MysteryPool, PoolSnapshot};
use crate::rules::{GameResult, RoundOutcomeEvaluator, RoundStatus, RulesEngine};
use crate::timeline::{PlacementValidator, PlacementVerdict, Timeline};
use crate::turns::TurnSequencer;

/// What happens after a placement is resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The turn passed on and a new mystery card is pending.
    NextTurn { player: PlayerId, turn_number: u32 },
    /// The placing player reached the target.
    Won(PlayerId),
    /// No songs left to draw; the game ended without a winner.
    PoolExhausted,
}

/// Full result of one `place` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub player: PlayerId,
    /// The mystery card, now revealed.
    pub song: Song,
    pub verdict: PlacementVerdict,
    pub event: TurnEvent,
}

/// Sprint game in progress.
///
/// ## Example
///
/// ```
/// use timeline_rules::core::{Catalog, Player, Roster, Song, SprintConfig};
/// use timeline_rules::games::SprintGame;
/// use timeline_rules::rules::RulesEngine;
///
/// let songs = (0..20)
///     .map(|i| Song::new(format!("s{i}"), "title", "artist", format!("{}", 1960 + i * 3)))
///     .collect();
/// let roster = Roster::new(vec![Player::new("a", "Ada"), Player::new("b", "Bo")]).unwrap();
///
/// let mut game = SprintGame::new(
///     SprintConfig::new().with_target_card_count(3),
///     roster,
///     Catalog::new(songs, 10).unwrap(),
///     42,
/// ).unwrap();
///
/// // Place at the first legal slot for whoever holds the turn.
/// let slot = game.check(0).unwrap().valid_positions.start;
/// let outcome = game.place(slot).unwrap();
/// assert!(outcome.verdict.legal);
/// assert_eq!(game.roster()[0].card_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct SprintGame {
    config: SprintConfig,
    validator: PlacementValidator,
    evaluator: RoundOutcomeEvaluator,
    roster: Roster,
    turns: TurnSequencer,
    pool: MysteryPool,
    mystery: Option<Song>,
    status: RoundStatus,
}

impl SprintGame {
    /// Set up a game: deal starting cards (if configured) and draw the first
    /// mystery card. The RNG is seeded with `seed`.
    pub fn new(config: SprintConfig, roster: Roster, catalog: Catalog, seed: u64) -> Result<Self> {
        config.validate()?;
        let pool = MysteryPool::initialize(catalog.into_songs(), GameRng::new(seed))?;
        let turns = TurnSequencer::new(&roster);

        let mut game = Self {
            validator: PlacementValidator::with_ordering(config.ordering),
            evaluator: RoundOutcomeEvaluator::new(config.target_card_count),
            config,
            roster,
            turns,
            pool,
            mystery: None,
            status: RoundStatus::InProgress,
        };

        if game.config.deal_starting_card {
            game.deal_starting_cards();
        }
        if !game.status.is_finished() {
            game.draw_mystery();
        }

        info!(
            players = game.roster.len(),
            target = game.config.target_card_count,
            "sprint game started"
        );
        Ok(game)
    }

    fn deal_starting_cards(&mut self) {
        let ids: Vec<PlayerId> = self.roster.ids().cloned().collect();
        for id in ids {
            let Some(song) = self.pool.next_mystery_card(&self.roster.placed_song_ids()) else {
                self.finish(GameResult::PoolExhausted);
                return;
            };
            if let Some(player) = self.roster.get_mut(&id) {
                debug!(player = %id, song = %song.id, "starting card dealt");
                player.timeline = Timeline::with_starting_card(song);
            }
        }

        if let Some(winner) = self.evaluator.check_placement_win(&self.roster) {
            let id = winner.id.clone();
            self.finish(GameResult::Winner(id));
        }
    }

    /// Draw the next mystery card, finishing the game if none is left.
    fn draw_mystery(&mut self) -> bool {
        let exclude = self.roster.placed_song_ids();
        self.mystery = self.pool.next_mystery_card(&exclude);
        if self.mystery.is_none() {
            self.finish(GameResult::PoolExhausted);
        }
        self.mystery.is_some()
    }

    fn finish(&mut self, result: GameResult) {
        info!(result = ?result, turn = self.turns.turn_number(), "sprint game finished");
        self.mystery = None;
        self.turns.finish();
        self.status = RoundStatus::Finished(result);
    }

    #[must_use]
    pub fn config(&self) -> &SprintConfig {
        &self.config
    }

    #[must_use]
    pub fn validator(&self) -> &PlacementValidator {
        &self.validator
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turns.turn_number()
    }

    pub fn timeline(&self, player: &PlayerId) -> Result<&Timeline> {
        Ok(&self.roster.require(player)?.timeline)
    }

    /// Validate a placement of the pending card for the current player
    /// without applying it. Lets a client check a drag position before
    /// submitting.
    pub fn check(&self, target_index: usize) -> Result<PlacementVerdict> {
        if self.status.is_finished() {
            return Err(EngineError::RoundFinished);
        }
        let song = self.mystery.as_ref().ok_or(EngineError::NoMysteryCard)?;
        let player = self.roster.require(self.turns.current_player()?)?;
        self.validator.validate(&player.timeline, song, target_index)
    }

    /// Place the pending mystery card at `target_index` of the current
    /// player's timeline and move the game on.
    ///
    /// `InvalidIndex` / `InvalidYear` leave the game untouched so the
    /// player can retry.
    #[instrument(skip(self), fields(turn = self.turns.turn_number()))]
    pub fn place(&mut self, target_index: usize) -> Result<PlacementOutcome> {
        if self.status.is_finished() {
            return Err(EngineError::RoundFinished);
        }
        let song = self.mystery.clone().ok_or(EngineError::NoMysteryCard)?;
        let player_id = self.turns.current_player()?.clone();

        let player = self.roster.require_mut(&player_id)?;
        let verdict = player
            .timeline
            .place(&self.validator, song.clone(), target_index)?;
        if verdict.legal {
            player.score += 1;
        }
        debug!(
            player = %player_id,
            song = %song.id,
            legal = verdict.legal,
            cards = player.timeline.len(),
            "placement resolved"
        );

        self.mystery = None;
        self.turns.resolve();

        let event = if let Some(winner) = self.evaluator.check_placement_win(&self.roster) {
            let id = winner.id.clone();
            self.finish(GameResult::Winner(id.clone()));
            TurnEvent::Won(id)
        } else {
            let next = self.turns.advance()?.clone();
            if self.draw_mystery() {
                TurnEvent::NextTurn {
                    player: next,
                    turn_number: self.turns.turn_number(),
                }
            } else {
                TurnEvent::PoolExhausted
            }
        };

        Ok(PlacementOutcome {
            player: player_id,
            song,
            verdict,
            event,
        })
    }

    /// Capture the full game state.
    #[must_use]
    pub fn snapshot(&self) -> SprintSnapshot {
        SprintSnapshot {
            config: self.config.clone(),
            roster: self.roster.clone(),
            turns: self.turns.clone(),
            pool: self.pool.snapshot(),
            mystery: self.mystery.clone(),
            status: self.status.clone(),
        }
    }

    /// Resume a game captured with `snapshot`.
    pub fn from_snapshot(snapshot: SprintSnapshot) -> Result<Self> {
        snapshot.config.validate()?;
        snapshot.turns.check_roster(&snapshot.roster)?;

        Ok(Self {
            validator: PlacementValidator::with_ordering(snapshot.config.ordering),
            evaluator: RoundOutcomeEvaluator::new(snapshot.config.target_card_count),
            config: snapshot.config,
            roster: snapshot.roster,
            turns: snapshot.turns,
            pool: MysteryPool::from_snapshot(snapshot.pool),
            mystery: snapshot.mystery,
            status: snapshot.status,
        })
    }
}

impl RulesEngine for SprintGame {
    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn status(&self) -> &RoundStatus {
        &self.status
    }

    fn mystery_card(&self) -> Option<&Song> {
        self.mystery.as_ref()
    }

    fn current_player_index(&self) -> usize {
        self.turns.current_index()
    }
}

/// Serializable sprint game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintSnapshot {
    pub config: SprintConfig,
    pub roster: Roster,
    pub turns: TurnSequencer,
    pub pool: PoolSnapshot,
    pub mystery: Option<Song>,
    pub status: RoundStatus,
}

impl SprintSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>> {
        snapshot::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        snapshot::decode(bytes)
    }
}
