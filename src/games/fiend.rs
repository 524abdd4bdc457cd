//! Fiend mode driver.
//!
//! Everyone hears the same mystery song and guesses its year. Points are
//! scored per guess; once every player has guessed, the host reveals the
//! round and moves on. After the configured number of rounds the highest
//! total wins.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::snapshot;
use crate::core::{Catalog, EngineError, FiendConfig, GameRng, PlayerId, Result, Roster, Song};
use crate::pool::{MysteryPool, PoolSnapshot};
use crate::rules::{GameResult, GuessScore, Guesses, RoundOutcomeEvaluator, RoundStatus, RulesEngine};
use crate::turns::TurnSequencer;

/// Result of one `submit_guess` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub score: GuessScore,
    /// Every player has now guessed.
    pub round_complete: bool,
}

/// One player's line in a round reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedGuess {
    pub player: PlayerId,
    pub guessed_year: i32,
    pub score: GuessScore,
}

/// Everything the host shows when a round ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReveal {
    pub round: u32,
    pub song: Song,
    pub actual_year: i32,
    /// In roster order.
    pub guesses: Vec<RevealedGuess>,
}

/// What `next_round` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundAdvance {
    /// A new round started with a fresh mystery card.
    NextRound { reveal: RoundReveal, round: u32 },
    /// The final round ended.
    GameOver { reveal: RoundReveal, winner: PlayerId },
    /// No songs left for another round.
    PoolExhausted { reveal: RoundReveal },
}

/// Fiend game in progress.
#[derive(Clone, Debug)]
pub struct FiendGame {
    config: FiendConfig,
    evaluator: RoundOutcomeEvaluator,
    roster: Roster,
    /// Rotates the round lead; every player still guesses every round.
    turns: TurnSequencer,
    pool: MysteryPool,
    round: u32,
    mystery: Option<Song>,
    guesses: Guesses,
    status: RoundStatus,
}

impl FiendGame {
    /// Set up a game and draw the first round's song.
    pub fn new(config: FiendConfig, roster: Roster, catalog: Catalog, seed: u64) -> Result<Self> {
        config.validate()?;
        let pool = MysteryPool::initialize(catalog.into_songs(), GameRng::new(seed))?;
        let turns = TurnSequencer::new(&roster);

        let mut game = Self {
            config,
            evaluator: RoundOutcomeEvaluator::default(),
            roster,
            turns,
            pool,
            round: 1,
            mystery: None,
            guesses: Guesses::default(),
            status: RoundStatus::InProgress,
        };
        game.draw_mystery();

        info!(
            players = game.roster.len(),
            rounds = game.config.total_rounds,
            "fiend game started"
        );
        Ok(game)
    }

    fn draw_mystery(&mut self) -> bool {
        let mut exclude = FxHashSet::default();
        if let Some(current) = &self.mystery {
            exclude.insert(current.id.clone());
        }
        self.mystery = self.pool.next_mystery_card(&exclude);
        if self.mystery.is_none() {
            self.finish(GameResult::PoolExhausted);
        }
        self.mystery.is_some()
    }

    fn finish(&mut self, result: GameResult) {
        info!(result = ?result, round = self.round, "fiend game finished");
        self.mystery = None;
        self.turns.finish();
        self.status = RoundStatus::Finished(result);
    }

    #[must_use]
    pub fn config(&self) -> &FiendConfig {
        &self.config
    }

    /// Current round, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn guesses(&self) -> &Guesses {
        &self.guesses
    }

    /// Players who have not guessed this round, in roster order.
    #[must_use]
    pub fn waiting_on(&self) -> Vec<&PlayerId> {
        self.roster
            .ids()
            .filter(|id| !self.guesses.contains_key(*id))
            .collect()
    }

    /// Submit `player`'s guess for the current song.
    ///
    /// Points are credited immediately. A second guess in the same round
    /// is rejected with `AlreadyGuessed`.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn submit_guess(&mut self, player: &PlayerId, guessed_year: i32) -> Result<GuessOutcome> {
        if self.status.is_finished() {
            return Err(EngineError::RoundFinished);
        }
        let song = self.mystery.as_ref().ok_or(EngineError::NoMysteryCard)?;
        self.roster.require(player)?;
        if self.guesses.contains_key(player) {
            return Err(EngineError::AlreadyGuessed(player.clone()));
        }

        let actual_year = song.year()?;
        let score = self
            .evaluator
            .record_guess(&mut self.roster, player, guessed_year, actual_year)?;
        self.guesses.insert(player.clone(), guessed_year);

        Ok(GuessOutcome {
            score,
            round_complete: self.evaluator.is_round_complete(&self.roster, &self.guesses),
        })
    }

    /// Results of the current round. Fails with `RoundIncomplete` until
    /// every player has guessed.
    pub fn reveal(&self) -> Result<RoundReveal> {
        let song = self.mystery.as_ref().ok_or(EngineError::NoMysteryCard)?;
        if !self.evaluator.is_round_complete(&self.roster, &self.guesses) {
            return Err(EngineError::RoundIncomplete {
                missing: self.waiting_on().len(),
            });
        }

        let actual_year = song.year()?;
        let guesses = self
            .roster
            .ids()
            .filter_map(|id| {
                self.guesses.get(id).map(|&guessed_year| RevealedGuess {
                    player: id.clone(),
                    guessed_year,
                    score: GuessScore::of(guessed_year, actual_year),
                })
            })
            .collect();

        Ok(RoundReveal {
            round: self.round,
            song: song.clone(),
            actual_year,
            guesses,
        })
    }

    /// Close the current round and start the next one, or end the game.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn next_round(&mut self) -> Result<RoundAdvance> {
        if self.status.is_finished() {
            return Err(EngineError::RoundFinished);
        }
        let reveal = self.reveal()?;

        if let Some(winner) =
            self.evaluator
                .check_game_winner(&self.roster, self.round, self.config.total_rounds)
        {
            let winner = winner.id.clone();
            self.finish(GameResult::Winner(winner.clone()));
            return Ok(RoundAdvance::GameOver { reveal, winner });
        }

        self.round += 1;
        self.guesses.clear();
        self.turns.advance()?;

        if self.draw_mystery() {
            info!(round = self.round, "fiend round started");
            Ok(RoundAdvance::NextRound {
                reveal,
                round: self.round,
            })
        } else {
            Ok(RoundAdvance::PoolExhausted { reveal })
        }
    }

    /// Capture the full game state.
    #[must_use]
    pub fn snapshot(&self) -> FiendSnapshot {
        let mut guesses: Vec<(PlayerId, i32)> =
            self.guesses.iter().map(|(id, &year)| (id.clone(), year)).collect();
        guesses.sort();

        FiendSnapshot {
            config: self.config.clone(),
            roster: self.roster.clone(),
            turns: self.turns.clone(),
            pool: self.pool.snapshot(),
            round: self.round,
            mystery: self.mystery.clone(),
            guesses,
            status: self.status.clone(),
        }
    }

    /// Resume a game captured with `snapshot`.
    pub fn from_snapshot(snapshot: FiendSnapshot) -> Result<Self> {
        snapshot.config.validate()?;
        snapshot.turns.check_roster(&snapshot.roster)?;
        for (id, _) in &snapshot.guesses {
            snapshot.roster.require(id)?;
        }

        Ok(Self {
            config: snapshot.config,
            evaluator: RoundOutcomeEvaluator::default(),
            roster: snapshot.roster,
            turns: snapshot.turns,
            pool: MysteryPool::from_snapshot(snapshot.pool),
            round: snapshot.round,
            mystery: snapshot.mystery,
            guesses: snapshot.guesses.into_iter().collect(),
            status: snapshot.status,
        })
    }
}

impl RulesEngine for FiendGame {
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

/// Serializable fiend game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiendSnapshot {
    pub config: FiendConfig,
    pub roster: Roster,
    pub turns: TurnSequencer,
    pub pool: PoolSnapshot,
    pub round: u32,
    pub mystery: Option<Song>,
    /// Sorted by player id.
    pub guesses: Vec<(PlayerId, i32)>,
    pub status: RoundStatus,
}

impl FiendSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>> {
        snapshot::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        snapshot::decode(bytes)
    }
}
