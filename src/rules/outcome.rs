//! Win conditions for both game modes.
//!
//! ## Sprint (classic)
//!
//! First player whose timeline reaches the target card count wins. When
//! several qualify at once, roster order breaks the tie.
//!
//! ## Fiend
//!
//! Every player guesses the mystery song's year. A guess scores
//! `max(0, 100 - 2 * |guess - actual|)` points. After the last round the
//! highest total wins, roster order breaking ties.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::Result;
use crate::core::player::{Player, PlayerId, Roster};

/// Points per year of error in fiend mode.
pub const PENALTY_PER_YEAR: u64 = 2;

/// Guesses submitted in the current fiend round.
pub type Guesses = FxHashMap<PlayerId, i32>;

/// Score of one fiend-mode guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessScore {
    /// 0..=100.
    pub accuracy: u32,
    pub points: u32,
}

impl GuessScore {
    /// Score `guessed` against `actual`.
    ///
    /// ```
    /// use timeline_rules::rules::GuessScore;
    ///
    /// assert_eq!(GuessScore::of(1973, 1975).points, 96);
    /// assert_eq!(GuessScore::of(1900, 1975).points, 0);
    /// ```
    #[must_use]
    pub fn of(guessed: i32, actual: i32) -> Self {
        let off = (i64::from(guessed) - i64::from(actual)).unsigned_abs();
        let accuracy = 100u64.saturating_sub(PENALTY_PER_YEAR.saturating_mul(off)) as u32;
        Self {
            accuracy,
            points: accuracy,
        }
    }
}

/// Evaluates win conditions. Holds no per-game state besides the sprint
/// target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcomeEvaluator {
    target_card_count: usize,
}

impl Default for RoundOutcomeEvaluator {
    fn default() -> Self {
        Self::new(10)
    }
}

impl RoundOutcomeEvaluator {
    #[must_use]
    pub fn new(target_card_count: usize) -> Self {
        Self { target_card_count }
    }

    #[must_use]
    pub fn target_card_count(&self) -> usize {
        self.target_card_count
    }

    /// First player in roster order with at least the target card count.
    #[must_use]
    pub fn check_placement_win<'a>(&self, roster: &'a Roster) -> Option<&'a Player> {
        roster
            .iter()
            .find(|p| p.card_count() >= self.target_card_count)
    }

    /// Score a fiend guess and credit it to the player's running score.
    ///
    /// Fails with `UnknownPlayer` when `player` is not on the roster.
    pub fn record_guess(
        &self,
        roster: &mut Roster,
        player: &PlayerId,
        guessed_year: i32,
        actual_year: i32,
    ) -> Result<GuessScore> {
        let entry = roster.require_mut(player)?;
        let score = GuessScore::of(guessed_year, actual_year);
        entry.score += i64::from(score.points);

        debug!(
            player = %player,
            guessed_year,
            actual_year,
            points = score.points,
            total = entry.score,
            "guess recorded"
        );
        Ok(score)
    }

    /// Has every roster player guessed this round?
    #[must_use]
    pub fn is_round_complete(&self, roster: &Roster, guesses: &Guesses) -> bool {
        roster.ids().all(|id| guesses.contains_key(id))
    }

    /// Fiend winner once `current_round` reaches `total_rounds`: highest
    /// score, earliest in roster order on a tie. `None` before that.
    #[must_use]
    pub fn check_game_winner<'a>(
        &self,
        roster: &'a Roster,
        current_round: u32,
        total_rounds: u32,
    ) -> Option<&'a Player> {
        if current_round < total_rounds {
            return None;
        }
        leader(roster)
    }
}

/// Highest score, earliest in roster order on a tie.
pub(crate) fn leader(roster: &Roster) -> Option<&Player> {
    let mut best: Option<&Player> = None;
    for player in roster.iter() {
        if best.map_or(true, |b| player.score > b.score) {
            best = Some(player);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineError, Song};
    use crate::timeline::Timeline;

    fn roster(cards: &[usize]) -> Roster {
        let players = cards
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let mut p = Player::new(format!("p{i}"), format!("P{i}"));
                p.timeline = Timeline::from_songs(
                    (0..n).map(|k| Song::new(format!("p{i}-{k}"), "t", "a", format!("{}", 1950 + k))),
                )
                .unwrap();
                p
            })
            .collect();
        Roster::new(players).unwrap()
    }

    #[test]
    fn test_guess_score() {
        assert_eq!(GuessScore::of(1975, 1975), GuessScore { accuracy: 100, points: 100 });
        assert_eq!(GuessScore::of(1973, 1975).accuracy, 96);
        assert_eq!(GuessScore::of(1977, 1975).accuracy, 96);
        assert_eq!(GuessScore::of(2025, 1975).accuracy, 0);
        assert_eq!(GuessScore::of(1926, 1975).accuracy, 2);
        assert_eq!(GuessScore::of(i32::MIN, i32::MAX).accuracy, 0);
    }

    #[test]
    fn test_placement_win_earliest_in_order() {
        let eval = RoundOutcomeEvaluator::new(2);
        assert!(eval.check_placement_win(&roster(&[1, 1, 0])).is_none());

        let r = roster(&[1, 2, 3]);
        assert_eq!(eval.check_placement_win(&r).unwrap().id.as_str(), "p1");
    }

    #[test]
    fn test_record_guess_accumulates() {
        let eval = RoundOutcomeEvaluator::default();
        let mut r = roster(&[0, 0]);
        let p0 = PlayerId::new("p0");

        eval.record_guess(&mut r, &p0, 1973, 1975).unwrap();
        eval.record_guess(&mut r, &p0, 1990, 1990).unwrap();
        assert_eq!(r.require(&p0).unwrap().score, 196);
        assert_eq!(r.require(&PlayerId::new("p1")).unwrap().score, 0);
    }

    #[test]
    fn test_record_guess_unknown_player() {
        let eval = RoundOutcomeEvaluator::default();
        let mut r = roster(&[0]);
        let err = eval
            .record_guess(&mut r, &PlayerId::new("late"), 1970, 1970)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownPlayer(id) if id.as_str() == "late"));
    }

    #[test]
    fn test_round_complete() {
        let eval = RoundOutcomeEvaluator::default();
        let r = roster(&[0, 0]);
        let mut guesses = Guesses::default();
        assert!(!eval.is_round_complete(&r, &guesses));

        guesses.insert(PlayerId::new("p0"), 1980);
        assert!(!eval.is_round_complete(&r, &guesses));

        guesses.insert(PlayerId::new("stranger"), 1980);
        assert!(!eval.is_round_complete(&r, &guesses));

        guesses.insert(PlayerId::new("p1"), 1981);
        assert!(eval.is_round_complete(&r, &guesses));
    }

    #[test]
    fn test_game_winner_waits_for_last_round() {
        let eval = RoundOutcomeEvaluator::default();
        let mut r = roster(&[0, 0, 0]);
        r.require_mut(&PlayerId::new("p1")).unwrap().score = 150;
        r.require_mut(&PlayerId::new("p2")).unwrap().score = 150;

        assert!(eval.check_game_winner(&r, 4, 5).is_none());
        assert_eq!(eval.check_game_winner(&r, 5, 5).unwrap().id.as_str(), "p1");
    }

    #[test]
    fn test_game_winner_all_zero_goes_to_first() {
        let eval = RoundOutcomeEvaluator::default();
        let r = roster(&[0, 0]);
        assert_eq!(eval.check_game_winner(&r, 3, 3).unwrap().id.as_str(), "p0");
    }
}
