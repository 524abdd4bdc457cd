//! End-to-end games through the sprint and fiend drivers.

use timeline_rules::core::{Catalog, EngineError, FiendConfig, Player, PlayerId, Roster, Song, SprintConfig};
use timeline_rules::games::{FiendGame, RoundAdvance, SprintGame, TurnEvent};
use timeline_rules::rules::{GameResult, RulesEngine};

fn catalog(count: usize) -> Catalog {
    let songs = (0..count)
        .map(|i| {
            Song::new(format!("s{i}"), format!("Song {i}"), "Artist", format!("{}", 1950 + i * 2))
                .with_preview(format!("https://cdn.example/{i}.mp3"))
        })
        .collect();
    Catalog::playable(songs, count).unwrap()
}

fn roster(n: usize) -> Roster {
    Roster::new((0..n).map(|i| Player::new(format!("p{i}"), format!("Player {i}"))).collect())
        .unwrap()
}

/// Every player always places correctly: the first player hits the target
/// first, on their own turn.
#[test]
fn test_sprint_perfect_play() {
    let config = SprintConfig::new().with_target_card_count(4);
    let mut game = SprintGame::new(config, roster(3), catalog(30), 99).unwrap();

    let mut placements = 0;
    let result = loop {
        let slot = game.check(0).unwrap().valid_positions.start;
        let outcome = game.place(slot).unwrap();
        placements += 1;
        assert!(outcome.verdict.legal);

        match outcome.event {
            TurnEvent::NextTurn { .. } => continue,
            TurnEvent::Won(id) => break id,
            TurnEvent::PoolExhausted => panic!("pool ran out"),
        }
    };

    // p0 places three times on top of the dealt card, the others twice.
    assert_eq!(result, PlayerId::new("p0"));
    assert_eq!(placements, 7);
    assert_eq!(game.is_terminal(), Some(GameResult::Winner(PlayerId::new("p0"))));

    let standings: Vec<_> = game.standings().iter().map(|p| p.score).collect();
    assert_eq!(standings, vec![3, 2, 2]);
    for player in game.roster().iter() {
        assert!(player.timeline.is_sorted());
    }
}

/// Every player always places wrongly: nobody grows, the pool empties.
#[test]
fn test_sprint_wrong_every_time_exhausts_pool() {
    let mut game = SprintGame::new(SprintConfig::new(), roster(2), catalog(12), 5).unwrap();

    let mut placements = 0;
    loop {
        let verdict = game.check(0).unwrap();
        let len = game.current_player().timeline.len();
        let wrong = (0..=len).find(|i| !verdict.valid_positions.contains(i)).unwrap();
        let outcome = game.place(wrong).unwrap();
        placements += 1;
        assert!(!outcome.verdict.legal);

        if outcome.event == TurnEvent::PoolExhausted {
            break;
        }
    }

    // Two starting cards, ten mystery cards.
    assert_eq!(placements, 10);
    assert_eq!(game.is_terminal(), Some(GameResult::PoolExhausted));
    assert!(game.roster().iter().all(|p| p.card_count() == 1 && p.score == 0));
    assert!(matches!(game.place(0), Err(EngineError::RoundFinished)));
}

#[test]
fn test_sprint_round_state_view() {
    let game = SprintGame::new(SprintConfig::new(), roster(2), catalog(6), 1).unwrap();
    let state = game.round_state();

    assert_eq!(state.current_player, 0);
    assert_eq!(state.mystery.as_ref(), game.mystery_card());
    assert!(!state.status.is_finished());
    assert_eq!(game.current_player().id, PlayerId::new("p0"));
}

#[test]
fn test_sprint_rejects_bad_config() {
    let config = SprintConfig::new().with_target_card_count(0);
    let result = SprintGame::new(config, roster(2), catalog(6), 1);
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}

#[test]
fn test_sprint_empty_catalog() {
    let empty = Catalog::new(Vec::new(), 0).unwrap();
    let result = SprintGame::new(SprintConfig::new(), roster(2), empty, 1);
    assert!(matches!(result, Err(EngineError::EmptyCatalog)));
}

#[test]
fn test_fiend_full_game() {
    let config = FiendConfig::new().with_total_rounds(3);
    let mut game = FiendGame::new(config, roster(2), catalog(10), 21).unwrap();
    let mut seen = Vec::new();

    let winner = loop {
        let song = game.mystery_card().unwrap().clone();
        assert!(!seen.contains(&song.id));
        seen.push(song.id.clone());

        let year = song.year().unwrap();
        // p0 is always exact, p1 is always five years late.
        game.submit_guess(&PlayerId::new("p1"), year + 5).unwrap();
        let outcome = game.submit_guess(&PlayerId::new("p0"), year).unwrap();
        assert!(outcome.round_complete);

        match game.next_round().unwrap() {
            RoundAdvance::NextRound { reveal, round } => {
                assert_eq!(reveal.actual_year, year);
                assert_eq!(round, reveal.round + 1);
            }
            RoundAdvance::GameOver { winner, .. } => break winner,
            RoundAdvance::PoolExhausted { .. } => panic!("pool ran out"),
        }
    };

    assert_eq!(winner, PlayerId::new("p0"));
    assert_eq!(seen.len(), 3);
    assert_eq!(game.roster()[0].score, 300);
    assert_eq!(game.roster()[1].score, 270);
    assert_eq!(game.leader().unwrap().id, PlayerId::new("p0"));
}
