//! Mystery card selection.
//!
//! The pool hands out songs one at a time, uniformly at random, and never
//! hands out the same song twice in a session. Running dry is a normal end
//! condition and is reported as `None`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{EngineError, Result};
use crate::core::rng::{GameRng, GameRngState};
use crate::core::song::{Song, SongId};

/// Songs not yet presented, plus the ids already consumed.
#[derive(Clone, Debug)]
pub struct MysteryPool {
    remaining: Vec<Song>,
    used: FxHashSet<SongId>,
    rng: GameRng,
}

impl MysteryPool {
    /// Start a session over `all_songs`.
    ///
    /// Fails with `EmptyCatalog` when there is nothing to draw.
    pub fn initialize(all_songs: Vec<Song>, rng: GameRng) -> Result<Self> {
        if all_songs.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        debug!(songs = all_songs.len(), seed = rng.seed(), "mystery pool initialized");

        Ok(Self {
            remaining: all_songs,
            used: FxHashSet::default(),
            rng,
        })
    }

    /// Draw the next mystery card.
    ///
    /// Skips songs already drawn or discarded and any id in `exclude` (songs
    /// on a timeline, the card currently on display). The drawn song is
    /// marked used. Returns `None` when nothing is drawable.
    pub fn next_mystery_card(&mut self, exclude: &FxHashSet<SongId>) -> Option<Song> {
        let candidates: Vec<usize> = self
            .remaining
            .iter()
            .enumerate()
            .filter(|(_, s)| !self.used.contains(&s.id) && !exclude.contains(&s.id))
            .map(|(i, _)| i)
            .collect();

        let Some(pick) = self.rng.pick_index(candidates.len()) else {
            warn!(used = self.used.len(), "mystery pool exhausted");
            return None;
        };

        let song = self.remaining.remove(candidates[pick]);
        self.used.insert(song.id.clone());
        debug!(song = %song.id, left = candidates.len() - 1, "mystery card drawn");
        Some(song)
    }

    /// Mark a song consumed without drawing it.
    ///
    /// Returns false if it was already consumed.
    pub fn discard(&mut self, id: &SongId) -> bool {
        self.remaining.retain(|s| &s.id != id);
        self.used.insert(id.clone())
    }

    /// How many songs a draw with `exclude` could choose from.
    #[must_use]
    pub fn available(&self, exclude: &FxHashSet<SongId>) -> usize {
        self.remaining
            .iter()
            .filter(|s| !self.used.contains(&s.id) && !exclude.contains(&s.id))
            .count()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.available(&FxHashSet::default()) == 0
    }

    #[must_use]
    pub fn is_used(&self, id: &SongId) -> bool {
        self.used.contains(id)
    }

    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Capture the pool, including the RNG position.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        let mut used: Vec<SongId> = self.used.iter().cloned().collect();
        used.sort();
        PoolSnapshot {
            remaining: self.remaining.clone(),
            used,
            rng: self.rng.state(),
        }
    }

    /// Rebuild a pool captured with `snapshot`.
    #[must_use]
    pub fn from_snapshot(snapshot: PoolSnapshot) -> Self {
        Self {
            remaining: snapshot.remaining,
            used: snapshot.used.into_iter().collect(),
            rng: GameRng::from_state(&snapshot.rng),
        }
    }
}

/// Serializable pool state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub remaining: Vec<Song>,
    /// Sorted for stable encodings.
    pub used: Vec<SongId>,
    pub rng: GameRngState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| Song::new(format!("s{i}"), "title", "artist", format!("{}", 1960 + i)))
            .collect()
    }

    fn ids(list: &[&str]) -> FxHashSet<SongId> {
        list.iter().map(|s| SongId::new(*s)).collect()
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            MysteryPool::initialize(vec![], GameRng::new(1)),
            Err(EngineError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_draws_are_distinct_then_none() {
        let mut pool = MysteryPool::initialize(songs(4), GameRng::new(3)).unwrap();
        let none = FxHashSet::default();

        let mut seen = FxHashSet::default();
        for _ in 0..4 {
            let song = pool.next_mystery_card(&none).unwrap();
            assert!(seen.insert(song.id));
        }
        assert!(pool.next_mystery_card(&none).is_none());
        assert!(pool.is_exhausted());
    }

    #[test]
    fn test_exclusions_respected() {
        let mut pool = MysteryPool::initialize(songs(3), GameRng::new(5)).unwrap();
        let exclude = ids(&["s0", "s2"]);

        assert_eq!(pool.available(&exclude), 1);
        assert_eq!(pool.next_mystery_card(&exclude).unwrap().id, SongId::new("s1"));
        assert!(pool.next_mystery_card(&exclude).is_none());

        // Excluded songs are not consumed.
        assert_eq!(pool.available(&FxHashSet::default()), 2);
    }

    #[test]
    fn test_discard() {
        let mut pool = MysteryPool::initialize(songs(2), GameRng::new(5)).unwrap();
        assert!(pool.discard(&SongId::new("s0")));
        assert!(!pool.discard(&SongId::new("s0")));
        assert!(pool.is_used(&SongId::new("s0")));

        let none = FxHashSet::default();
        assert_eq!(pool.next_mystery_card(&none).unwrap().id, SongId::new("s1"));
        assert!(pool.next_mystery_card(&none).is_none());
    }

    #[test]
    fn test_duplicate_ids_drawn_once() {
        let mut list = songs(2);
        list.push(list[0].clone());
        let mut pool = MysteryPool::initialize(list, GameRng::new(11)).unwrap();
        let none = FxHashSet::default();

        let a = pool.next_mystery_card(&none).unwrap();
        let b = pool.next_mystery_card(&none).unwrap();
        assert_ne!(a.id, b.id);
        assert!(pool.next_mystery_card(&none).is_none());
    }

    #[test]
    fn test_same_seed_same_order() {
        let none = FxHashSet::default();
        let mut a = MysteryPool::initialize(songs(10), GameRng::new(42)).unwrap();
        let mut b = MysteryPool::initialize(songs(10), GameRng::new(42)).unwrap();

        for _ in 0..10 {
            assert_eq!(a.next_mystery_card(&none), b.next_mystery_card(&none));
        }
    }

    #[test]
    fn test_snapshot_resumes_sequence() {
        let none = FxHashSet::default();
        let mut pool = MysteryPool::initialize(songs(8), GameRng::new(9)).unwrap();
        pool.next_mystery_card(&none);
        pool.next_mystery_card(&none);

        let snapshot = pool.snapshot();
        assert_eq!(snapshot.used.len(), 2);

        let mut restored = MysteryPool::from_snapshot(snapshot);
        for _ in 0..6 {
            assert_eq!(pool.next_mystery_card(&none), restored.next_mystery_card(&none));
        }
    }
}
