//! A player's timeline of placed songs.
//!
//! Songs are kept sorted ascending by release year. The only ways in are
//! `from_songs` (sorts), `place` (validates first) and deserialization
//! (rejects out-of-order input), so a `Timeline` cannot become unsorted
//! through its public API.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::validator::{PlacementValidator, PlacementVerdict};
use crate::core::error::{EngineError, Result};
use crate::core::song::{Song, SongId};

/// Sorted sequence of songs owned by one player.
///
/// Backed by `im::Vector` so cloning a timeline into a snapshot is O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Song>", into = "Vec<Song>")]
pub struct Timeline {
    songs: Vector<Song>,
}

impl Timeline {
    /// Create an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline holding only the starting card.
    #[must_use]
    pub fn with_starting_card(song: Song) -> Self {
        Self {
            songs: Vector::unit(song),
        }
    }

    /// Build a timeline from songs in any order. Equal years keep their
    /// input order.
    pub fn from_songs(songs: impl IntoIterator<Item = Song>) -> Result<Self> {
        let mut keyed = songs
            .into_iter()
            .map(|song| Ok((song.year()?, song)))
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by_key(|(year, _)| *year);

        Ok(Self {
            songs: keyed.into_iter().map(|(_, song)| song).collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    pub fn song_ids(&self) -> impl Iterator<Item = SongId> + '_ {
        self.songs.iter().map(|s| s.id.clone())
    }

    #[must_use]
    pub fn contains(&self, id: &SongId) -> bool {
        self.songs.iter().any(|s| &s.id == id)
    }

    /// Parsed years, in timeline order.
    pub fn years(&self) -> Result<Vec<i32>> {
        self.songs.iter().map(Song::year).collect()
    }

    /// Check the ascending-year invariant.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        match self.years() {
            Ok(years) => years.windows(2).all(|w| w[0] <= w[1]),
            Err(_) => false,
        }
    }

    /// Validate `song` at `target_index` and insert it when legal.
    ///
    /// Illegal placements leave the timeline unchanged; the verdict says
    /// why. Errors (`InvalidIndex`, `InvalidYear`) also leave it unchanged.
    pub fn place(
        &mut self,
        validator: &PlacementValidator,
        song: Song,
        target_index: usize,
    ) -> Result<PlacementVerdict> {
        let verdict = validator.validate(self, &song, target_index)?;
        if verdict.legal {
            self.songs.insert(target_index, song);
        }
        Ok(verdict)
    }
}

impl TryFrom<Vec<Song>> for Timeline {
    type Error = EngineError;

    /// Accepts songs already in year order; unlike `from_songs` it never
    /// reorders.
    fn try_from(songs: Vec<Song>) -> Result<Self> {
        let mut previous: Option<i32> = None;
        for song in &songs {
            let year = song.year()?;
            if previous.is_some_and(|p| year < p) {
                return Err(EngineError::UnsortedTimeline {
                    song: song.id.clone(),
                });
            }
            previous = Some(year);
        }
        Ok(Self {
            songs: songs.into_iter().collect(),
        })
    }
}

impl From<Timeline> for Vec<Song> {
    fn from(timeline: Timeline) -> Self {
        timeline.songs.into_iter().collect()
    }
}
