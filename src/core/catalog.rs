//! Validated song catalog.
//!
//! Songs come from untrusted uploads and external APIs. `Catalog` is the
//! one place they are checked: every year parses, every id is present and
//! unique. The rules engine only ever receives songs that passed here.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::error::{EngineError, Result};
use super::song::Song;

/// A checked list of songs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Validate `songs`, failing when fewer than `min_count` remain.
    pub fn new(songs: Vec<Song>, min_count: usize) -> Result<Self> {
        Self::build(songs, min_count, false)
    }

    /// Like `new`, but silently drops songs without a playable preview
    /// before counting.
    pub fn playable(songs: Vec<Song>, min_count: usize) -> Result<Self> {
        Self::build(songs, min_count, true)
    }

    fn build(songs: Vec<Song>, min_count: usize, require_preview: bool) -> Result<Self> {
        let total = songs.len();
        let mut seen = FxHashSet::default();
        let mut kept = Vec::with_capacity(total);

        for song in songs {
            if song.id.as_str().trim().is_empty() {
                return Err(EngineError::BlankSongId);
            }
            if !seen.insert(song.id.clone()) {
                return Err(EngineError::DuplicateSong(song.id));
            }
            song.year()?;
            if require_preview && !song.has_preview() {
                continue;
            }
            kept.push(song);
        }

        debug!(total, usable = kept.len(), min_count, "catalog validated");

        if kept.len() < min_count {
            return Err(EngineError::InsufficientCatalog {
                required: min_count,
                available: kept.len(),
            });
        }

        Ok(Self { songs: kept })
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
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    #[must_use]
    pub fn into_songs(self) -> Vec<Song> {
        self.songs
    }
}
