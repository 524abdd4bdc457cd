//! Songs: the cards of the game.
//!
//! A `Song` is immutable once loaded. The engine only ever looks at its id
//! and its release year; every other field is carried for the presentation
//! layer.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Unique song identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SongId(pub String);

impl SongId {
    /// Create a new song ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SongId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Song record.
///
/// `release_year` is kept as text, the way catalogs deliver it. Use
/// [`Song::year`] to read it as an integer.
///
/// ## Example
///
/// ```
/// use timeline_rules::core::Song;
///
/// let song = Song::new("q1", "Bohemian Rhapsody", "Queen", "1975");
/// assert_eq!(song.year().unwrap(), 1975);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: String,
    pub release_year: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl Song {
    /// Create a song with the required fields; the rest default to empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        release_year: impl Into<String>,
    ) -> Self {
        Self {
            id: SongId::new(id),
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            release_year: release_year.into(),
            genre: String::new(),
            color: String::new(),
            preview_url: None,
        }
    }

    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_preview(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    /// Release year as an integer.
    ///
    /// Surrounding whitespace is ignored. Anything else that is not a plain
    /// integer is rejected with `InvalidYear`.
    pub fn year(&self) -> Result<i32> {
        self.release_year
            .trim()
            .parse::<i32>()
            .map_err(|_| EngineError::InvalidYear {
                song: self.id.clone(),
                raw: self.release_year.clone(),
            })
    }

    /// Does this song have a playable preview?
    #[must_use]
    pub fn has_preview(&self) -> bool {
        self.preview_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}
