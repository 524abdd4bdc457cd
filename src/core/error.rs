//! Engine error type.
//!
//! Every failure is recoverable by the caller. The variants carry enough
//! detail to tell which precondition failed.

use thiserror::Error;

use super::player::PlayerId;
use super::song::SongId;

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Placement index outside `0..=timeline_len`.
    #[error("target index {index} out of range for timeline of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// Song year text does not parse to an integer.
    #[error("song {song} has unparseable release year {raw:?}")]
    InvalidYear { song: SongId, raw: String },

    /// Roster has no players.
    #[error("roster is empty")]
    EmptyRoster,

    /// Pool initialized with no songs.
    #[error("song catalog is empty")]
    EmptyCatalog,

    /// Catalog has fewer usable songs than required.
    #[error("catalog has {available} usable songs, {required} required")]
    InsufficientCatalog { required: usize, available: usize },

    /// Player id not present in the roster.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// Two roster entries share an id.
    #[error("duplicate player {0}")]
    DuplicatePlayer(PlayerId),

    /// Two catalog entries share an id.
    #[error("duplicate song id {0}")]
    DuplicateSong(SongId),

    /// Song id is empty or whitespace.
    #[error("song id is blank")]
    BlankSongId,

    /// Timeline songs are not in ascending year order.
    #[error("timeline song {song} is out of year order")]
    UnsortedTimeline { song: SongId },

    /// Configuration value rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The round or game has already ended.
    #[error("round is already finished")]
    RoundFinished,

    /// No mystery card is pending.
    #[error("no mystery card is pending")]
    NoMysteryCard,

    /// Player already guessed in this round.
    #[error("player {0} already guessed this round")]
    AlreadyGuessed(PlayerId),

    /// Not every player has guessed yet.
    #[error("round incomplete: {missing} player(s) still to guess")]
    RoundIncomplete { missing: usize },

    /// Snapshot encoding or decoding failed.
    #[error("snapshot codec error: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_precondition() {
        let err = EngineError::InvalidIndex { index: 5, len: 2 };
        assert_eq!(err.to_string(), "target index 5 out of range for timeline of length 2");

        let err = EngineError::InvalidYear {
            song: SongId::new("s1"),
            raw: "nineteen".into(),
        };
        assert_eq!(err.to_string(), "song s1 has unparseable release year \"nineteen\"");

        let err = EngineError::UnknownPlayer(PlayerId::new("ghost"));
        assert_eq!(err.to_string(), "unknown player ghost");
    }
}
