//! Placement validation.
//!
//! A placement is legal when the song's year fits between its would-be
//! neighbours. This is the only place that rule is written down; hosts and
//! clients both call it so their answers cannot drift apart.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::timeline::Timeline;
use crate::core::config::OrderingPolicy;
use crate::core::error::{EngineError, Result};
use crate::core::song::Song;

/// Why a placement was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalPlacement {
    /// The card to the left is from a later year.
    EarlierThanPrevious { year: i32, previous_year: i32 },
    /// The card to the right is from an earlier year.
    LaterThanNext { year: i32, next_year: i32 },
}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::EarlierThanPrevious { year, previous_year } => {
                write!(f, "{year} cannot follow {previous_year}")
            }
            IllegalPlacement::LaterThanNext { year, next_year } => {
                write!(f, "{year} cannot precede {next_year}")
            }
        }
    }
}

/// Outcome of validating one placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementVerdict {
    pub legal: bool,
    /// Set when `legal` is false.
    pub reason: Option<IllegalPlacement>,
    /// Parsed year of the placed song.
    pub year: i32,
    pub target_index: usize,
    /// Every target index that would have been legal. Empty only under
    /// `OrderingPolicy::Strict` when the year is already on the timeline.
    pub valid_positions: Range<usize>,
}

/// Decides whether a song may go at a given timeline index.
///
/// ## Example
///
/// ```
/// use timeline_rules::core::Song;
/// use timeline_rules::timeline::{PlacementValidator, Timeline};
///
/// let timeline = Timeline::from_songs(vec![
///     Song::new("a", "Bohemian Rhapsody", "Queen", "1975"),
///     Song::new("b", "Never Gonna Give You Up", "Rick Astley", "1987"),
/// ]).unwrap();
///
/// let song = Song::new("c", "Billie Jean", "Michael Jackson", "1982");
/// let validator = PlacementValidator::new();
///
/// assert!(validator.validate(&timeline, &song, 1).unwrap().legal);
/// assert!(!validator.validate(&timeline, &song, 0).unwrap().legal);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementValidator {
    ordering: OrderingPolicy,
}

impl PlacementValidator {
    /// Validator that allows equal years side by side.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ordering(ordering: OrderingPolicy) -> Self {
        Self { ordering }
    }

    #[must_use]
    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    /// Validate inserting `song` at `target_index` of `timeline`.
    ///
    /// Pure: the timeline is not modified. Fails with `InvalidIndex` when
    /// `target_index > timeline.len()` and `InvalidYear` when a year does
    /// not parse.
    pub fn validate(
        &self,
        timeline: &Timeline,
        song: &Song,
        target_index: usize,
    ) -> Result<PlacementVerdict> {
        let len = timeline.len();
        if target_index > len {
            return Err(EngineError::InvalidIndex {
                index: target_index,
                len,
            });
        }

        let year = song.year()?;
        let mut reason = None;

        if target_index > 0 {
            if let Some(previous) = timeline.get(target_index - 1) {
                let previous_year = previous.year()?;
                if !self.in_order(previous_year, year) {
                    reason = Some(IllegalPlacement::EarlierThanPrevious {
                        year,
                        previous_year,
                    });
                }
            }
        }

        if reason.is_none() {
            if let Some(next) = timeline.get(target_index) {
                let next_year = next.year()?;
                if !self.in_order(year, next_year) {
                    reason = Some(IllegalPlacement::LaterThanNext { year, next_year });
                }
            }
        }

        Ok(PlacementVerdict {
            legal: reason.is_none(),
            reason,
            year,
            target_index,
            valid_positions: self.valid_positions(timeline, year)?,
        })
    }

    fn in_order(&self, earlier: i32, later: i32) -> bool {
        match self.ordering {
            OrderingPolicy::AllowTies => earlier <= later,
            OrderingPolicy::Strict => earlier < later,
        }
    }

    // Assumes `timeline` is sorted.
    fn valid_positions(&self, timeline: &Timeline, year: i32) -> Result<Range<usize>> {
        let mut before = 0;
        let mut up_to = 0;
        for y in timeline.years()? {
            if y < year {
                before += 1;
            }
            if y <= year {
                up_to += 1;
            }
        }

        Ok(match self.ordering {
            OrderingPolicy::AllowTies => before..up_to + 1,
            OrderingPolicy::Strict if before == up_to => before..before + 1,
            OrderingPolicy::Strict => before..before,
        })
    }
}
