//! Timelines and placement validation.
//!
//! - `Timeline`: a player's year-sorted songs
//! - `PlacementValidator`: the legality rule for inserting a song

#[allow(clippy::module_inception)]
pub mod timeline;
pub mod validator;

pub use timeline::Timeline;
pub use validator::{IllegalPlacement, PlacementValidator, PlacementVerdict};
