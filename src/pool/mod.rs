//! Mystery card pool.

pub mod mystery;

pub use mystery::{MysteryPool, PoolSnapshot};
