//! Binary encoding for game snapshots.
//!
//! Snapshots are plain serde structs; these helpers pin the wire encoding
//! to bincode so the persistence layer stores compact blobs.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::Result;

/// Encode a snapshot to bytes.
pub fn encode<T: Serialize>(snapshot: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(snapshot)?)
}

/// Decode a snapshot from bytes produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineError, Song};

    #[test]
    fn test_roundtrip() {
        let song = Song::new("a", "Hey Jude", "The Beatles", "1968").with_preview("x");
        let bytes = encode(&song).unwrap();
        let back: Song = decode(&bytes).unwrap();
        assert_eq!(song, back);
    }

    #[test]
    fn test_truncated_bytes() {
        let bytes = encode(&Song::new("a", "t", "x", "1968")).unwrap();
        let err = decode::<Song>(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, EngineError::Snapshot(_)));
    }
}
