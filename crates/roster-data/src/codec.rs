//! JSON codec for persisted collections.
//!
//! A collection is stored as one JSON array of field-tagged records. There is
//! no envelope and no version tag, so renaming a field breaks every blob
//! written before the rename.

use thiserror::Error;

use crate::repository::Entity;

/// Codec failure for one collection.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode {collection}: {source}")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {collection}: {source}")]
    Decode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Encode a collection as a JSON array.
pub fn encode<E: Entity>(items: &[E]) -> Result<String, CodecError> {
    serde_json::to_string(items).map_err(|source| CodecError::Encode {
        collection: E::STORE_KEY,
        source,
    })
}

/// Decode a JSON array into a collection.
pub fn decode<E: Entity>(text: &str) -> Result<Vec<E>, CodecError> {
    serde_json::from_str(text).map_err(|source| CodecError::Decode {
        collection: E::STORE_KEY,
        source,
    })
}

/// Decode a stored blob, substituting an empty collection when it is absent or malformed.
pub fn decode_or_empty<E: Entity>(text: Option<&str>) -> Vec<E> {
    let Some(text) = text else {
        return Vec::new();
    };

    match decode(text) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable collection");
            Vec::new()
        }
    }
}
