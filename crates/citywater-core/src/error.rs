// crates/citywater-core/src/error.rs

use thiserror::Error;

/// Errors surfaced by a [`CityStore`](crate::store::CityStore) backend.
///
/// These never escape the resolver: a store error at any stage of the
/// lookup cascade is logged and treated as "no match". The type exists so
/// store implementations have a common vocabulary and so callers driving a
/// store directly still get proper errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The endpoint could not be reached or the request failed in transit.
    #[cfg(feature = "rest")]
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered, but with a non-success status.
    #[error("store rejected the request: {0}")]
    Rejected(String),

    /// A row came back in a shape we could not decode.
    #[error("malformed row: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store is missing required configuration (endpoint, key).
    #[error("store not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
