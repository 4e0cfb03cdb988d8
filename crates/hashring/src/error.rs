//! Error types for the ring library.
//!
//! Ring queries and mutations are total and never fail; errors only arise
//! when parsing caller-supplied node specifications.

use std::num::ParseIntError;

use thiserror::Error;

/// Result type alias for the ring library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing node specifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The spec had no node name before the `=`.
    #[error("invalid node spec `{0}`: node name is empty")]
    EmptyNodeName(String),

    /// The weight part of a `NAME=WEIGHT` spec is not a non-negative integer.
    #[error("invalid weight in node spec `{spec}`: {source}")]
    InvalidWeight {
        spec: String,
        #[source]
        source: ParseIntError,
    },

    /// The weight exceeds [`MAX_WEIGHT`](crate::node::MAX_WEIGHT).
    #[error("weight in node spec `{spec}` exceeds the maximum of {max}")]
    WeightTooLarge { spec: String, max: u32 },
}
