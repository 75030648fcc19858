//! Errors returned by [`Tree`][crate::Tree] operations.

use thiserror::Error;

/// The ways a lookup or removal can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The search walk ran off the bottom of the tree without finding a node whose key is equal
    /// to the requested one.
    #[error("key not found")]
    KeyNotFound,
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
