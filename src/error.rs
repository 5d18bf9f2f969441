use std::io;

use thiserror::Error;

/// Errors raised while building a [`Qs`](crate::Qs).
///
/// Reading from a parsed querystring never fails: lookups return
/// `None` or an empty `Vec`, and typed accessors fall back to zero values.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// The raw querystring could not be decoded.
    #[error("invalid query string: {reason}")]
    InvalidQuery {
        /// What the decoder tripped over
        reason: String,
    },

    /// A key opened a bracket inside another bracket, or closed one that
    /// was never opened, e.g. `a[[b]` or `a[b]]`.
    #[error("brackets are unbalanced in key `{key}`")]
    UnbalancedBrackets {
        /// The decoded key that failed to parse
        key: String,
    },

    /// Writing a serialized querystring failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_query<T: ToString>(reason: T) -> Self {
        Error::InvalidQuery {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unbalanced<T: Into<String>>(key: T) -> Self {
        Error::UnbalancedBrackets { key: key.into() }
    }

    /// Returns true if the querystring itself was malformed.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Error::InvalidQuery { .. })
    }

    /// Returns true if some key had unbalanced brackets.
    pub fn is_unbalanced_brackets(&self) -> bool {
        matches!(self, Error::UnbalancedBrackets { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
