//! Error types for the primitives crate.

use core::fmt;

/// Errors that can occur while driving a primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter was outside its documented domain.
    Parameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// An XOF was driven through an invalid state transition, e.g. absorbing
    /// after squeezing has started.
    XofState {
        /// Description of the violated transition.
        reason: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "invalid parameter {}: {}", name, reason)
            }
            Error::XofState { reason } => write!(f, "invalid XOF state: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result alias for primitive operations.
pub type Result<T> = core::result::Result<T, Error>;
