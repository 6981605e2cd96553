//! Error handling for the public API surface.
//!
//! Verification failures deliberately carry no detail about *which* internal
//! check rejected an input; distinguishing malformed encodings from wrong
//! challenges would hand an attacker an oracle.
//!
//! Descriptive messages are only available with the `std` feature; without
//! it every variant still carries its static context.

use core::fmt;

#[cfg(feature = "std")]
use std::string::String;

/// Errors surfaced to library consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A key was malformed or had the wrong length.
    InvalidKey {
        /// Operation that rejected the key.
        context: &'static str,
        /// Human-readable description.
        #[cfg(feature = "std")]
        message: String,
    },

    /// A signature failed to verify, was malformed, or had the wrong length.
    InvalidSignature {
        /// Operation that rejected the signature.
        context: &'static str,
        /// Human-readable description.
        #[cfg(feature = "std")]
        message: String,
    },

    /// A parameter was outside its documented domain.
    InvalidParameter {
        /// Operation that rejected the parameter.
        context: &'static str,
        /// Human-readable description.
        #[cfg(feature = "std")]
        message: String,
    },

    /// An input buffer had the wrong length.
    InvalidLength {
        /// Operation that rejected the buffer.
        context: &'static str,
        /// Expected length in bytes.
        expected: usize,
        /// Provided length in bytes.
        actual: usize,
    },

    /// Internal failure that does not fit the categories above.
    Other {
        /// Operation that failed.
        context: &'static str,
        /// Human-readable description.
        #[cfg(feature = "std")]
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "std")]
            Error::InvalidKey { context, message } => {
                write!(f, "invalid key in {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Error::InvalidKey { context } => write!(f, "invalid key in {}", context),
            #[cfg(feature = "std")]
            Error::InvalidSignature { context, message } => {
                write!(f, "invalid signature in {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Error::InvalidSignature { context } => {
                write!(f, "invalid signature in {}", context)
            }
            #[cfg(feature = "std")]
            Error::InvalidParameter { context, message } => {
                write!(f, "invalid parameter in {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Error::InvalidParameter { context } => {
                write!(f, "invalid parameter in {}", context)
            }
            Error::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "invalid length in {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            #[cfg(feature = "std")]
            Error::Other { context, message } => write!(f, "{}: {}", context, message),
            #[cfg(not(feature = "std"))]
            Error::Other { context } => write!(f, "error in {}", context),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result alias for API operations.
pub type Result<T> = core::result::Result<T, Error>;
