//! Error types for the signature crate.

use core::fmt;

#[cfg(feature = "std")]
use std::string::String;

/// Errors that can occur during signature operations.
///
/// Verification distinguishes three internal failure kinds (wrong input
/// length, malformed encoding, challenge mismatch) for diagnostics and
/// testing; the conversion into [`api::Error`] collapses all of them into a
/// single invalid-signature verdict so public callers cannot tell them
/// apart. Descriptive messages are only carried with the `std` feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A public or secret key had the wrong length for the parameter set.
    InvalidKeySize {
        /// Expected length in bytes.
        expected: usize,
        /// Provided length in bytes.
        actual: usize,
    },

    /// A signature had the wrong length for the parameter set.
    InvalidSignatureSize {
        /// Expected length in bytes.
        expected: usize,
        /// Provided length in bytes.
        actual: usize,
    },

    /// A byte encoding violated its format, e.g. an out-of-order or
    /// over-weight hint section.
    Deserialization {
        /// Decoder that rejected the input.
        context: &'static str,
        /// Human-readable description.
        #[cfg(feature = "std")]
        message: String,
    },

    /// A value could not be encoded; indicates an internal invariant
    /// violation, not bad caller input.
    Serialization {
        /// Encoder that failed.
        context: &'static str,
        /// Human-readable description.
        #[cfg(feature = "std")]
        message: String,
    },

    /// Signature generation failed.
    SignatureGeneration {
        /// Algorithm name.
        algorithm: &'static str,
        /// Failure description.
        #[cfg(feature = "std")]
        details: String,
    },

    /// The recomputed challenge did not match the signature.
    Verification {
        /// Algorithm name.
        algorithm: &'static str,
    },

    /// The random source failed to produce bytes.
    Rng {
        /// Operation that needed randomness.
        context: &'static str,
        /// Human-readable description.
        #[cfg(feature = "std")]
        message: String,
    },

    /// Internal invariant violation; indicates a bug, not bad input.
    Internal {
        /// Component that failed.
        context: &'static str,
        /// Human-readable description.
        #[cfg(feature = "std")]
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeySize { expected, actual } => {
                write!(f, "invalid key size: expected {}, got {}", expected, actual)
            }
            Error::InvalidSignatureSize { expected, actual } => {
                write!(
                    f,
                    "invalid signature size: expected {}, got {}",
                    expected, actual
                )
            }
            #[cfg(feature = "std")]
            Error::Deserialization { context, message } => {
                write!(f, "deserialization error in {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Error::Deserialization { context } => {
                write!(f, "deserialization error in {}", context)
            }
            #[cfg(feature = "std")]
            Error::Serialization { context, message } => {
                write!(f, "serialization error in {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Error::Serialization { context } => {
                write!(f, "serialization error in {}", context)
            }
            #[cfg(feature = "std")]
            Error::SignatureGeneration { algorithm, details } => {
                write!(f, "{} signature generation failed: {}", algorithm, details)
            }
            #[cfg(not(feature = "std"))]
            Error::SignatureGeneration { algorithm } => {
                write!(f, "{} signature generation failed", algorithm)
            }
            Error::Verification { algorithm } => {
                write!(f, "{} signature verification failed", algorithm)
            }
            #[cfg(feature = "std")]
            Error::Rng { context, message } => {
                write!(f, "rng error in {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Error::Rng { context } => write!(f, "rng error in {}", context),
            #[cfg(feature = "std")]
            Error::Internal { context, message } => {
                write!(f, "internal error in {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Error::Internal { context } => write!(f, "internal error in {}", context),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<algorithms::Error> for Error {
    fn from(err: algorithms::Error) -> Self {
        Error::Internal {
            context: "primitive",
            message: err.to_string(),
        }
    }
}

#[cfg(not(feature = "std"))]
impl From<algorithms::Error> for Error {
    fn from(_: algorithms::Error) -> Self {
        Error::Internal {
            context: "primitive",
        }
    }
}

#[cfg(feature = "std")]
impl From<Error> for api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidKeySize { expected, actual } => api::Error::InvalidKey {
                context: "sign",
                message: format!("invalid key size: expected {}, got {}", expected, actual),
            },
            // Every way a signature can be rejected maps to the same public
            // verdict; see the module documentation.
            Error::InvalidSignatureSize { .. }
            | Error::Deserialization { .. }
            | Error::Verification { .. } => api::Error::InvalidSignature {
                context: "verify",
                message: "invalid signature".into(),
            },
            Error::Serialization { context, message } => api::Error::Other { context, message },
            Error::SignatureGeneration { algorithm, details } => api::Error::Other {
                context: algorithm,
                message: details,
            },
            Error::Rng { context, message } => api::Error::Other { context, message },
            Error::Internal { context, message } => api::Error::Other { context, message },
        }
    }
}

#[cfg(not(feature = "std"))]
impl From<Error> for api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidKeySize { .. } => api::Error::InvalidKey { context: "sign" },
            Error::InvalidSignatureSize { .. }
            | Error::Deserialization { .. }
            | Error::Verification { .. } => api::Error::InvalidSignature { context: "verify" },
            Error::Serialization { context } => api::Error::Other { context },
            Error::SignatureGeneration { algorithm } => api::Error::Other { context: algorithm },
            Error::Rng { context } => api::Error::Other { context },
            Error::Internal { context } => api::Error::Other { context },
        }
    }
}

/// Result alias for signature operations.
pub type Result<T> = core::result::Result<T, Error>;
