//! # dilithium
//!
//! CRYSTALS-Dilithium digital signatures at NIST security levels 2, 3 and 5,
//! byte-compatible with the round-3 reference implementation and its
//! known-answer tests.
//!
//! ## Crate structure
//!
//! This is a facade crate over the workspace:
//!
//! - `dilithium-algorithms`: Keccak-f[1600] and the SHAKE128/256 sponge
//! - `dilithium-params`: parameter sets and size constants
//! - `dilithium-sign`: the signature engine
//! - `dilithium-api`: public traits and the error surface
//!
//! ## Usage
//!
//! Pick a level at run time through [`SecurityLevel`] and the free
//! functions, or at compile time through the typed [`Dilithium2`],
//! [`Dilithium3`] and [`Dilithium5`] instances and the [`Signature`] trait.
//!
//! ```no_run
//! use dilithium::{keygen, sign, verify, SecurityLevel};
//!
//! let (pk, sk) = keygen(SecurityLevel::L3, None).unwrap();
//! let sig = sign(SecurityLevel::L3, &sk, b"attested payload").unwrap();
//! verify(SecurityLevel::L3, &pk, b"attested payload", &sig).unwrap();
//! ```
//!
//! Signing is deterministic: per-signature randomness is derived from the
//! secret key and the message. Key generation accepts an explicit 32-byte
//! seed for reproducible (KAT-compatible) keys.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use params::pqc::dilithium::{
    Dilithium2Params, Dilithium3Params, Dilithium5Params, DilithiumSchemeParams, SEEDBYTES,
};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use sign::Dilithium;

pub use api::{Error, Result, Signature};
pub use sign::{
    Dilithium2, Dilithium3, Dilithium5, DilithiumPublicKey, DilithiumSecretKey,
    DilithiumSignatureData,
};

/// The three standardized Dilithium parameter sets.
///
/// A level is an explicit value threaded through every call; the library
/// keeps no process-wide configuration, so different levels can be used
/// concurrently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    /// Dilithium2 (NIST level 2).
    L2,
    /// Dilithium3 (NIST level 3).
    L3,
    /// Dilithium5 (NIST level 5).
    L5,
}

impl SecurityLevel {
    /// Public key size in bytes.
    pub fn public_key_bytes(self) -> usize {
        match self {
            SecurityLevel::L2 => Dilithium2Params::PUBLIC_KEY_BYTES,
            SecurityLevel::L3 => Dilithium3Params::PUBLIC_KEY_BYTES,
            SecurityLevel::L5 => Dilithium5Params::PUBLIC_KEY_BYTES,
        }
    }

    /// Secret key size in bytes.
    pub fn secret_key_bytes(self) -> usize {
        match self {
            SecurityLevel::L2 => Dilithium2Params::SECRET_KEY_BYTES,
            SecurityLevel::L3 => Dilithium3Params::SECRET_KEY_BYTES,
            SecurityLevel::L5 => Dilithium5Params::SECRET_KEY_BYTES,
        }
    }

    /// Signature size in bytes.
    pub fn signature_bytes(self) -> usize {
        match self {
            SecurityLevel::L2 => Dilithium2Params::SIGNATURE_BYTES,
            SecurityLevel::L3 => Dilithium3Params::SIGNATURE_BYTES,
            SecurityLevel::L5 => Dilithium5Params::SIGNATURE_BYTES,
        }
    }
}

fn keygen_typed<P: DilithiumSchemeParams + 'static>(
    seed: Option<&[u8; SEEDBYTES]>,
) -> Result<(Vec<u8>, Vec<u8>)> {
    let (pk, sk) = match seed {
        Some(seed) => Dilithium::<P>::keypair_from_seed(seed),
        None => Dilithium::<P>::keypair_with_rng(&mut OsRng),
    }
    .map_err(Error::from)?;
    Ok((pk.as_ref().to_vec(), sk.as_ref().to_vec()))
}

fn keygen_rng_typed<P, R>(rng: &mut R) -> Result<(Vec<u8>, Vec<u8>)>
where
    P: DilithiumSchemeParams + 'static,
    R: RngCore + CryptoRng,
{
    let (pk, sk) = Dilithium::<P>::keypair_with_rng(rng).map_err(Error::from)?;
    Ok((pk.as_ref().to_vec(), sk.as_ref().to_vec()))
}

/// Generate a key pair, returning packed `(public key, secret key)` bytes.
///
/// With `Some(seed)` the generation is deterministic in the seed; with
/// `None` the operating system RNG supplies the seed.
pub fn keygen(level: SecurityLevel, seed: Option<&[u8; SEEDBYTES]>) -> Result<(Vec<u8>, Vec<u8>)> {
    match level {
        SecurityLevel::L2 => keygen_typed::<Dilithium2Params>(seed),
        SecurityLevel::L3 => keygen_typed::<Dilithium3Params>(seed),
        SecurityLevel::L5 => keygen_typed::<Dilithium5Params>(seed),
    }
}

/// Generate a key pair from a caller-supplied randomness source.
pub fn keygen_with_rng<R: RngCore + CryptoRng>(
    level: SecurityLevel,
    rng: &mut R,
) -> Result<(Vec<u8>, Vec<u8>)> {
    match level {
        SecurityLevel::L2 => keygen_rng_typed::<Dilithium2Params, R>(rng),
        SecurityLevel::L3 => keygen_rng_typed::<Dilithium3Params, R>(rng),
        SecurityLevel::L5 => keygen_rng_typed::<Dilithium5Params, R>(rng),
    }
}

/// Sign `message` with a packed secret key; deterministic.
pub fn sign(level: SecurityLevel, sk: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    match level {
        SecurityLevel::L2 => Dilithium2::sign_bytes(message, sk),
        SecurityLevel::L3 => Dilithium3::sign_bytes(message, sk),
        SecurityLevel::L5 => Dilithium5::sign_bytes(message, sk),
    }
    .map_err(Error::from)
}

/// Verify a detached signature with a packed public key.
///
/// Any failure, whether a wrong length, a malformed encoding or a challenge
/// mismatch, surfaces as the same [`Error::InvalidSignature`] verdict.
pub fn verify(level: SecurityLevel, pk: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
    match level {
        SecurityLevel::L2 => Dilithium2::verify_bytes(message, signature, pk),
        SecurityLevel::L3 => Dilithium3::verify_bytes(message, signature, pk),
        SecurityLevel::L5 => Dilithium5::verify_bytes(message, signature, pk),
    }
    .map_err(invalid_signature)
}

/// The single verdict every reject path collapses into, including wrong key
/// or signature lengths; the cause is not observable at this boundary.
fn invalid_signature<E>(_: E) -> Error {
    Error::InvalidSignature {
        context: "verify",
        #[cfg(feature = "std")]
        message: "invalid signature".into(),
    }
}

/// Produce a signed message `signature || message`.
pub fn sign_message(level: SecurityLevel, sk: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    match level {
        SecurityLevel::L2 => Dilithium2::sign_message(message, sk),
        SecurityLevel::L3 => Dilithium3::sign_message(message, sk),
        SecurityLevel::L5 => Dilithium5::sign_message(message, sk),
    }
    .map_err(Error::from)
}

/// Verify a signed message and return its payload.
pub fn open(level: SecurityLevel, pk: &[u8], signed_message: &[u8]) -> Result<Vec<u8>> {
    match level {
        SecurityLevel::L2 => Dilithium2::open(signed_message, pk),
        SecurityLevel::L3 => Dilithium3::open(signed_message, pk),
        SecurityLevel::L5 => Dilithium5::open(signed_message, pk),
    }
    .map_err(invalid_signature)
}
