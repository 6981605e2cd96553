//! Dilithium digital signature algorithm.
//!
//! High-level types for Dilithium2, Dilithium3 and Dilithium5. A single
//! generic implementation is instantiated per security level through the
//! `DilithiumSchemeParams` trait; there is no process-wide parameter state,
//! so different levels can be used concurrently from different threads.
//!
//! Internal structure:
//! - `field`: Montgomery and modular reduction on single coefficients
//! - `ntt`: forward/inverse number-theoretic transform
//! - `rounding`: Power2Round, Decompose, MakeHint, UseHint
//! - `sampling`: rejection kernels turning XOF bytes into coefficients
//! - `poly` / `polyvec`: polynomials, vectors and the public matrix
//! - `encoding`: bit-packing codecs and the key/signature frames
//! - `sign`: key generation, signing and verification flows

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use api::{Result as ApiResult, Signature as SignatureTrait};
use core::fmt;
use core::marker::PhantomData;
use params::pqc::dilithium::{DilithiumSchemeParams, SEEDBYTES};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

mod encoding;
mod field;
mod ntt;
mod poly;
mod polyvec;
mod rounding;
mod sampling;
mod sign;


pub use params::pqc::dilithium::{Dilithium2Params, Dilithium3Params, Dilithium5Params};

use crate::error::{Error, Result};

/// Dilithium public key: the packed `(rho, t1)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DilithiumPublicKey(pub(crate) Vec<u8>);

/// Dilithium secret key: the packed `(rho, key, tr, s1, s2, t0)` bundle.
/// Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DilithiumSecretKey(pub(crate) Vec<u8>);

/// Dilithium signature: the packed `(c_tilde, z, h)` triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DilithiumSignatureData(pub(crate) Vec<u8>);

impl AsRef<[u8]> for DilithiumPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for DilithiumSecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for DilithiumSignatureData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DilithiumSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        write!(f, "DilithiumSecretKey({} bytes)", self.0.len())
    }
}

/// Generic Dilithium instance; use the [`Dilithium2`], [`Dilithium3`] or
/// [`Dilithium5`] aliases.
pub struct Dilithium<P: DilithiumSchemeParams + 'static> {
    _params: PhantomData<P>,
}

/// NIST security level 2.
pub type Dilithium2 = Dilithium<Dilithium2Params>;
/// NIST security level 3.
pub type Dilithium3 = Dilithium<Dilithium3Params>;
/// NIST security level 5.
pub type Dilithium5 = Dilithium<Dilithium5Params>;

impl<P: DilithiumSchemeParams + 'static> Dilithium<P> {
    /// Deterministic key generation from an explicit 32-byte seed. A fixed
    /// seed reproduces the reference known-answer keys byte for byte. The
    /// seed is not retained.
    pub fn keypair_from_seed(
        seed: &[u8; SEEDBYTES],
    ) -> Result<(DilithiumPublicKey, DilithiumSecretKey)> {
        let (pk, sk) = sign::keypair_internal::<P>(seed)?;
        Ok((DilithiumPublicKey(pk), DilithiumSecretKey(sk)))
    }

    /// Key generation from an external randomness source.
    pub fn keypair_with_rng<R: RngCore + CryptoRng>(
        rng: &mut R,
    ) -> Result<(DilithiumPublicKey, DilithiumSecretKey)> {
        let (pk, sk) = sign::keypair_from_rng::<P, R>(rng)?;
        Ok((DilithiumPublicKey(pk), DilithiumSecretKey(sk)))
    }

    /// Deterministic signature over `message` with a raw secret key.
    pub fn sign_bytes(message: &[u8], sk: &[u8]) -> Result<Vec<u8>> {
        sign::sign_internal::<P>(message, sk)
    }

    /// Randomized signature: the masking seed comes from `rng` instead of
    /// the secret key, all other steps are unchanged.
    pub fn sign_bytes_randomized<R: RngCore + CryptoRng>(
        message: &[u8],
        sk: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        sign::sign_internal_randomized::<P, R>(message, sk, rng)
    }

    /// Verify a detached signature over `message` with a raw public key.
    pub fn verify_bytes(message: &[u8], signature: &[u8], pk: &[u8]) -> Result<()> {
        sign::verify_internal::<P>(message, signature, pk)
    }

    /// Produce a signed message `signature || message`, the layout NIST KAT
    /// files use for the `sm` field.
    pub fn sign_message(message: &[u8], sk: &[u8]) -> Result<Vec<u8>> {
        let mut sm = Self::sign_bytes(message, sk)?;
        sm.extend_from_slice(message);
        Ok(sm)
    }

    /// Verify a signed message and return its payload.
    pub fn open(signed_message: &[u8], pk: &[u8]) -> Result<Vec<u8>> {
        if signed_message.len() < P::SIGNATURE_BYTES {
            return Err(Error::InvalidSignatureSize {
                expected: P::SIGNATURE_BYTES,
                actual: signed_message.len(),
            });
        }
        let (sig, message) = signed_message.split_at(P::SIGNATURE_BYTES);
        Self::verify_bytes(message, sig, pk)?;
        Ok(message.to_vec())
    }
}

impl<P: DilithiumSchemeParams + Send + Sync + 'static> SignatureTrait for Dilithium<P> {
    type PublicKey = DilithiumPublicKey;
    type SecretKey = DilithiumSecretKey;
    type SignatureData = DilithiumSignatureData;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        Self::keypair_with_rng(rng).map_err(api::Error::from)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        Self::sign_bytes(message, &secret_key.0)
            .map(DilithiumSignatureData)
            .map_err(api::Error::from)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        // Collapse every reject path, including bad input lengths, into one
        // verdict; the cause must not be observable at this boundary.
        Self::verify_bytes(message, &signature.0, &public_key.0).map_err(|_| {
            api::Error::InvalidSignature {
                context: "verify",
                #[cfg(feature = "std")]
                message: "invalid signature".into(),
            }
        })
    }
}
