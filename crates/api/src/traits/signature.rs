//! Digital signature trait.
//!
//! The design intentionally does not require `AsMut` access to secret keys:
//! keys are opaque at this layer and can only be used, cloned or dropped.
//! Implementations zeroize key material on drop.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for digital signature algorithms.
pub trait Signature {
    /// Public key type for this algorithm.
    type PublicKey: Clone;

    /// Secret key type; must be zeroizable.
    type SecretKey: Zeroize + Clone;

    /// Signature data type.
    type SignatureData: Clone;

    /// Key pair type, typically `(PublicKey, SecretKey)`.
    type KeyPair;

    /// Returns the name of this signature algorithm.
    fn name() -> &'static str;

    /// Generate a new key pair using the provided cryptographically secure
    /// RNG.
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair.
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair.
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message with the given secret key.
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key.
    ///
    /// All failure modes collapse into a single [`crate::Error::InvalidSignature`]
    /// verdict; callers cannot tell which internal check rejected the input.
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}
