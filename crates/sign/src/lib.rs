//! Dilithium digital signatures.
//!
//! Complete implementation of the CRYSTALS-Dilithium signature scheme at
//! NIST security levels 2, 3 and 5, byte-compatible with the round-3
//! reference implementation and its known-answer tests.
//!
//! The public entry points are the [`dilithium::Dilithium2`],
//! [`dilithium::Dilithium3`] and [`dilithium::Dilithium5`] types, which
//! implement the [`api::Signature`] trait and additionally expose seeded,
//! deterministic key generation for KAT reproduction.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod dilithium;
pub mod error;

pub use dilithium::{
    Dilithium, Dilithium2, Dilithium3, Dilithium5, DilithiumPublicKey, DilithiumSecretKey,
    DilithiumSignatureData,
};
pub use error::{Error, Result};
