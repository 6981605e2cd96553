//! Symmetric primitives backing the Dilithium implementation.
//!
//! Everything here is deterministic byte-in/byte-out machinery: the
//! Keccak-f[1600] permutation and the SHAKE128/SHAKE256 extendable output
//! functions built on it, in both an incremental hashing interface and the
//! low-level block-oriented sponge interface the rejection samplers drive.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod error;
pub mod xof;

pub use error::{Error, Result};
