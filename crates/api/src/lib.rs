//! Public API traits and types for the Dilithium signature library.
//!
//! This crate provides the outward-facing surface: the [`Signature`] trait
//! implemented by every security level and the [`Error`] type callers see.
//! Implementation crates report richer internal errors and collapse them
//! into this surface at the boundary.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::Signature;
