//! Trait definitions for the public API.

pub mod signature;

pub use signature::Signature;
