//! Parameter constants for the Dilithium signature scheme.
//!
//! This crate carries no code beyond constant definitions and the
//! `DilithiumSchemeParams` trait that selects a security level at the type
//! level. Keeping the numbers in a leaf crate lets every other crate agree
//! on them without depending on the implementation.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod pqc;
