//! Extendable output functions.

pub mod shake;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use crate::Result;

/// Interface for extendable output functions (XOFs).
///
/// The state machine has two phases: absorbing (`update`) and squeezing
/// (`squeeze`). The first `squeeze` pads and finalizes the input; calling
/// `update` afterwards is an error.
pub trait ExtendableOutputFunction {
    /// Create a fresh XOF instance.
    fn new() -> Self;

    /// Absorb input data. May be called repeatedly; the concatenation of all
    /// updates produces the same output as a single absorption of the
    /// concatenated bytes.
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Pad the input and switch to the squeezing phase. Implied by the first
    /// `squeeze`; calling it explicitly is idempotent.
    fn finalize(&mut self) -> Result<()>;

    /// Squeeze output bytes. Successive calls continue the output stream.
    fn squeeze(&mut self, output: &mut [u8]) -> Result<()>;

    /// Squeeze `len` bytes into a freshly allocated vector.
    #[cfg(feature = "alloc")]
    fn squeeze_into_vec(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Reset to a fresh absorbing state.
    fn reset(&mut self) -> Result<()>;

    /// Security level of the instance in bits.
    fn security_level() -> usize;
}

pub use shake::{KeccakState, ShakeXof128, ShakeXof256, SHAKE128_RATE, SHAKE256_RATE};
