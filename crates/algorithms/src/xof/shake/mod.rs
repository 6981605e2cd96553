//! SHAKE extendable output functions.
//!
//! Implements the SHAKE family from FIPS PUB 202 on top of a hand-written
//! Keccak-f[1600] permutation. Two interfaces are exposed:
//!
//! - [`KeccakState`], the raw sponge with explicit rate arguments and a byte
//!   position, matching the absorb/finalize/squeeze/squeezeblocks contract
//!   the Dilithium rejection samplers are written against;
//! - [`ShakeXof128`] / [`ShakeXof256`], incremental hashing wrappers used for
//!   seed expansion and commitment hashing.
//!
//! Only absorbed and squeezed bytes are observable; the lane layout is an
//! implementation detail.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ExtendableOutputFunction;
use crate::error::{Error, Result};

/// SHAKE128 rate: 1600/8 - 2*128/8 bytes per block.
pub const SHAKE128_RATE: usize = 168;

/// SHAKE256 rate: 1600/8 - 2*256/8 bytes per block.
pub const SHAKE256_RATE: usize = 136;

/// Domain separation suffix for the SHAKE family.
const SHAKE_DOMSEP: u8 = 0x1F;

const KECCAK_ROUNDS: usize = 24;

/// Round constants for the iota step.
const RC: [u64; KECCAK_ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808A,
    0x8000000080008000,
    0x000000000000808B,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008A,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000A,
    0x000000008000808B,
    0x800000000000008B,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800A,
    0x800000008000000A,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// Rotation offsets for the rho step, in pi traversal order.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane permutation for the pi step.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Full Keccak-f[1600] permutation, 24 rounds.
fn keccak_f1600(state: &mut [u64; 25]) {
    for &rc in RC.iter() {
        // Theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in (0..25).step_by(5) {
                state[x + y] ^= d;
            }
        }

        // Rho and pi, fused into a single in-place walk
        let mut last = state[1];
        for i in 0..24 {
            let j = PI[i];
            let t = state[j];
            state[j] = last.rotate_left(RHO[i]);
            last = t;
        }

        // Chi
        for y in (0..25).step_by(5) {
            let mut row = [0u64; 5];
            row.copy_from_slice(&state[y..y + 5]);
            for x in 0..5 {
                state[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // Iota
        state[0] ^= rc;
    }
}

/// Raw Keccak sponge state: 25 64-bit lanes plus a byte position.
///
/// The position tracks the next byte offset within the current block. While
/// absorbing it stays in `[0, rate)`; [`KeccakState::finalize`] sets it to
/// `rate` so the first squeeze permutes immediately.
#[derive(Clone, Zeroize)]
pub struct KeccakState {
    lanes: [u64; 25],
    pos: usize,
}

impl Default for KeccakState {
    fn default() -> Self {
        Self::init()
    }
}

impl KeccakState {
    /// Fresh all-zero state.
    pub fn init() -> Self {
        KeccakState {
            lanes: [0u64; 25],
            pos: 0,
        }
    }

    /// Clear the state back to its initial value.
    pub fn reset(&mut self) {
        self.lanes = [0u64; 25];
        self.pos = 0;
    }

    /// Absorb input bytes incrementally at the given rate.
    pub fn absorb(&mut self, rate: usize, input: &[u8]) {
        let mut pos = self.pos;
        for &byte in input {
            self.lanes[pos / 8] ^= u64::from(byte) << (8 * (pos % 8));
            pos += 1;
            if pos == rate {
                keccak_f1600(&mut self.lanes);
                pos = 0;
            }
        }
        self.pos = pos;
    }

    /// Apply the padding: XOR the domain separation byte at the current
    /// position and the final bit at `rate - 1`, then mark the block as
    /// exhausted so the next squeeze permutes.
    pub fn finalize(&mut self, rate: usize, domsep: u8) {
        self.lanes[self.pos / 8] ^= u64::from(domsep) << (8 * (self.pos % 8));
        self.lanes[rate / 8 - 1] ^= 1u64 << 63;
        self.pos = rate;
    }

    /// Squeeze an arbitrary number of output bytes, permuting whenever the
    /// current block is exhausted.
    pub fn squeeze(&mut self, rate: usize, out: &mut [u8]) {
        let mut pos = self.pos;
        for byte in out.iter_mut() {
            if pos == rate {
                keccak_f1600(&mut self.lanes);
                pos = 0;
            }
            *byte = (self.lanes[pos / 8] >> (8 * (pos % 8))) as u8;
            pos += 1;
        }
        self.pos = pos;
    }

    /// Squeeze exactly `nblocks` full blocks of `rate` bytes into `out`.
    ///
    /// Must only be called on a block boundary (directly after `finalize` or
    /// a previous block-aligned squeeze); the byte position is left at the
    /// boundary so `squeeze` and `squeezeblocks` can be interleaved.
    pub fn squeezeblocks(&mut self, rate: usize, nblocks: usize, out: &mut [u8]) {
        debug_assert!(out.len() >= nblocks * rate);
        debug_assert_eq!(self.pos % rate, 0);
        for block in 0..nblocks {
            keccak_f1600(&mut self.lanes);
            let chunk = &mut out[block * rate..(block + 1) * rate];
            for (i, byte) in chunk.iter_mut().enumerate() {
                *byte = (self.lanes[i / 8] >> (8 * (i % 8))) as u8;
            }
        }
    }

    /// Zero the state, absorb `input` and pad, all in one shot.
    pub fn absorb_once(&mut self, rate: usize, input: &[u8], domsep: u8) {
        self.reset();
        self.absorb(rate, input);
        self.finalize(rate, domsep);
    }
}

/// Initialize `state` as the SHAKE128 stream keyed by `seed || LE16(nonce)`.
pub fn shake128_stream_init(state: &mut KeccakState, seed: &[u8], nonce: u16) {
    state.reset();
    state.absorb(SHAKE128_RATE, seed);
    state.absorb(SHAKE128_RATE, &nonce.to_le_bytes());
    state.finalize(SHAKE128_RATE, SHAKE_DOMSEP);
}

/// Initialize `state` as the SHAKE256 stream keyed by `seed || LE16(nonce)`.
pub fn shake256_stream_init(state: &mut KeccakState, seed: &[u8], nonce: u16) {
    state.reset();
    state.absorb(SHAKE256_RATE, seed);
    state.absorb(SHAKE256_RATE, &nonce.to_le_bytes());
    state.finalize(SHAKE256_RATE, SHAKE_DOMSEP);
}

/// SHAKE-128 extendable output function.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ShakeXof128 {
    state: KeccakState,
    squeezing: bool,
}

/// SHAKE-256 extendable output function.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ShakeXof256 {
    state: KeccakState,
    squeezing: bool,
}

macro_rules! impl_shake_xof {
    ($name:ident, $rate:expr, $bits:expr) => {
        impl ExtendableOutputFunction for $name {
            fn new() -> Self {
                $name {
                    state: KeccakState::init(),
                    squeezing: false,
                }
            }

            fn update(&mut self, data: &[u8]) -> Result<()> {
                if self.squeezing {
                    return Err(Error::XofState {
                        reason: "update after squeezing has started",
                    });
                }
                self.state.absorb($rate, data);
                Ok(())
            }

            fn finalize(&mut self) -> Result<()> {
                if !self.squeezing {
                    self.state.finalize($rate, SHAKE_DOMSEP);
                    self.squeezing = true;
                }
                Ok(())
            }

            fn squeeze(&mut self, output: &mut [u8]) -> Result<()> {
                self.finalize()?;
                self.state.squeeze($rate, output);
                Ok(())
            }

            #[cfg(feature = "alloc")]
            fn squeeze_into_vec(&mut self, len: usize) -> Result<Vec<u8>> {
                if len == 0 {
                    return Err(Error::Parameter {
                        name: "output_length",
                        reason: "must be greater than 0",
                    });
                }
                let mut out = vec![0u8; len];
                self.squeeze(&mut out)?;
                Ok(out)
            }

            fn reset(&mut self) -> Result<()> {
                self.state.reset();
                self.squeezing = false;
                Ok(())
            }

            fn security_level() -> usize {
                $bits
            }
        }
    };
}

impl_shake_xof!(ShakeXof128, SHAKE128_RATE, 128);
impl_shake_xof!(ShakeXof256, SHAKE256_RATE, 256);

#[cfg(test)]
mod tests;
