//! Polynomials in R_q = Z_q[X]/(X^256 + 1).
//!
//! A `Poly` is a plain array of 256 signed coefficients. Whether it
//! currently holds standard or NTT-domain values is a property of the call
//! site, not the type; every operation documents the domain and coefficient
//! range it expects and produces. Additions and subtractions are performed
//! without modular reduction, so callers batch them and reduce once.

use algorithms::xof::shake::{
    shake128_stream_init, shake256_stream_init, KeccakState, SHAKE128_RATE, SHAKE256_RATE,
};
use params::pqc::dilithium::{
    DilithiumSchemeParams, CRHBYTES, DILITHIUM_N, SEEDBYTES,
};
use zeroize::Zeroize;

use super::encoding;
use super::field::{caddq, montgomery_reduce, reduce32};
use super::ntt;
use super::rounding;
use super::sampling::{rej_eta, rej_uniform};

/// Blocks of SHAKE128 output needed to sample a uniform polynomial with
/// high probability in one pass: 256 coefficients at 3 bytes each.
const UNIFORM_NBLOCKS: usize = (768 + SHAKE128_RATE - 1) / SHAKE128_RATE;

/// A polynomial with 256 coefficients.
#[derive(Clone, Copy, Zeroize)]
pub struct Poly {
    /// Coefficient array; index i holds the coefficient of X^i.
    pub coeffs: [i32; DILITHIUM_N],
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl Poly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Poly {
            coeffs: [0i32; DILITHIUM_N],
        }
    }

    /// Reduce all coefficients to representatives in [-6283009, 6283008].
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce32(*c);
        }
    }

    /// Add q to every negative coefficient.
    pub fn caddq(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = caddq(*c);
        }
    }

    /// Coefficient-wise addition without reduction.
    pub fn add_assign(&mut self, rhs: &Poly) {
        for (c, r) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *c += r;
        }
    }

    /// Coefficient-wise subtraction without reduction.
    pub fn sub_assign(&mut self, rhs: &Poly) {
        for (c, r) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *c -= r;
        }
    }

    /// Multiply by 2^D without reduction. Coefficients must stay below
    /// 2^{31-D} in absolute value.
    pub fn shiftl(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c <<= params::pqc::dilithium::DILITHIUM_D;
        }
    }

    /// Forward NTT in place. Expects standard representatives; output
    /// coefficients are bounded by 9q in absolute value.
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// Inverse NTT in place, multiplied by 2^32. Input coefficients must be
    /// below q in absolute value, output coefficients are again below q.
    pub fn invntt_tomont(&mut self) {
        ntt::invntt_tomont(&mut self.coeffs);
    }

    /// Pointwise product in the NTT domain, divided by 2^32.
    pub fn pointwise_montgomery(a: &Poly, b: &Poly) -> Poly {
        let mut c = Poly::zero();
        for i in 0..DILITHIUM_N {
            c.coeffs[i] = montgomery_reduce(a.coeffs[i] as i64 * b.coeffs[i] as i64);
        }
        c
    }

    /// Split into `(t0, t1)` with `self == t1 * 2^D + t0` coefficient-wise.
    /// Expects standard representatives.
    pub fn power2round(&self) -> (Poly, Poly) {
        let mut t0 = Poly::zero();
        let mut t1 = Poly::zero();
        for i in 0..DILITHIUM_N {
            let (a0, a1) = rounding::power2round(self.coeffs[i]);
            t0.coeffs[i] = a0;
            t1.coeffs[i] = a1;
        }
        (t0, t1)
    }

    /// Split into `(w0, w1)` with `self == w1 * 2*gamma2 + w0 (mod q)`
    /// coefficient-wise. Expects standard representatives.
    pub fn decompose<P: DilithiumSchemeParams>(&self) -> (Poly, Poly) {
        let mut w0 = Poly::zero();
        let mut w1 = Poly::zero();
        for i in 0..DILITHIUM_N {
            let (a0, a1) = rounding::decompose::<P>(self.coeffs[i]);
            w0.coeffs[i] = a0;
            w1.coeffs[i] = a1;
        }
        (w0, w1)
    }

    /// Compute the hint polynomial for the low/high split `(a0, a1)` and the
    /// number of set bits.
    pub fn make_hint<P: DilithiumSchemeParams>(a0: &Poly, a1: &Poly) -> (Poly, usize) {
        let mut h = Poly::zero();
        let mut weight = 0usize;
        for i in 0..DILITHIUM_N {
            h.coeffs[i] = rounding::make_hint::<P>(a0.coeffs[i], a1.coeffs[i]);
            weight += h.coeffs[i] as usize;
        }
        (h, weight)
    }

    /// Correct the high bits of `self` using the hint polynomial.
    pub fn use_hint<P: DilithiumSchemeParams>(&self, hint: &Poly) -> Poly {
        let mut r = Poly::zero();
        for i in 0..DILITHIUM_N {
            r.coeffs[i] = rounding::use_hint::<P>(self.coeffs[i], hint.coeffs[i]);
        }
        r
    }

    /// Check whether the infinity norm reaches `bound`. Expects coefficients
    /// reduced by `reduce()`. Returns true when the polynomial must be
    /// rejected; the accumulation is branch-free over all coefficients.
    pub fn chknorm(&self, bound: i32) -> bool {
        if bound > (params::pqc::dilithium::DILITHIUM_Q - 1) / 8 {
            return true;
        }

        let mut rejected = false;
        for &c in self.coeffs.iter() {
            // |c| via two's complement, valid because c != i32::MIN here
            let t = c - ((c >> 31) & (2 * c));
            rejected |= t >= bound;
        }
        rejected
    }

    /// Sample a polynomial with uniform coefficients in [0, q) from
    /// SHAKE128(seed || nonce).
    pub fn uniform(seed: &[u8; SEEDBYTES], nonce: u16) -> Poly {
        let mut state = KeccakState::init();
        shake128_stream_init(&mut state, seed, nonce);

        let mut buf = [0u8; UNIFORM_NBLOCKS * SHAKE128_RATE + 2];
        state.squeezeblocks(SHAKE128_RATE, UNIFORM_NBLOCKS, &mut buf);
        let mut buflen = UNIFORM_NBLOCKS * SHAKE128_RATE;

        let mut r = Poly::zero();
        let mut ctr = rej_uniform(&mut r.coeffs, &buf[..buflen]);

        // Retain the up-to-two leftover bytes of the previous batch so no
        // squeezed byte is skipped.
        while ctr < DILITHIUM_N {
            let off = buflen % 3;
            for i in 0..off {
                buf[i] = buf[buflen - off + i];
            }
            state.squeezeblocks(SHAKE128_RATE, 1, &mut buf[off..off + SHAKE128_RATE]);
            buflen = SHAKE128_RATE + off;
            ctr += rej_uniform(&mut r.coeffs[ctr..], &buf[..buflen]);
        }
        r
    }

    /// Sample a polynomial with uniform coefficients in [-eta, eta] from
    /// SHAKE256(seed || nonce).
    pub fn uniform_eta<P: DilithiumSchemeParams>(seed: &[u8; CRHBYTES], nonce: u16) -> Poly {
        // 136 bytes of nibbles suffice for eta = 2 with good probability,
        // 227 for eta = 4; round up to whole SHAKE256 blocks.
        let nblocks = if P::ETA == 2 {
            (136 + SHAKE256_RATE - 1) / SHAKE256_RATE
        } else {
            (227 + SHAKE256_RATE - 1) / SHAKE256_RATE
        };

        let mut state = KeccakState::init();
        shake256_stream_init(&mut state, seed, nonce);

        let mut buf = [0u8; 2 * SHAKE256_RATE];
        state.squeezeblocks(SHAKE256_RATE, nblocks, &mut buf);

        let mut r = Poly::zero();
        let mut ctr = rej_eta::<P>(&mut r.coeffs, &buf[..nblocks * SHAKE256_RATE]);

        while ctr < DILITHIUM_N {
            state.squeezeblocks(SHAKE256_RATE, 1, &mut buf[..SHAKE256_RATE]);
            ctr += rej_eta::<P>(&mut r.coeffs[ctr..], &buf[..SHAKE256_RATE]);
        }
        r
    }

    /// Sample a polynomial with uniform coefficients in
    /// [-(gamma1 - 1), gamma1] from SHAKE256(seed || nonce), by squeezing a
    /// packed z polynomial and unpacking it.
    pub fn uniform_gamma1<P: DilithiumSchemeParams>(seed: &[u8; CRHBYTES], nonce: u16) -> Poly {
        let nblocks = (P::POLYZ_PACKEDBYTES + SHAKE256_RATE - 1) / SHAKE256_RATE;

        let mut state = KeccakState::init();
        shake256_stream_init(&mut state, seed, nonce);

        let mut buf = [0u8; 5 * SHAKE256_RATE];
        state.squeezeblocks(SHAKE256_RATE, nblocks, &mut buf);

        let mut r = Poly::zero();
        encoding::unpack_z::<P>(&mut r, &buf[..P::POLYZ_PACKEDBYTES]);
        r
    }

    /// Sample the challenge polynomial: exactly tau coefficients in {-1, 1},
    /// the rest zero, from SHAKE256(seed).
    ///
    /// Positions are chosen by an in-place Fisher-Yates walk over the last
    /// tau indices; signs come from the first 64 squeezed bits.
    pub fn challenge<P: DilithiumSchemeParams>(seed: &[u8; SEEDBYTES]) -> Poly {
        let mut state = KeccakState::init();
        state.absorb_once(SHAKE256_RATE, seed, 0x1F);

        let mut buf = [0u8; SHAKE256_RATE];
        state.squeezeblocks(SHAKE256_RATE, 1, &mut buf);

        let mut signs = 0u64;
        for i in 0..8 {
            signs |= (buf[i] as u64) << (8 * i);
        }
        let mut pos = 8usize;

        let mut c = Poly::zero();
        for i in (DILITHIUM_N - P::TAU)..DILITHIUM_N {
            let b = loop {
                if pos >= SHAKE256_RATE {
                    state.squeezeblocks(SHAKE256_RATE, 1, &mut buf);
                    pos = 0;
                }
                let b = buf[pos] as usize;
                pos += 1;
                if b <= i {
                    break b;
                }
            };

            c.coeffs[i] = c.coeffs[b];
            c.coeffs[b] = 1 - 2 * ((signs & 1) as i32);
            signs >>= 1;
        }
        c
    }
}
