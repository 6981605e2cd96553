//! Coefficient rounding: Power2Round, Decompose, MakeHint and UseHint.
//!
//! These primitives drive signature compression: the signer commits only to
//! high-order bits of w and ships one hint bit per coefficient that needed a
//! carry, and the verifier reconstructs the same high bits from A*z - c*t1.
//! All arithmetic is branch-free with respect to the coefficient value; the
//! two gamma2 schemes are selected by the parameter type at compile time.

use params::pqc::dilithium::{DilithiumSchemeParams, DILITHIUM_D, DILITHIUM_Q};

/// Split `a` into `(a0, a1)` with `a == a1 * 2^D + a0` and
/// `a0` in `(-2^{D-1}, 2^{D-1}]`. Expects a standard representative.
#[inline(always)]
pub fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (DILITHIUM_D - 1)) - 1) >> DILITHIUM_D;
    let a0 = a - (a1 << DILITHIUM_D);
    (a0, a1)
}

/// Split `a` into `(a0, a1)` with `a == a1 * 2*gamma2 + a0 (mod q)` and
/// `|a0| <= gamma2`, except that the top bucket wraps: when a1 would equal
/// (q-1)/(2*gamma2) it becomes 0 and a0 takes `a mod q - q`. Expects a
/// standard representative.
#[inline(always)]
pub fn decompose<P: DilithiumSchemeParams>(a: i32) -> (i32, i32) {
    let mut a1 = (a + 127) >> 7;

    if P::GAMMA2 == (DILITHIUM_Q - 1) / 32 {
        a1 = (a1 * 1025 + (1 << 21)) >> 22;
        a1 &= 15;
    } else {
        a1 = (a1 * 11275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
    }

    let mut a0 = a - a1 * 2 * P::GAMMA2;
    a0 -= (((DILITHIUM_Q - 1) / 2 - a0) >> 31) & DILITHIUM_Q;
    (a0, a1)
}

/// Hint bit: 1 iff adding `a0` carries into the high bits of the sum.
#[inline(always)]
pub fn make_hint<P: DilithiumSchemeParams>(a0: i32, a1: i32) -> i32 {
    if a0 > P::GAMMA2 || a0 < -P::GAMMA2 || (a0 == -P::GAMMA2 && a1 != 0) {
        1
    } else {
        0
    }
}

/// Recover the high bits of `a + correction` from `a` and the hint bit.
#[inline(always)]
pub fn use_hint<P: DilithiumSchemeParams>(a: i32, hint: i32) -> i32 {
    let (a0, a1) = decompose::<P>(a);
    if hint == 0 {
        return a1;
    }

    if P::GAMMA2 == (DILITHIUM_Q - 1) / 32 {
        if a0 > 0 {
            (a1 + 1) & 15
        } else {
            (a1 - 1) & 15
        }
    } else if a0 > 0 {
        if a1 == 43 {
            0
        } else {
            a1 + 1
        }
    } else if a1 == 0 {
        43
    } else {
        a1 - 1
    }
}
