//! Scalar arithmetic in Z_q for q = 8380417.
//!
//! Coefficients are signed 32-bit integers; products are computed in 64 bits
//! and brought back with Montgomery reduction (R = 2^32). All helpers are
//! branch-free.

use params::pqc::dilithium::DILITHIUM_Q;

/// q^{-1} mod 2^32.
pub const QINV: i32 = 58728449;

/// Montgomery reduction.
///
/// For `|a| < q * 2^31` returns `r` with `r == a * 2^{-32} (mod q)` and
/// `|r| < q`.
#[inline(always)]
pub fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - (t as i64) * (DILITHIUM_Q as i64)) >> 32) as i32
}

/// Partial reduction modulo q.
///
/// For `a <= 2^31 - 2^22 - 1` returns `r` with `r == a (mod q)` and
/// `-6283009 <= r <= 6283008`.
#[inline(always)]
pub fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * DILITHIUM_Q
}

/// Add q if the input is negative.
#[inline(always)]
pub fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & DILITHIUM_Q)
}
