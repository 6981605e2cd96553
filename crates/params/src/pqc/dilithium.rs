//! Constants for the Dilithium digital signature algorithm.
//!
//! The three NIST security levels (2, 3, 5) share the ring parameters `N`,
//! `Q` and `D` and differ in the module dimensions and norm bounds below.
//! All byte sizes are those of the round-3 reference implementation, so keys
//! and signatures produced here are bit-compatible with its known-answer
//! tests.

/// Polynomial degree (always 256 for Dilithium).
pub const DILITHIUM_N: usize = 256;

/// Prime modulus q = 2^23 - 2^13 + 1.
pub const DILITHIUM_Q: i32 = 8380417;

/// Number of bits dropped from t by Power2Round.
pub const DILITHIUM_D: usize = 13;

/// Size of the seeds rho, key and tr, and of the challenge seed c-tilde.
pub const SEEDBYTES: usize = 32;

/// Size of the collision-resistant-hash outputs mu and rho-prime.
pub const CRHBYTES: usize = 64;

/// Packed size of a t1 polynomial (10 bits per coefficient).
pub const POLYT1_PACKEDBYTES: usize = 320;

/// Packed size of a t0 polynomial (13 bits per coefficient).
pub const POLYT0_PACKEDBYTES: usize = 416;

/// Common trait for Dilithium parameter sets.
///
/// Implementations are empty marker types; all information lives in the
/// associated constants, so the compiler specializes every generic function
/// per level with no run-time dispatch and no process-wide mutable
/// configuration.
pub trait DilithiumSchemeParams: Send + Sync + 'static {
    /// Algorithm name as it appears in NIST KAT files.
    const NAME: &'static str;

    /// Rows of the matrix A; length of t, s2, w and h.
    const K_DIM: usize;
    /// Columns of the matrix A; length of s1, y and z.
    const L_DIM: usize;

    /// Infinity-norm bound of the secret vectors s1, s2.
    const ETA: i32;
    /// Number of +-1 coefficients in the challenge polynomial.
    const TAU: usize;
    /// Rejection bound offset, beta = tau * eta.
    const BETA: i32;
    /// Range of the masking vector y.
    const GAMMA1: i32;
    /// Low-order rounding range; alpha = 2 * gamma2.
    const GAMMA2: i32;
    /// Maximum weight of the hint vector h.
    const OMEGA: usize;

    /// Packed size of an eta polynomial (s1/s2 entries).
    const POLYETA_PACKEDBYTES: usize;
    /// Packed size of a w1 polynomial.
    const POLYW1_PACKEDBYTES: usize;
    /// Packed size of a z (or y) polynomial.
    const POLYZ_PACKEDBYTES: usize;

    /// Public key size: rho plus K packed t1 polynomials.
    const PUBLIC_KEY_BYTES: usize;
    /// Secret key size: rho, key, tr, packed s1, s2 and t0.
    const SECRET_KEY_BYTES: usize;
    /// Signature size: c-tilde, packed z and the hint section.
    const SIGNATURE_BYTES: usize;

    /// Defensive cap on the rejection-sampling loop in signing. The loop
    /// terminates after 4-7 iterations in practice; hitting this cap means a
    /// broken sampler, not bad luck.
    const MAX_SIGN_ATTEMPTS: u16 = 1024;
}

/// Dilithium2 (NIST security level 2).
pub struct Dilithium2Params;

impl DilithiumSchemeParams for Dilithium2Params {
    const NAME: &'static str = "Dilithium2";
    const K_DIM: usize = 4;
    const L_DIM: usize = 4;
    const ETA: i32 = 2;
    const TAU: usize = 39;
    const BETA: i32 = 78;
    const GAMMA1: i32 = 1 << 17;
    const GAMMA2: i32 = (DILITHIUM_Q - 1) / 88;
    const OMEGA: usize = 80;
    const POLYETA_PACKEDBYTES: usize = 96;
    const POLYW1_PACKEDBYTES: usize = 192;
    const POLYZ_PACKEDBYTES: usize = 576;
    const PUBLIC_KEY_BYTES: usize = SEEDBYTES + 4 * POLYT1_PACKEDBYTES;
    const SECRET_KEY_BYTES: usize =
        3 * SEEDBYTES + 8 * Self::POLYETA_PACKEDBYTES + 4 * POLYT0_PACKEDBYTES;
    const SIGNATURE_BYTES: usize = SEEDBYTES + 4 * Self::POLYZ_PACKEDBYTES + Self::OMEGA + 4;
}

/// Dilithium3 (NIST security level 3).
pub struct Dilithium3Params;

impl DilithiumSchemeParams for Dilithium3Params {
    const NAME: &'static str = "Dilithium3";
    const K_DIM: usize = 6;
    const L_DIM: usize = 5;
    const ETA: i32 = 4;
    const TAU: usize = 49;
    const BETA: i32 = 196;
    const GAMMA1: i32 = 1 << 19;
    const GAMMA2: i32 = (DILITHIUM_Q - 1) / 32;
    const OMEGA: usize = 55;
    const POLYETA_PACKEDBYTES: usize = 128;
    const POLYW1_PACKEDBYTES: usize = 128;
    const POLYZ_PACKEDBYTES: usize = 640;
    const PUBLIC_KEY_BYTES: usize = SEEDBYTES + 6 * POLYT1_PACKEDBYTES;
    const SECRET_KEY_BYTES: usize =
        3 * SEEDBYTES + 11 * Self::POLYETA_PACKEDBYTES + 6 * POLYT0_PACKEDBYTES;
    const SIGNATURE_BYTES: usize = SEEDBYTES + 5 * Self::POLYZ_PACKEDBYTES + Self::OMEGA + 6;
}

/// Dilithium5 (NIST security level 5).
pub struct Dilithium5Params;

impl DilithiumSchemeParams for Dilithium5Params {
    const NAME: &'static str = "Dilithium5";
    const K_DIM: usize = 8;
    const L_DIM: usize = 7;
    const ETA: i32 = 2;
    const TAU: usize = 60;
    const BETA: i32 = 120;
    const GAMMA1: i32 = 1 << 19;
    const GAMMA2: i32 = (DILITHIUM_Q - 1) / 32;
    const OMEGA: usize = 75;
    const POLYETA_PACKEDBYTES: usize = 96;
    const POLYW1_PACKEDBYTES: usize = 128;
    const POLYZ_PACKEDBYTES: usize = 640;
    const PUBLIC_KEY_BYTES: usize = SEEDBYTES + 8 * POLYT1_PACKEDBYTES;
    const SECRET_KEY_BYTES: usize =
        3 * SEEDBYTES + 15 * Self::POLYETA_PACKEDBYTES + 8 * POLYT0_PACKEDBYTES;
    const SIGNATURE_BYTES: usize = SEEDBYTES + 7 * Self::POLYZ_PACKEDBYTES + Self::OMEGA + 8;
}
