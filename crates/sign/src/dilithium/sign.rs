//! Key generation, signing and verification.
//!
//! Implements the Fiat-Shamir-with-Aborts signature flow. Signing is
//! deterministic: all per-signature randomness is derived from the secret
//! key and the message, so identical inputs produce identical signatures. A
//! randomized variant differs only in how the masking seed rho-prime is
//! produced.
//!
//! Rejection bounds enforced by the signing loop:
//! - `||z||_inf < gamma1 - beta` (prevents key recovery from z)
//! - `||LowBits(w - c*s2)||_inf < gamma2 - beta` (hides the low bits)
//! - `||c*t0||_inf < gamma2` and hint weight <= omega (compressibility)

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use algorithms::xof::shake::ShakeXof256;
use algorithms::xof::ExtendableOutputFunction;
use params::pqc::dilithium::{DilithiumSchemeParams, CRHBYTES, SEEDBYTES};
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::encoding::{pack_pk, pack_sig, pack_sk, pack_w1_vec, unpack_pk, unpack_sig, unpack_sk};
use super::poly::Poly;
use super::polyvec::{Matrix, PolyVecK, PolyVecL};
use crate::error::{Error, Result};

/// Map a failed randomness request onto the crate error type.
#[cfg(feature = "std")]
fn rng_failure(err: rand::Error) -> Error {
    Error::Rng {
        context: "fill_bytes",
        message: err.to_string(),
    }
}

#[cfg(not(feature = "std"))]
fn rng_failure(_: rand::Error) -> Error {
    Error::Rng {
        context: "fill_bytes",
    }
}

/// Generate a key pair from a 32-byte seed. Deterministic; the seed is the
/// only input, so a fixed seed reproduces the reference known-answer keys.
pub(crate) fn keypair_internal<P: DilithiumSchemeParams>(
    zeta: &[u8; SEEDBYTES],
) -> Result<(Vec<u8>, Vec<u8>)> {
    // Expand the master seed into (rho, rhoprime, key).
    let mut xof = ShakeXof256::new();
    xof.update(zeta)?;
    let mut seedbuf = [0u8; 2 * SEEDBYTES + CRHBYTES];
    xof.squeeze(&mut seedbuf)?;

    let mut rho = [0u8; SEEDBYTES];
    rho.copy_from_slice(&seedbuf[..SEEDBYTES]);
    let mut rhoprime = [0u8; CRHBYTES];
    rhoprime.copy_from_slice(&seedbuf[SEEDBYTES..SEEDBYTES + CRHBYTES]);
    let mut key = [0u8; SEEDBYTES];
    key.copy_from_slice(&seedbuf[SEEDBYTES + CRHBYTES..]);
    seedbuf.zeroize();

    // A stays in the NTT domain for its whole lifetime.
    let mat = Matrix::<P>::expand(&rho);

    let mut s1 = PolyVecL::<P>::uniform_eta(&rhoprime, 0);
    let mut s2 = PolyVecK::<P>::uniform_eta(&rhoprime, P::L_DIM as u16);
    rhoprime.zeroize();

    // t = A*s1 + s2
    let mut s1hat = s1.clone();
    s1hat.ntt();
    let mut t = mat.pointwise_montgomery(&s1hat);
    s1hat.zeroize();
    t.reduce();
    t.invntt_tomont();
    t.add_assign(&s2);
    t.caddq();

    let (mut t0, t1) = t.power2round();
    let pk = pack_pk::<P>(&rho, &t1);

    // tr = H(pk), bound into the message digest at signing time.
    let mut xof = ShakeXof256::new();
    xof.update(&pk)?;
    let mut tr = [0u8; SEEDBYTES];
    xof.squeeze(&mut tr)?;

    let sk = pack_sk::<P>(&rho, &tr, &key, &t0, &s1, &s2);

    key.zeroize();
    s1.zeroize();
    s2.zeroize();
    t0.zeroize();

    Ok((pk, sk))
}

/// Generate a key pair from an external randomness source.
pub(crate) fn keypair_from_rng<P, R>(rng: &mut R) -> Result<(Vec<u8>, Vec<u8>)>
where
    P: DilithiumSchemeParams,
    R: RngCore + CryptoRng,
{
    let mut zeta = [0u8; SEEDBYTES];
    rng.try_fill_bytes(&mut zeta).map_err(rng_failure)?;
    let result = keypair_internal::<P>(&zeta);
    zeta.zeroize();
    result
}

/// mu = H(tr || m, 64).
fn message_digest(tr: &[u8; SEEDBYTES], message: &[u8]) -> Result<[u8; CRHBYTES]> {
    let mut xof = ShakeXof256::new();
    xof.update(tr)?;
    xof.update(message)?;
    let mut mu = [0u8; CRHBYTES];
    xof.squeeze(&mut mu)?;
    Ok(mu)
}

/// Deterministic signing: rho-prime = H(key || mu, 64).
pub(crate) fn sign_internal<P: DilithiumSchemeParams>(
    message: &[u8],
    sk_bytes: &[u8],
) -> Result<Vec<u8>> {
    let (rho, tr, mut key, mut t0, mut s1, mut s2) = unpack_sk::<P>(sk_bytes)?;
    let mu = message_digest(&tr, message)?;

    let mut xof = ShakeXof256::new();
    xof.update(&key)?;
    xof.update(&mu)?;
    let mut rhoprime = [0u8; CRHBYTES];
    xof.squeeze(&mut rhoprime)?;

    let sig = sign_from_parts::<P>(&rho, &mut t0, &mut s1, &mut s2, &mu, &rhoprime);
    key.zeroize();
    rhoprime.zeroize();
    sig
}

/// Randomized signing: rho-prime is drawn from the RNG; every other step is
/// identical to the deterministic path, including all rejection bounds.
pub(crate) fn sign_internal_randomized<P, R>(
    message: &[u8],
    sk_bytes: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>>
where
    P: DilithiumSchemeParams,
    R: RngCore + CryptoRng,
{
    let (rho, tr, mut key, mut t0, mut s1, mut s2) = unpack_sk::<P>(sk_bytes)?;
    let mu = message_digest(&tr, message)?;

    let mut rhoprime = [0u8; CRHBYTES];
    rng.try_fill_bytes(&mut rhoprime).map_err(rng_failure)?;

    let sig = sign_from_parts::<P>(&rho, &mut t0, &mut s1, &mut s2, &mu, &rhoprime);
    key.zeroize();
    rhoprime.zeroize();
    sig
}

/// The rejection-sampling loop shared by both signing variants. Consumes
/// the secret vectors (transforming them into the NTT domain in place) and
/// wipes them before returning.
fn sign_from_parts<P: DilithiumSchemeParams>(
    rho: &[u8; SEEDBYTES],
    t0: &mut PolyVecK<P>,
    s1: &mut PolyVecL<P>,
    s2: &mut PolyVecK<P>,
    mu: &[u8; CRHBYTES],
    rhoprime: &[u8; CRHBYTES],
) -> Result<Vec<u8>> {
    let mat = Matrix::<P>::expand(rho);
    s1.ntt();
    s2.ntt();
    t0.ntt();

    let mut nonce: u16 = 0;
    let result = loop {
        if nonce >= P::MAX_SIGN_ATTEMPTS {
            break Err(Error::SignatureGeneration {
                algorithm: P::NAME,
                #[cfg(feature = "std")]
                details: format!("no valid signature after {} attempts", nonce),
            });
        }

        if let Some(sig) = sign_attempt::<P>(&mat, t0, s1, s2, mu, rhoprime, nonce)? {
            break Ok(sig);
        }
        nonce += 1;
    };

    s1.zeroize();
    s2.zeroize();
    t0.zeroize();
    result
}

/// One iteration of the abort loop. Returns `None` when a rejection bound
/// fires and the caller must retry with the next nonce. The secret vectors
/// are already in the NTT domain.
fn sign_attempt<P: DilithiumSchemeParams>(
    mat: &Matrix<P>,
    t0hat: &PolyVecK<P>,
    s1hat: &PolyVecL<P>,
    s2hat: &PolyVecK<P>,
    mu: &[u8; CRHBYTES],
    rhoprime: &[u8; CRHBYTES],
    nonce: u16,
) -> Result<Option<Vec<u8>>> {
    let mut y = PolyVecL::<P>::uniform_gamma1(rhoprime, nonce);

    // w = invNTT(A * NTT(y))
    let mut yhat = y.clone();
    yhat.ntt();
    let mut w = mat.pointwise_montgomery(&yhat);
    yhat.zeroize();
    w.reduce();
    w.invntt_tomont();
    w.caddq();

    let (mut w0, w1) = w.decompose();
    let w1_packed = pack_w1_vec::<P>(&w1);

    // c_tilde = H(mu || w1)
    let mut xof = ShakeXof256::new();
    xof.update(mu)?;
    xof.update(&w1_packed)?;
    let mut c_tilde = [0u8; SEEDBYTES];
    xof.squeeze(&mut c_tilde)?;

    let mut cp = Poly::challenge::<P>(&c_tilde);
    cp.ntt();

    // z = y + invNTT(c * s1)
    let mut z = s1hat.pointwise_poly_montgomery(&cp);
    z.invntt_tomont();
    z.add_assign(&y);
    y.zeroize();
    z.reduce();
    if z.chknorm(P::GAMMA1 - P::BETA) {
        z.zeroize();
        return Ok(None);
    }

    // r0 = w0 - invNTT(c * s2); rejecting on its norm keeps the low bits of
    // w independent of the secret.
    let mut cs2 = s2hat.pointwise_poly_montgomery(&cp);
    cs2.invntt_tomont();
    w0.sub_assign(&cs2);
    cs2.zeroize();
    w0.reduce();
    if w0.chknorm(P::GAMMA2 - P::BETA) {
        z.zeroize();
        return Ok(None);
    }

    // ct0 feeds the hint; its norm must stay below gamma2.
    let mut ct0 = t0hat.pointwise_poly_montgomery(&cp);
    ct0.invntt_tomont();
    ct0.reduce();
    if ct0.chknorm(P::GAMMA2) {
        z.zeroize();
        return Ok(None);
    }

    w0.add_assign(&ct0);
    let (h, weight) = PolyVecK::make_hint(&w0, &w1);
    if weight > P::OMEGA {
        z.zeroize();
        return Ok(None);
    }

    let sig = pack_sig::<P>(&c_tilde, &z, &h)?;
    Ok(Some(sig))
}

/// Verify a signature. Every reject path reports the same verdict to the
/// caller after conversion to the public error type; the distinct internal
/// variants exist for testing.
pub(crate) fn verify_internal<P: DilithiumSchemeParams>(
    message: &[u8],
    sig_bytes: &[u8],
    pk_bytes: &[u8],
) -> Result<()> {
    let (rho, t1) = unpack_pk::<P>(pk_bytes)?;
    let (c_tilde, z, h) = unpack_sig::<P>(sig_bytes)?;

    if z.chknorm(P::GAMMA1 - P::BETA) {
        return Err(Error::Verification { algorithm: P::NAME });
    }

    // mu = H(H(pk) || m)
    let mut xof = ShakeXof256::new();
    xof.update(pk_bytes)?;
    let mut tr = [0u8; SEEDBYTES];
    xof.squeeze(&mut tr)?;
    let mu = message_digest(&tr, message)?;

    let mut cp = Poly::challenge::<P>(&c_tilde);
    cp.ntt();
    let mat = Matrix::<P>::expand(&rho);

    let mut zhat = z;
    zhat.ntt();
    let mut w1 = mat.pointwise_montgomery(&zhat);

    // Reconstruct the commitment: w' = A*z - c * t1 * 2^D
    let mut t1hat = t1;
    t1hat.shiftl();
    t1hat.ntt();
    let ct1 = t1hat.pointwise_poly_montgomery(&cp);

    w1.sub_assign(&ct1);
    w1.reduce();
    w1.invntt_tomont();
    w1.caddq();
    let w1 = w1.use_hint(&h);
    let w1_packed = pack_w1_vec::<P>(&w1);

    let mut xof = ShakeXof256::new();
    xof.update(&mu)?;
    xof.update(&w1_packed)?;
    let mut c_tilde2 = [0u8; SEEDBYTES];
    xof.squeeze(&mut c_tilde2)?;

    if bool::from(c_tilde[..].ct_eq(&c_tilde2[..])) {
        Ok(())
    } else {
        Err(Error::Verification { algorithm: P::NAME })
    }
}
