//! Bit-packing codecs for keys and signatures.
//!
//! Every codec is a pack/unpack pair kept adjacent, and every byte layout is
//! that of the round-3 reference implementation. Polynomial-level codecs are
//! infallible on valid inputs; the frame-level decoders validate lengths and
//! the hint-section structure and reject anything malformed.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

use params::pqc::dilithium::{
    DilithiumSchemeParams, DILITHIUM_D, DILITHIUM_N, POLYT0_PACKEDBYTES, POLYT1_PACKEDBYTES,
    SEEDBYTES,
};

use super::poly::Poly;
use super::polyvec::{PolyVecK, PolyVecL};
use crate::error::{Error, Result};

/// 2^{D-1}, the packing offset for t0 coefficients.
const D_SHL: i32 = 1 << (DILITHIUM_D - 1);

/// Pack t1 coefficients (10 bits each, non-negative): 4 coefficients into 5
/// bytes.
pub fn pack_t1(r: &mut [u8], a: &Poly) {
    for i in 0..DILITHIUM_N / 4 {
        let c = &a.coeffs[4 * i..4 * i + 4];
        r[5 * i] = c[0] as u8;
        r[5 * i + 1] = ((c[0] >> 8) | (c[1] << 2)) as u8;
        r[5 * i + 2] = ((c[1] >> 6) | (c[2] << 4)) as u8;
        r[5 * i + 3] = ((c[2] >> 4) | (c[3] << 6)) as u8;
        r[5 * i + 4] = (c[3] >> 2) as u8;
    }
}

/// Unpack t1; output coefficients are in [0, 1024).
pub fn unpack_t1(r: &mut Poly, a: &[u8]) {
    for i in 0..DILITHIUM_N / 4 {
        let b = &a[5 * i..5 * i + 5];
        r.coeffs[4 * i] = ((b[0] as i32) | ((b[1] as i32) << 8)) & 0x3FF;
        r.coeffs[4 * i + 1] = (((b[1] as i32) >> 2) | ((b[2] as i32) << 6)) & 0x3FF;
        r.coeffs[4 * i + 2] = (((b[2] as i32) >> 4) | ((b[3] as i32) << 4)) & 0x3FF;
        r.coeffs[4 * i + 3] = (((b[3] as i32) >> 6) | ((b[4] as i32) << 2)) & 0x3FF;
    }
}

/// Pack t0 coefficients (13 bits each, centered around 2^{D-1}): 8
/// coefficients into 13 bytes. Encodes `2^{D-1} - c`.
pub fn pack_t0(r: &mut [u8], a: &Poly) {
    let mut t = [0i32; 8];
    for i in 0..DILITHIUM_N / 8 {
        for j in 0..8 {
            t[j] = D_SHL - a.coeffs[8 * i + j];
        }

        let r = &mut r[13 * i..13 * i + 13];
        r[0] = t[0] as u8;
        r[1] = ((t[0] >> 8) | (t[1] << 5)) as u8;
        r[2] = (t[1] >> 3) as u8;
        r[3] = ((t[1] >> 11) | (t[2] << 2)) as u8;
        r[4] = ((t[2] >> 6) | (t[3] << 7)) as u8;
        r[5] = (t[3] >> 1) as u8;
        r[6] = ((t[3] >> 9) | (t[4] << 4)) as u8;
        r[7] = (t[4] >> 4) as u8;
        r[8] = ((t[4] >> 12) | (t[5] << 1)) as u8;
        r[9] = ((t[5] >> 7) | (t[6] << 6)) as u8;
        r[10] = (t[6] >> 2) as u8;
        r[11] = ((t[6] >> 10) | (t[7] << 3)) as u8;
        r[12] = (t[7] >> 5) as u8;
    }
}

/// Unpack t0; output coefficients are in (-2^{D-1}, 2^{D-1}].
pub fn unpack_t0(r: &mut Poly, a: &[u8]) {
    for i in 0..DILITHIUM_N / 8 {
        let b = &a[13 * i..13 * i + 13];
        let c = &mut r.coeffs[8 * i..8 * i + 8];

        c[0] = ((b[0] as i32) | ((b[1] as i32) << 8)) & 0x1FFF;
        c[1] = (((b[1] as i32) >> 5) | ((b[2] as i32) << 3) | ((b[3] as i32) << 11)) & 0x1FFF;
        c[2] = (((b[3] as i32) >> 2) | ((b[4] as i32) << 6)) & 0x1FFF;
        c[3] = (((b[4] as i32) >> 7) | ((b[5] as i32) << 1) | ((b[6] as i32) << 9)) & 0x1FFF;
        c[4] = (((b[6] as i32) >> 4) | ((b[7] as i32) << 4) | ((b[8] as i32) << 12)) & 0x1FFF;
        c[5] = (((b[8] as i32) >> 1) | ((b[9] as i32) << 7)) & 0x1FFF;
        c[6] = (((b[9] as i32) >> 6) | ((b[10] as i32) << 2) | ((b[11] as i32) << 10)) & 0x1FFF;
        c[7] = (((b[11] as i32) >> 3) | ((b[12] as i32) << 5)) & 0x1FFF;

        for v in c.iter_mut() {
            *v = D_SHL - *v;
        }
    }
}

/// Pack eta coefficients (s1/s2 entries in [-eta, eta]). Encodes `eta - c`
/// in 3 bits for eta = 2 and 4 bits for eta = 4.
pub fn pack_eta<P: DilithiumSchemeParams>(r: &mut [u8], a: &Poly) {
    if P::ETA == 2 {
        let mut t = [0u8; 8];
        for i in 0..DILITHIUM_N / 8 {
            for j in 0..8 {
                t[j] = (P::ETA - a.coeffs[8 * i + j]) as u8;
            }
            r[3 * i] = t[0] | (t[1] << 3) | (t[2] << 6);
            r[3 * i + 1] = (t[2] >> 2) | (t[3] << 1) | (t[4] << 4) | (t[5] << 7);
            r[3 * i + 2] = (t[5] >> 1) | (t[6] << 2) | (t[7] << 5);
        }
    } else {
        for i in 0..DILITHIUM_N / 2 {
            let t0 = (P::ETA - a.coeffs[2 * i]) as u8;
            let t1 = (P::ETA - a.coeffs[2 * i + 1]) as u8;
            r[i] = t0 | (t1 << 4);
        }
    }
}

/// Unpack eta coefficients back into [-eta, eta].
pub fn unpack_eta<P: DilithiumSchemeParams>(r: &mut Poly, a: &[u8]) {
    if P::ETA == 2 {
        for i in 0..DILITHIUM_N / 8 {
            let b = &a[3 * i..3 * i + 3];
            let c = &mut r.coeffs[8 * i..8 * i + 8];

            c[0] = (b[0] & 0x07) as i32;
            c[1] = ((b[0] >> 3) & 0x07) as i32;
            c[2] = (((b[0] >> 6) | (b[1] << 2)) & 0x07) as i32;
            c[3] = ((b[1] >> 1) & 0x07) as i32;
            c[4] = ((b[1] >> 4) & 0x07) as i32;
            c[5] = (((b[1] >> 7) | (b[2] << 1)) & 0x07) as i32;
            c[6] = ((b[2] >> 2) & 0x07) as i32;
            c[7] = ((b[2] >> 5) & 0x07) as i32;

            for v in c.iter_mut() {
                *v = P::ETA - *v;
            }
        }
    } else {
        for i in 0..DILITHIUM_N / 2 {
            r.coeffs[2 * i] = P::ETA - (a[i] & 0x0F) as i32;
            r.coeffs[2 * i + 1] = P::ETA - (a[i] >> 4) as i32;
        }
    }
}

/// Pack z coefficients (in (-gamma1, gamma1]). Encodes `gamma1 - c` in 18
/// bits for gamma1 = 2^17 and 20 bits for gamma1 = 2^19.
pub fn pack_z<P: DilithiumSchemeParams>(r: &mut [u8], a: &Poly) {
    if P::GAMMA1 == 1 << 17 {
        let mut t = [0i32; 4];
        for i in 0..DILITHIUM_N / 4 {
            for j in 0..4 {
                t[j] = P::GAMMA1 - a.coeffs[4 * i + j];
            }

            let r = &mut r[9 * i..9 * i + 9];
            r[0] = t[0] as u8;
            r[1] = (t[0] >> 8) as u8;
            r[2] = ((t[0] >> 16) | (t[1] << 2)) as u8;
            r[3] = (t[1] >> 6) as u8;
            r[4] = ((t[1] >> 14) | (t[2] << 4)) as u8;
            r[5] = (t[2] >> 4) as u8;
            r[6] = ((t[2] >> 12) | (t[3] << 6)) as u8;
            r[7] = (t[3] >> 2) as u8;
            r[8] = (t[3] >> 10) as u8;
        }
    } else {
        for i in 0..DILITHIUM_N / 2 {
            let t0 = P::GAMMA1 - a.coeffs[2 * i];
            let t1 = P::GAMMA1 - a.coeffs[2 * i + 1];

            let r = &mut r[5 * i..5 * i + 5];
            r[0] = t0 as u8;
            r[1] = (t0 >> 8) as u8;
            r[2] = ((t0 >> 16) | (t1 << 4)) as u8;
            r[3] = (t1 >> 4) as u8;
            r[4] = (t1 >> 12) as u8;
        }
    }
}

/// Unpack z coefficients back into (-gamma1, gamma1].
pub fn unpack_z<P: DilithiumSchemeParams>(r: &mut Poly, a: &[u8]) {
    if P::GAMMA1 == 1 << 17 {
        for i in 0..DILITHIUM_N / 4 {
            let b = &a[9 * i..9 * i + 9];
            let c = &mut r.coeffs[4 * i..4 * i + 4];

            c[0] = ((b[0] as i32) | ((b[1] as i32) << 8) | ((b[2] as i32) << 16)) & 0x3FFFF;
            c[1] = (((b[2] as i32) >> 2) | ((b[3] as i32) << 6) | ((b[4] as i32) << 14)) & 0x3FFFF;
            c[2] = (((b[4] as i32) >> 4) | ((b[5] as i32) << 4) | ((b[6] as i32) << 12)) & 0x3FFFF;
            c[3] = (((b[6] as i32) >> 6) | ((b[7] as i32) << 2) | ((b[8] as i32) << 10)) & 0x3FFFF;

            for v in c.iter_mut() {
                *v = P::GAMMA1 - *v;
            }
        }
    } else {
        for i in 0..DILITHIUM_N / 2 {
            let b = &a[5 * i..5 * i + 5];

            let mut t0 = (b[0] as i32) | ((b[1] as i32) << 8) | ((b[2] as i32) << 16);
            t0 &= 0xFFFFF;
            let mut t1 = ((b[2] as i32) >> 4) | ((b[3] as i32) << 4) | ((b[4] as i32) << 12);
            t1 &= 0xFFFFF;

            r.coeffs[2 * i] = P::GAMMA1 - t0;
            r.coeffs[2 * i + 1] = P::GAMMA1 - t1;
        }
    }
}

/// Pack w1 coefficients: 6 bits each for gamma2 = (q-1)/88, 4 bits each for
/// gamma2 = (q-1)/32. Inputs are the non-negative Decompose high parts.
pub fn pack_w1<P: DilithiumSchemeParams>(r: &mut [u8], a: &Poly) {
    if P::POLYW1_PACKEDBYTES == 192 {
        for i in 0..DILITHIUM_N / 4 {
            let c = &a.coeffs[4 * i..4 * i + 4];
            r[3 * i] = (c[0] | (c[1] << 6)) as u8;
            r[3 * i + 1] = ((c[1] >> 2) | (c[2] << 4)) as u8;
            r[3 * i + 2] = ((c[2] >> 4) | (c[3] << 2)) as u8;
        }
    } else {
        for i in 0..DILITHIUM_N / 2 {
            r[i] = (a.coeffs[2 * i] | (a.coeffs[2 * i + 1] << 4)) as u8;
        }
    }
}

/// Pack the whole w1 vector for the commitment hash.
pub fn pack_w1_vec<P: DilithiumSchemeParams>(w1: &PolyVecK<P>) -> Vec<u8> {
    let mut out = vec![0u8; P::K_DIM * P::POLYW1_PACKEDBYTES];
    for (i, p) in w1.vec.iter().enumerate() {
        pack_w1::<P>(
            &mut out[i * P::POLYW1_PACKEDBYTES..(i + 1) * P::POLYW1_PACKEDBYTES],
            p,
        );
    }
    out
}

/// Pack the public key as `rho || t1`.
pub fn pack_pk<P: DilithiumSchemeParams>(rho: &[u8; SEEDBYTES], t1: &PolyVecK<P>) -> Vec<u8> {
    let mut pk = vec![0u8; P::PUBLIC_KEY_BYTES];
    pk[..SEEDBYTES].copy_from_slice(rho);
    for (i, p) in t1.vec.iter().enumerate() {
        let off = SEEDBYTES + i * POLYT1_PACKEDBYTES;
        pack_t1(&mut pk[off..off + POLYT1_PACKEDBYTES], p);
    }
    pk
}

/// Unpack a public key. Rejects wrong lengths.
pub fn unpack_pk<P: DilithiumSchemeParams>(pk: &[u8]) -> Result<([u8; SEEDBYTES], PolyVecK<P>)> {
    if pk.len() != P::PUBLIC_KEY_BYTES {
        return Err(Error::InvalidKeySize {
            expected: P::PUBLIC_KEY_BYTES,
            actual: pk.len(),
        });
    }

    let mut rho = [0u8; SEEDBYTES];
    rho.copy_from_slice(&pk[..SEEDBYTES]);

    let mut t1 = PolyVecK::<P>::zero();
    for (i, p) in t1.vec.iter_mut().enumerate() {
        let off = SEEDBYTES + i * POLYT1_PACKEDBYTES;
        unpack_t1(p, &pk[off..off + POLYT1_PACKEDBYTES]);
    }
    Ok((rho, t1))
}

/// Pack the secret key as `rho || key || tr || s1 || s2 || t0`.
pub fn pack_sk<P: DilithiumSchemeParams>(
    rho: &[u8; SEEDBYTES],
    tr: &[u8; SEEDBYTES],
    key: &[u8; SEEDBYTES],
    t0: &PolyVecK<P>,
    s1: &PolyVecL<P>,
    s2: &PolyVecK<P>,
) -> Vec<u8> {
    let mut sk = vec![0u8; P::SECRET_KEY_BYTES];
    let mut off = 0usize;

    sk[off..off + SEEDBYTES].copy_from_slice(rho);
    off += SEEDBYTES;
    sk[off..off + SEEDBYTES].copy_from_slice(key);
    off += SEEDBYTES;
    sk[off..off + SEEDBYTES].copy_from_slice(tr);
    off += SEEDBYTES;

    for p in s1.vec.iter() {
        pack_eta::<P>(&mut sk[off..off + P::POLYETA_PACKEDBYTES], p);
        off += P::POLYETA_PACKEDBYTES;
    }
    for p in s2.vec.iter() {
        pack_eta::<P>(&mut sk[off..off + P::POLYETA_PACKEDBYTES], p);
        off += P::POLYETA_PACKEDBYTES;
    }
    for p in t0.vec.iter() {
        pack_t0(&mut sk[off..off + POLYT0_PACKEDBYTES], p);
        off += POLYT0_PACKEDBYTES;
    }
    debug_assert_eq!(off, P::SECRET_KEY_BYTES);
    sk
}

/// Unpacked secret key components: `(rho, tr, key, t0, s1, s2)`.
pub type UnpackedSecretKey<P> = (
    [u8; SEEDBYTES],
    [u8; SEEDBYTES],
    [u8; SEEDBYTES],
    PolyVecK<P>,
    PolyVecL<P>,
    PolyVecK<P>,
);

/// Unpack a secret key. Rejects wrong lengths.
pub fn unpack_sk<P: DilithiumSchemeParams>(sk: &[u8]) -> Result<UnpackedSecretKey<P>> {
    if sk.len() != P::SECRET_KEY_BYTES {
        return Err(Error::InvalidKeySize {
            expected: P::SECRET_KEY_BYTES,
            actual: sk.len(),
        });
    }

    let mut off = 0usize;
    let mut rho = [0u8; SEEDBYTES];
    rho.copy_from_slice(&sk[off..off + SEEDBYTES]);
    off += SEEDBYTES;
    let mut key = [0u8; SEEDBYTES];
    key.copy_from_slice(&sk[off..off + SEEDBYTES]);
    off += SEEDBYTES;
    let mut tr = [0u8; SEEDBYTES];
    tr.copy_from_slice(&sk[off..off + SEEDBYTES]);
    off += SEEDBYTES;

    let mut s1 = PolyVecL::<P>::zero();
    for p in s1.vec.iter_mut() {
        unpack_eta::<P>(p, &sk[off..off + P::POLYETA_PACKEDBYTES]);
        off += P::POLYETA_PACKEDBYTES;
    }
    let mut s2 = PolyVecK::<P>::zero();
    for p in s2.vec.iter_mut() {
        unpack_eta::<P>(p, &sk[off..off + P::POLYETA_PACKEDBYTES]);
        off += P::POLYETA_PACKEDBYTES;
    }
    let mut t0 = PolyVecK::<P>::zero();
    for p in t0.vec.iter_mut() {
        unpack_t0(p, &sk[off..off + POLYT0_PACKEDBYTES]);
        off += POLYT0_PACKEDBYTES;
    }
    debug_assert_eq!(off, P::SECRET_KEY_BYTES);

    Ok((rho, tr, key, t0, s1, s2))
}

/// Pack the signature as `c_tilde || z || h`.
///
/// The hint section stores, for each of the k hint polynomials, the
/// ascending list of set coefficient indices, followed by the k cumulative
/// counts; unused index slots stay zero. Errors if the total hint weight
/// exceeds omega, which would indicate a broken signing loop.
pub fn pack_sig<P: DilithiumSchemeParams>(
    c_tilde: &[u8; SEEDBYTES],
    z: &PolyVecL<P>,
    h: &PolyVecK<P>,
) -> Result<Vec<u8>> {
    let mut sig = vec![0u8; P::SIGNATURE_BYTES];
    let mut off = 0usize;

    sig[..SEEDBYTES].copy_from_slice(c_tilde);
    off += SEEDBYTES;

    for p in z.vec.iter() {
        pack_z::<P>(&mut sig[off..off + P::POLYZ_PACKEDBYTES], p);
        off += P::POLYZ_PACKEDBYTES;
    }

    let hints = &mut sig[off..];
    let mut cnt = 0usize;
    for (i, p) in h.vec.iter().enumerate() {
        for (j, &bit) in p.coeffs.iter().enumerate() {
            if bit != 0 {
                if cnt >= P::OMEGA {
                    return Err(Error::Serialization {
                        context: "pack_sig",
                        #[cfg(feature = "std")]
                        message: "hint weight exceeds omega".into(),
                    });
                }
                hints[cnt] = j as u8;
                cnt += 1;
            }
        }
        hints[P::OMEGA + i] = cnt as u8;
    }
    Ok(sig)
}

/// Unpacked signature components: `(c_tilde, z, h)`.
pub type UnpackedSignature<P> = ([u8; SEEDBYTES], PolyVecL<P>, PolyVecK<P>);

/// Unpack a signature, enforcing the hint-section structure: cumulative
/// counts never decrease and never exceed omega, indices within one
/// polynomial strictly increase, and all unused slots are zero. Any
/// violation rejects the signature.
pub fn unpack_sig<P: DilithiumSchemeParams>(sig: &[u8]) -> Result<UnpackedSignature<P>> {
    if sig.len() != P::SIGNATURE_BYTES {
        return Err(Error::InvalidSignatureSize {
            expected: P::SIGNATURE_BYTES,
            actual: sig.len(),
        });
    }

    let mut off = 0usize;
    let mut c_tilde = [0u8; SEEDBYTES];
    c_tilde.copy_from_slice(&sig[..SEEDBYTES]);
    off += SEEDBYTES;

    let mut z = PolyVecL::<P>::zero();
    for p in z.vec.iter_mut() {
        unpack_z::<P>(p, &sig[off..off + P::POLYZ_PACKEDBYTES]);
        off += P::POLYZ_PACKEDBYTES;
    }

    let hints = &sig[off..];
    let mut h = PolyVecK::<P>::zero();
    let mut cnt = 0usize;
    for i in 0..P::K_DIM {
        let poly_cnt = hints[P::OMEGA + i] as usize;
        if poly_cnt < cnt || poly_cnt > P::OMEGA {
            return Err(Error::Deserialization {
                context: "unpack_sig",
                #[cfg(feature = "std")]
                message: "hint counts not monotone or above omega".into(),
            });
        }
        for j in cnt..poly_cnt {
            // Coefficient indices must be strictly increasing within a
            // polynomial's slice.
            if j > cnt && hints[j] <= hints[j - 1] {
                return Err(Error::Deserialization {
                    context: "unpack_sig",
                    #[cfg(feature = "std")]
                    message: "hint indices out of order".into(),
                });
            }
            h.vec[i].coeffs[hints[j] as usize] = 1;
        }
        cnt = poly_cnt;
    }
    for &slot in hints.iter().take(P::OMEGA).skip(cnt) {
        if slot != 0 {
            return Err(Error::Deserialization {
                context: "unpack_sig",
                #[cfg(feature = "std")]
                message: "nonzero hint padding".into(),
            });
        }
    }

    Ok((c_tilde, z, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use params::pqc::dilithium::{Dilithium2Params, Dilithium3Params, Dilithium5Params};

    type P2 = Dilithium2Params;
    type P3 = Dilithium3Params;
    type P5 = Dilithium5Params;

    fn poly_from_fn(f: impl Fn(usize) -> i32) -> Poly {
        let mut p = Poly::zero();
        for (i, c) in p.coeffs.iter_mut().enumerate() {
            *c = f(i);
        }
        p
    }

    #[test]
    fn t1_roundtrip() {
        let p = poly_from_fn(|i| (i as i32 * 37) % 1024);
        let mut packed = [0u8; POLYT1_PACKEDBYTES];
        pack_t1(&mut packed, &p);
        let mut back = Poly::zero();
        unpack_t1(&mut back, &packed);
        assert_eq!(p.coeffs, back.coeffs);
    }

    #[test]
    fn t0_roundtrip() {
        // Full range (-2^{D-1}, 2^{D-1}].
        let p = poly_from_fn(|i| ((i as i32 * 97) % 8192) - 4095);
        let mut packed = [0u8; POLYT0_PACKEDBYTES];
        pack_t0(&mut packed, &p);
        let mut back = Poly::zero();
        unpack_t0(&mut back, &packed);
        assert_eq!(p.coeffs, back.coeffs);
    }

    #[test]
    fn eta_roundtrip_both_etas() {
        let p = poly_from_fn(|i| (i as i32 % 5) - 2);
        let mut packed = [0u8; 96];
        pack_eta::<P2>(&mut packed, &p);
        let mut back = Poly::zero();
        unpack_eta::<P2>(&mut back, &packed);
        assert_eq!(p.coeffs, back.coeffs);

        let p = poly_from_fn(|i| (i as i32 % 9) - 4);
        let mut packed = [0u8; 128];
        pack_eta::<P3>(&mut packed, &p);
        let mut back = Poly::zero();
        unpack_eta::<P3>(&mut back, &packed);
        assert_eq!(p.coeffs, back.coeffs);
    }

    #[test]
    fn z_roundtrip_both_gammas() {
        let p = poly_from_fn(|i| (i as i32 * 1021) % (1 << 17) - 65000);
        let mut packed = [0u8; 576];
        pack_z::<P2>(&mut packed, &p);
        let mut back = Poly::zero();
        unpack_z::<P2>(&mut back, &packed);
        assert_eq!(p.coeffs, back.coeffs);

        let p = poly_from_fn(|i| (i as i32 * 4099) % (1 << 19) - 250000);
        let mut packed = [0u8; 640];
        pack_z::<P5>(&mut packed, &p);
        let mut back = Poly::zero();
        unpack_z::<P5>(&mut back, &packed);
        assert_eq!(p.coeffs, back.coeffs);
    }

    #[test]
    fn pk_roundtrip() {
        let rho = [0xABu8; SEEDBYTES];
        let mut t1 = PolyVecK::<P2>::zero();
        for (i, p) in t1.vec.iter_mut().enumerate() {
            *p = poly_from_fn(|j| ((i * 300 + j * 11) % 1024) as i32);
        }

        let pk = pack_pk::<P2>(&rho, &t1);
        assert_eq!(pk.len(), P2::PUBLIC_KEY_BYTES);

        let (rho2, t1b) = unpack_pk::<P2>(&pk).unwrap();
        assert_eq!(rho, rho2);
        for i in 0..4 {
            assert_eq!(t1.vec[i].coeffs, t1b.vec[i].coeffs);
        }
    }

    #[test]
    fn pk_wrong_length_is_rejected() {
        let short = vec![0u8; P2::PUBLIC_KEY_BYTES - 1];
        assert!(matches!(
            unpack_pk::<P2>(&short),
            Err(Error::InvalidKeySize { .. })
        ));
    }

    #[test]
    fn sk_roundtrip() {
        let rho = [1u8; SEEDBYTES];
        let tr = [2u8; SEEDBYTES];
        let key = [3u8; SEEDBYTES];
        let mut s1 = PolyVecL::<P3>::zero();
        for p in s1.vec.iter_mut() {
            *p = poly_from_fn(|j| (j as i32 % 9) - 4);
        }
        let mut s2 = PolyVecK::<P3>::zero();
        for p in s2.vec.iter_mut() {
            *p = poly_from_fn(|j| ((j + 5) as i32 % 9) - 4);
        }
        let mut t0 = PolyVecK::<P3>::zero();
        for p in t0.vec.iter_mut() {
            *p = poly_from_fn(|j| ((j as i32 * 53) % 8192) - 4095);
        }

        let sk = pack_sk::<P3>(&rho, &tr, &key, &t0, &s1, &s2);
        assert_eq!(sk.len(), P3::SECRET_KEY_BYTES);

        let (rho2, tr2, key2, t0b, s1b, s2b) = unpack_sk::<P3>(&sk).unwrap();
        assert_eq!(rho, rho2);
        assert_eq!(tr, tr2);
        assert_eq!(key, key2);
        for i in 0..5 {
            assert_eq!(s1.vec[i].coeffs, s1b.vec[i].coeffs);
        }
        for i in 0..6 {
            assert_eq!(s2.vec[i].coeffs, s2b.vec[i].coeffs);
            assert_eq!(t0.vec[i].coeffs, t0b.vec[i].coeffs);
        }
    }

    #[test]
    fn sig_roundtrip_with_hints() {
        let c_tilde = [0x5Au8; SEEDBYTES];
        let mut z = PolyVecL::<P2>::zero();
        for p in z.vec.iter_mut() {
            *p = poly_from_fn(|j| (j as i32 * 7) % 1000 - 500);
        }
        let mut h = PolyVecK::<P2>::zero();
        h.vec[0].coeffs[3] = 1;
        h.vec[0].coeffs[200] = 1;
        h.vec[2].coeffs[0] = 1;
        h.vec[3].coeffs[255] = 1;

        let sig = pack_sig::<P2>(&c_tilde, &z, &h).unwrap();
        assert_eq!(sig.len(), P2::SIGNATURE_BYTES);

        let (c2, z2, h2) = unpack_sig::<P2>(&sig).unwrap();
        assert_eq!(c_tilde, c2);
        for i in 0..4 {
            assert_eq!(z.vec[i].coeffs, z2.vec[i].coeffs);
            assert_eq!(h.vec[i].coeffs, h2.vec[i].coeffs);
        }
    }

    #[test]
    fn sig_wrong_length_is_rejected() {
        let sig = vec![0u8; P2::SIGNATURE_BYTES + 4];
        assert!(matches!(
            unpack_sig::<P2>(&sig),
            Err(Error::InvalidSignatureSize { .. })
        ));
    }

    fn valid_sig_bytes() -> Vec<u8> {
        let c_tilde = [0u8; SEEDBYTES];
        let z = PolyVecL::<P2>::zero();
        let mut h = PolyVecK::<P2>::zero();
        h.vec[0].coeffs[1] = 1;
        h.vec[1].coeffs[2] = 1;
        pack_sig::<P2>(&c_tilde, &z, &h).unwrap()
    }

    #[test]
    fn hint_counts_must_not_decrease() {
        let mut sig = valid_sig_bytes();
        let hint_off = SEEDBYTES + 4 * P2::POLYZ_PACKEDBYTES;
        // cnt[1] < cnt[0]
        sig[hint_off + P2::OMEGA] = 2;
        sig[hint_off + P2::OMEGA + 1] = 1;
        assert!(matches!(
            unpack_sig::<P2>(&sig),
            Err(Error::Deserialization { .. })
        ));
    }

    #[test]
    fn hint_counts_must_not_exceed_omega() {
        let mut sig = valid_sig_bytes();
        let hint_off = SEEDBYTES + 4 * P2::POLYZ_PACKEDBYTES;
        sig[hint_off + P2::OMEGA + 3] = (P2::OMEGA + 1) as u8;
        assert!(matches!(
            unpack_sig::<P2>(&sig),
            Err(Error::Deserialization { .. })
        ));
    }

    #[test]
    fn hint_indices_must_increase() {
        let c_tilde = [0u8; SEEDBYTES];
        let z = PolyVecL::<P2>::zero();
        let mut h = PolyVecK::<P2>::zero();
        h.vec[0].coeffs[10] = 1;
        h.vec[0].coeffs[20] = 1;
        let mut sig = pack_sig::<P2>(&c_tilde, &z, &h).unwrap();

        let hint_off = SEEDBYTES + 4 * P2::POLYZ_PACKEDBYTES;
        // Swap the two indices of polynomial 0 so they decrease.
        sig.swap(hint_off, hint_off + 1);
        assert!(matches!(
            unpack_sig::<P2>(&sig),
            Err(Error::Deserialization { .. })
        ));
    }

    #[test]
    fn hint_padding_must_be_zero() {
        let mut sig = valid_sig_bytes();
        let hint_off = SEEDBYTES + 4 * P2::POLYZ_PACKEDBYTES;
        // Slot beyond the declared total count must stay zero.
        sig[hint_off + 5] = 17;
        assert!(matches!(
            unpack_sig::<P2>(&sig),
            Err(Error::Deserialization { .. })
        ));
    }

    #[test]
    fn w1_packing_is_shape_stable() {
        let mut w1 = PolyVecK::<P2>::zero();
        for p in w1.vec.iter_mut() {
            *p = poly_from_fn(|j| (j % 44) as i32);
        }
        let packed = pack_w1_vec::<P2>(&w1);
        assert_eq!(packed.len(), 4 * 192);

        let mut w1 = PolyVecK::<P5>::zero();
        for p in w1.vec.iter_mut() {
            *p = poly_from_fn(|j| (j % 16) as i32);
        }
        let packed = pack_w1_vec::<P5>(&w1);
        assert_eq!(packed.len(), 8 * 128);
    }
}
