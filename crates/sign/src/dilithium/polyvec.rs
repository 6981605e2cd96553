//! Vectors of polynomials and the public matrix A.
//!
//! `PolyVecL` (length l) holds s1, y and z; `PolyVecK` (length k) holds s2,
//! t0, t1, w and the hint vector. Keeping them as distinct types makes a
//! k/l mix-up a compile error. The matrix A lives in the NTT domain from
//! the moment it is expanded: the uniform sampler output is interpreted
//! directly as NTT coefficients, so no transform is ever applied to it.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

use core::marker::PhantomData;

use params::pqc::dilithium::{DilithiumSchemeParams, CRHBYTES, SEEDBYTES};
use zeroize::Zeroize;

use super::poly::Poly;

/// A vector of `L_DIM` polynomials.
pub struct PolyVecL<P: DilithiumSchemeParams> {
    /// The polynomials.
    pub vec: Vec<Poly>,
    _params: PhantomData<P>,
}

impl<P: DilithiumSchemeParams> Clone for PolyVecL<P> {
    fn clone(&self) -> Self {
        PolyVecL {
            vec: self.vec.clone(),
            _params: PhantomData,
        }
    }
}

/// A vector of `K_DIM` polynomials.
pub struct PolyVecK<P: DilithiumSchemeParams> {
    /// The polynomials.
    pub vec: Vec<Poly>,
    _params: PhantomData<P>,
}

impl<P: DilithiumSchemeParams> Clone for PolyVecK<P> {
    fn clone(&self) -> Self {
        PolyVecK {
            vec: self.vec.clone(),
            _params: PhantomData,
        }
    }
}

impl<P: DilithiumSchemeParams> Zeroize for PolyVecL<P> {
    fn zeroize(&mut self) {
        self.vec.zeroize();
    }
}

impl<P: DilithiumSchemeParams> Zeroize for PolyVecK<P> {
    fn zeroize(&mut self) {
        self.vec.zeroize();
    }
}

macro_rules! impl_polyvec_common {
    ($name:ident, $dim:ident) => {
        impl<P: DilithiumSchemeParams> $name<P> {
            /// All-zero vector.
            pub fn zero() -> Self {
                $name {
                    vec: vec![Poly::zero(); P::$dim],
                    _params: PhantomData,
                }
            }

            /// Forward NTT on every component.
            pub fn ntt(&mut self) {
                for p in self.vec.iter_mut() {
                    p.ntt();
                }
            }

            /// Inverse NTT (times 2^32) on every component.
            pub fn invntt_tomont(&mut self) {
                for p in self.vec.iter_mut() {
                    p.invntt_tomont();
                }
            }

            /// Reduce every coefficient; see [`Poly::reduce`].
            pub fn reduce(&mut self) {
                for p in self.vec.iter_mut() {
                    p.reduce();
                }
            }

            /// Add q to every negative coefficient.
            pub fn caddq(&mut self) {
                for p in self.vec.iter_mut() {
                    p.caddq();
                }
            }

            /// Component-wise addition without reduction.
            pub fn add_assign(&mut self, rhs: &Self) {
                for (a, b) in self.vec.iter_mut().zip(rhs.vec.iter()) {
                    a.add_assign(b);
                }
            }

            /// Component-wise subtraction without reduction.
            pub fn sub_assign(&mut self, rhs: &Self) {
                for (a, b) in self.vec.iter_mut().zip(rhs.vec.iter()) {
                    a.sub_assign(b);
                }
            }

            /// Multiply every component by the single NTT-domain polynomial
            /// `a`, dividing by 2^32.
            pub fn pointwise_poly_montgomery(&self, a: &Poly) -> Self {
                let mut r = Self::zero();
                for (dst, src) in r.vec.iter_mut().zip(self.vec.iter()) {
                    *dst = Poly::pointwise_montgomery(a, src);
                }
                r
            }

            /// True when any component reaches `bound` in infinity norm.
            pub fn chknorm(&self, bound: i32) -> bool {
                self.vec.iter().any(|p| p.chknorm(bound))
            }

            /// Sample every component from the centered eta distribution,
            /// with nonces `nonce, nonce + 1, ...`.
            pub fn uniform_eta(seed: &[u8; CRHBYTES], mut nonce: u16) -> Self {
                let mut r = Self::zero();
                for p in r.vec.iter_mut() {
                    *p = Poly::uniform_eta::<P>(seed, nonce);
                    nonce = nonce.wrapping_add(1);
                }
                r
            }
        }
    };
}

impl_polyvec_common!(PolyVecL, L_DIM);
impl_polyvec_common!(PolyVecK, K_DIM);

impl<P: DilithiumSchemeParams> PolyVecL<P> {
    /// Sample the masking vector y for signing attempt `kappa`: component i
    /// uses the stream nonce `l * kappa + i`.
    pub fn uniform_gamma1(seed: &[u8; CRHBYTES], kappa: u16) -> Self {
        let mut r = Self::zero();
        for (i, p) in r.vec.iter_mut().enumerate() {
            let nonce = (P::L_DIM as u16).wrapping_mul(kappa).wrapping_add(i as u16);
            *p = Poly::uniform_gamma1::<P>(seed, nonce);
        }
        r
    }

    /// Dot product with another l-vector in the NTT domain, accumulating
    /// Montgomery products coefficient-wise.
    pub fn pointwise_acc_montgomery(&self, other: &Self) -> Poly {
        let mut acc = Poly::pointwise_montgomery(&self.vec[0], &other.vec[0]);
        for j in 1..P::L_DIM {
            let t = Poly::pointwise_montgomery(&self.vec[j], &other.vec[j]);
            acc.add_assign(&t);
        }
        acc
    }
}

impl<P: DilithiumSchemeParams> PolyVecK<P> {
    /// Multiply every coefficient by 2^D.
    pub fn shiftl(&mut self) {
        for p in self.vec.iter_mut() {
            p.shiftl();
        }
    }

    /// Apply Power2Round to every coefficient, returning `(t0, t1)`.
    pub fn power2round(&self) -> (Self, Self) {
        let mut t0 = Self::zero();
        let mut t1 = Self::zero();
        for i in 0..P::K_DIM {
            let (a0, a1) = self.vec[i].power2round();
            t0.vec[i] = a0;
            t1.vec[i] = a1;
        }
        (t0, t1)
    }

    /// Apply Decompose to every coefficient, returning `(w0, w1)`.
    pub fn decompose(&self) -> (Self, Self) {
        let mut w0 = Self::zero();
        let mut w1 = Self::zero();
        for i in 0..P::K_DIM {
            let (a0, a1) = self.vec[i].decompose::<P>();
            w0.vec[i] = a0;
            w1.vec[i] = a1;
        }
        (w0, w1)
    }

    /// Build the hint vector for the split `(a0, a1)`; returns the hint and
    /// its total weight.
    pub fn make_hint(a0: &Self, a1: &Self) -> (Self, usize) {
        let mut h = Self::zero();
        let mut weight = 0usize;
        for i in 0..P::K_DIM {
            let (hp, w) = Poly::make_hint::<P>(&a0.vec[i], &a1.vec[i]);
            h.vec[i] = hp;
            weight += w;
        }
        (h, weight)
    }

    /// Correct the high bits of every component using the hint vector.
    pub fn use_hint(&self, hint: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..P::K_DIM {
            r.vec[i] = self.vec[i].use_hint::<P>(&hint.vec[i]);
        }
        r
    }
}

/// The public k x l matrix A, kept in the NTT domain.
#[derive(Clone)]
pub struct Matrix<P: DilithiumSchemeParams> {
    /// Row i holds the polynomials A[i][0..l].
    pub rows: Vec<PolyVecL<P>>,
}

impl<P: DilithiumSchemeParams> Matrix<P> {
    /// Expand A from the public seed rho: A[i][j] = uniform(rho, (i<<8)|j).
    pub fn expand(rho: &[u8; SEEDBYTES]) -> Self {
        let mut rows = Vec::with_capacity(P::K_DIM);
        for i in 0..P::K_DIM {
            let mut row = PolyVecL::<P>::zero();
            for (j, p) in row.vec.iter_mut().enumerate() {
                *p = Poly::uniform(rho, ((i << 8) + j) as u16);
            }
            rows.push(row);
        }
        Matrix { rows }
    }

    /// Matrix-vector product in the NTT domain: t[i] = sum_j A[i][j] * v[j],
    /// divided by 2^32.
    pub fn pointwise_montgomery(&self, v: &PolyVecL<P>) -> PolyVecK<P> {
        let mut t = PolyVecK::<P>::zero();
        for (dst, row) in t.vec.iter_mut().zip(self.rows.iter()) {
            *dst = row.pointwise_acc_montgomery(v);
        }
        t
    }
}
