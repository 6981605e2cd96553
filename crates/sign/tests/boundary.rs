//! Boundary and negative tests: invalid signatures, wrong keys, edge cases.

use dilithium_sign::{Dilithium, Dilithium2, Dilithium3, Dilithium5, Error};
use params::pqc::dilithium::{
    Dilithium2Params, Dilithium3Params, Dilithium5Params, DilithiumSchemeParams, SEEDBYTES,
};

const SEED: [u8; 32] = [0x33u8; 32];
const MSG: &[u8] = b"boundary test message";

macro_rules! boundary_tests {
    ($name:ident, $alg:ident, $p:ident) => {
        mod $name {
            use super::*;

            fn keypair() -> (Vec<u8>, Vec<u8>) {
                let (pk, sk) = $alg::keypair_from_seed(&SEED).unwrap();
                (pk.as_ref().to_vec(), sk.as_ref().to_vec())
            }

            #[test]
            fn tampered_c_tilde_rejects() {
                let (pk, sk) = keypair();
                let mut sig = $alg::sign_bytes(MSG, &sk).unwrap();
                sig[0] ^= 0xFF;
                assert!($alg::verify_bytes(MSG, &sig, &pk).is_err());
            }

            #[test]
            fn tampered_z_rejects() {
                let (pk, sk) = keypair();
                let mut sig = $alg::sign_bytes(MSG, &sk).unwrap();
                // z starts right after the 32-byte challenge seed.
                sig[SEEDBYTES + 5] ^= 0xFF;
                assert!($alg::verify_bytes(MSG, &sig, &pk).is_err());
            }

            #[test]
            fn tampered_hint_rejects() {
                let (pk, sk) = keypair();
                let mut sig = $alg::sign_bytes(MSG, &sk).unwrap();
                // The hint counts live in the last K bytes.
                let last = sig.len() - 1;
                sig[last] = sig[last].wrapping_add(1);
                assert!($alg::verify_bytes(MSG, &sig, &pk).is_err());
            }

            #[test]
            fn truncated_inputs_reject_with_length_errors() {
                let (pk, sk) = keypair();
                let sig = $alg::sign_bytes(MSG, &sk).unwrap();

                let err = $alg::verify_bytes(MSG, &sig[..sig.len() - 1], &pk).unwrap_err();
                assert!(matches!(err, Error::InvalidSignatureSize { .. }));

                let err = $alg::verify_bytes(MSG, &sig, &pk[..pk.len() - 1]).unwrap_err();
                assert!(matches!(err, Error::InvalidKeySize { .. }));

                let err = $alg::sign_bytes(MSG, &sk[..sk.len() - 1]).unwrap_err();
                assert!(matches!(err, Error::InvalidKeySize { .. }));
            }

            #[test]
            fn extended_inputs_reject_with_length_errors() {
                let (pk, sk) = keypair();
                let sig = $alg::sign_bytes(MSG, &sk).unwrap();

                let mut long_sig = sig.clone();
                long_sig.push(0);
                let err = $alg::verify_bytes(MSG, &long_sig, &pk).unwrap_err();
                assert!(matches!(err, Error::InvalidSignatureSize { .. }));

                let mut long_pk = pk.clone();
                long_pk.push(0);
                let err = $alg::verify_bytes(MSG, &sig, &long_pk).unwrap_err();
                assert!(matches!(err, Error::InvalidKeySize { .. }));
            }

            #[test]
            fn empty_inputs_reject() {
                let (pk, sk) = keypair();
                let sig = $alg::sign_bytes(MSG, &sk).unwrap();

                assert!($alg::verify_bytes(MSG, &[], &pk).is_err());
                assert!($alg::verify_bytes(MSG, &sig, &[]).is_err());
                assert!($alg::sign_bytes(MSG, &[]).is_err());
            }

            #[test]
            fn all_zero_signature_rejects() {
                let (pk, _) = keypair();
                let sig = vec![0u8; $p::SIGNATURE_BYTES];
                assert!($alg::verify_bytes(MSG, &sig, &pk).is_err());
            }

            #[test]
            fn signature_is_not_valid_for_another_message() {
                let (pk, sk) = keypair();
                let sig = $alg::sign_bytes(MSG, &sk).unwrap();
                assert!($alg::verify_bytes(b"different message", &sig, &pk).is_err());
            }

            #[test]
            fn distinct_messages_give_distinct_signatures() {
                let (_, sk) = keypair();
                let sig_a = $alg::sign_bytes(b"message a", &sk).unwrap();
                let sig_b = $alg::sign_bytes(b"message b", &sk).unwrap();
                assert_ne!(sig_a, sig_b);
            }
        }
    };
}

boundary_tests!(dilithium2, Dilithium2, Dilithium2Params);
boundary_tests!(dilithium3, Dilithium3, Dilithium3Params);
boundary_tests!(dilithium5, Dilithium5, Dilithium5Params);

#[test]
fn keys_do_not_verify_across_levels() {
    let (pk2, _) = Dilithium2::keypair_from_seed(&SEED).unwrap();
    let (_, sk3) = Dilithium3::keypair_from_seed(&SEED).unwrap();
    let sig3 = Dilithium3::sign_bytes(MSG, sk3.as_ref()).unwrap();

    // L3 material presented to the L2 verifier fails the length checks.
    let err = Dilithium2::verify_bytes(MSG, &sig3, pk2.as_ref()).unwrap_err();
    assert!(matches!(err, Error::InvalidSignatureSize { .. }));
}

#[test]
fn generic_entry_points_match_the_aliases() {
    let (pk, sk) = Dilithium::<Dilithium5Params>::keypair_from_seed(&SEED).unwrap();
    let (pk_alias, sk_alias) = Dilithium5::keypair_from_seed(&SEED).unwrap();
    assert_eq!(pk.as_ref(), pk_alias.as_ref());
    assert_eq!(sk.as_ref(), sk_alias.as_ref());
}
