use super::*;
use crate::xof::ExtendableOutputFunction;

#[test]
fn shake128_empty_input() {
    // NIST test vector: empty string
    let expected = "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26";

    let mut xof = ShakeXof128::new();
    xof.update(&[]).unwrap();
    let out = xof.squeeze_into_vec(32).unwrap();
    assert_eq!(hex::encode(&out), expected);
}

#[test]
fn shake128_abc() {
    // NIST test vector: "abc"
    let expected = "5881092dd818bf5cf8a3ddb793fbcba74097d5c526a6d35f97b83351940f2cc8";

    let mut xof = ShakeXof128::new();
    xof.update(b"abc").unwrap();
    let out = xof.squeeze_into_vec(32).unwrap();
    assert_eq!(hex::encode(&out), expected);
}

#[test]
fn shake256_empty_input() {
    // NIST test vector: empty string
    let expected = "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f\
                    d75dc4ddd8c0f200cb05019d67b592f6fc821c49479ab48640292eacb3b7c4be";

    let mut xof = ShakeXof256::new();
    xof.update(&[]).unwrap();
    let out = xof.squeeze_into_vec(64).unwrap();
    assert_eq!(hex::encode(&out), expected);
}

#[test]
fn incremental_absorb_equals_one_shot() {
    let mut split = ShakeXof256::new();
    split.update(b"Hello, ").unwrap();
    split.update(b"World!").unwrap();
    let split_out = split.squeeze_into_vec(137).unwrap();

    let mut whole = ShakeXof256::new();
    whole.update(b"Hello, World!").unwrap();
    let whole_out = whole.squeeze_into_vec(137).unwrap();

    assert_eq!(split_out, whole_out);
}

#[test]
fn incremental_squeeze_is_continuous() {
    let mut xof = ShakeXof128::new();
    xof.update(b"abc").unwrap();
    let full = xof.squeeze_into_vec(64).unwrap();

    let mut xof = ShakeXof128::new();
    xof.update(b"abc").unwrap();
    let mut first = [0u8; 24];
    let mut second = [0u8; 40];
    xof.squeeze(&mut first).unwrap();
    xof.squeeze(&mut second).unwrap();

    assert_eq!(&full[..24], &first);
    assert_eq!(&full[24..], &second);
}

#[test]
fn update_after_squeeze_is_rejected() {
    let mut xof = ShakeXof256::new();
    xof.update(b"seed").unwrap();
    let mut out = [0u8; 16];
    xof.squeeze(&mut out).unwrap();
    assert!(xof.update(b"more").is_err());

    xof.reset().unwrap();
    assert!(xof.update(b"fresh").is_ok());
}

#[test]
fn squeezeblocks_matches_squeeze() {
    let mut state = KeccakState::init();
    state.absorb(SHAKE128_RATE, b"block oriented");
    state.finalize(SHAKE128_RATE, 0x1F);
    let mut blocks = vec![0u8; 2 * SHAKE128_RATE];
    state.squeezeblocks(SHAKE128_RATE, 2, &mut blocks);

    let mut state = KeccakState::init();
    state.absorb(SHAKE128_RATE, b"block oriented");
    state.finalize(SHAKE128_RATE, 0x1F);
    let mut stream = vec![0u8; 2 * SHAKE128_RATE];
    state.squeeze(SHAKE128_RATE, &mut stream);

    assert_eq!(blocks, stream);
}

#[test]
fn absorb_spanning_multiple_blocks() {
    // Input longer than one SHAKE256 block exercises the mid-absorb permute.
    let data = vec![0xA5u8; 3 * SHAKE256_RATE + 17];

    let mut chunked = ShakeXof256::new();
    for chunk in data.chunks(31) {
        chunked.update(chunk).unwrap();
    }
    let out_chunked = chunked.squeeze_into_vec(96).unwrap();

    let mut whole = ShakeXof256::new();
    whole.update(&data).unwrap();
    let out_whole = whole.squeeze_into_vec(96).unwrap();

    assert_eq!(out_chunked, out_whole);
}

#[test]
fn stream_init_separates_nonces() {
    let seed = [7u8; 32];

    let mut a = KeccakState::init();
    shake128_stream_init(&mut a, &seed, 0);
    let mut out_a = vec![0u8; SHAKE128_RATE];
    a.squeezeblocks(SHAKE128_RATE, 1, &mut out_a);

    let mut b = KeccakState::init();
    shake128_stream_init(&mut b, &seed, 1);
    let mut out_b = vec![0u8; SHAKE128_RATE];
    b.squeezeblocks(SHAKE128_RATE, 1, &mut out_b);

    assert_ne!(out_a, out_b);
}

#[test]
fn stream_init_matches_manual_construction() {
    let seed = [0x3Cu8; 64];
    let nonce: u16 = 0x0102;

    let mut stream = KeccakState::init();
    shake256_stream_init(&mut stream, &seed, nonce);
    let mut out_stream = vec![0u8; SHAKE256_RATE];
    stream.squeezeblocks(SHAKE256_RATE, 1, &mut out_stream);

    let mut manual = ShakeXof256::new();
    manual.update(&seed).unwrap();
    manual.update(&[0x02, 0x01]).unwrap();
    let out_manual = manual.squeeze_into_vec(SHAKE256_RATE).unwrap();

    assert_eq!(out_stream, out_manual);
}
