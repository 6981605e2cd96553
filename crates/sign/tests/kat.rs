//! NIST known-answer tests.
//!
//! Parses `PQCsignKAT_Dilithium{2,3,5}.rsp` response files together with the
//! matching `SeedBuffer_Dilithium{2,3,5}` files (one hex key-generation seed
//! per line) from `tests/vectors/`. The response files carry the DRBG seed,
//! message, keys and signed message per entry; the seed-buffer files carry
//! the 32-byte seeds the DRBG handed to key generation, which is what the
//! deterministic `keypair_from_seed` entry point consumes.
//!
//! The vector files are not committed; when they are absent each test
//! prints a notice and passes vacuously.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use dilithium_sign::Dilithium;
use params::pqc::dilithium::{
    Dilithium2Params, Dilithium3Params, Dilithium5Params, DilithiumSchemeParams,
};

fn vectors_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vectors")
}

#[derive(Default)]
struct KatEntry {
    count: usize,
    msg: Vec<u8>,
    pk: Vec<u8>,
    sk: Vec<u8>,
    sm: Vec<u8>,
}

/// Parse a NIST `.rsp` file into its entries.
fn parse_rsp(path: &Path) -> Option<Vec<KatEntry>> {
    let file = File::open(path).ok()?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    let mut fields: HashMap<String, String> = HashMap::new();

    let mut flush = |fields: &mut HashMap<String, String>, entries: &mut Vec<KatEntry>| {
        if fields.is_empty() {
            return;
        }
        let entry = KatEntry {
            count: fields
                .get("count")
                .and_then(|v| v.parse().ok())
                .unwrap_or(entries.len()),
            msg: fields
                .get("msg")
                .and_then(|v| hex::decode(v).ok())
                .unwrap_or_default(),
            pk: fields
                .get("pk")
                .and_then(|v| hex::decode(v).ok())
                .unwrap_or_default(),
            sk: fields
                .get("sk")
                .and_then(|v| hex::decode(v).ok())
                .unwrap_or_default(),
            sm: fields
                .get("sm")
                .and_then(|v| hex::decode(v).ok())
                .unwrap_or_default(),
        };
        entries.push(entry);
        fields.clear();
    };

    for line in reader.lines() {
        let line = line.ok()?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_string();
            if key == "count" && !fields.is_empty() {
                flush(&mut fields, &mut entries);
            }
            fields.insert(key, value.trim().to_string());
        }
    }
    flush(&mut fields, &mut entries);

    Some(entries)
}

/// Parse a seed-buffer file: one hex-encoded 32-byte seed per line.
fn parse_seed_buffer(path: &Path) -> Option<Vec<[u8; 32]>> {
    let file = File::open(path).ok()?;
    let reader = BufReader::new(file);

    let mut seeds = Vec::new();
    for line in reader.lines() {
        let line = line.ok()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let bytes = hex::decode(line).ok()?;
        if bytes.len() != 32 {
            return None;
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes);
        seeds.push(seed);
    }
    Some(seeds)
}

fn run_kat<P: DilithiumSchemeParams>(name: &str) {
    let rsp_path = vectors_dir().join(format!("PQCsignKAT_{}.rsp", name));
    let seed_path = vectors_dir().join(format!("SeedBuffer_{}", name));

    let (entries, seeds) = match (parse_rsp(&rsp_path), parse_seed_buffer(&seed_path)) {
        (Some(e), Some(s)) if !e.is_empty() && !s.is_empty() => (e, s),
        _ => {
            println!(
                "KAT vectors for {} not found under {}; skipping",
                name,
                vectors_dir().display()
            );
            return;
        }
    };

    for (entry, seed) in entries.iter().zip(seeds.iter()) {
        // Key generation reproduces the recorded key pair byte for byte.
        let (pk, sk) = Dilithium::<P>::keypair_from_seed(seed).unwrap();
        assert_eq!(
            pk.as_ref(),
            &entry.pk[..],
            "{} count {}: public key mismatch",
            name,
            entry.count
        );
        assert_eq!(
            sk.as_ref(),
            &entry.sk[..],
            "{} count {}: secret key mismatch",
            name,
            entry.count
        );

        // Deterministic signing reproduces the recorded signed message.
        let sm = Dilithium::<P>::sign_message(&entry.msg, sk.as_ref()).unwrap();
        assert_eq!(
            sm, entry.sm,
            "{} count {}: signed message mismatch",
            name, entry.count
        );

        // The recorded signature verifies against the recorded key.
        let sig = &entry.sm[..P::SIGNATURE_BYTES];
        Dilithium::<P>::verify_bytes(&entry.msg, sig, &entry.pk).unwrap();

        // And a single flipped bit invalidates it.
        let mut bad = sig.to_vec();
        let last = bad.len() - 1;
        bad[last] ^= 1;
        assert!(Dilithium::<P>::verify_bytes(&entry.msg, &bad, &entry.pk).is_err());
    }
    println!("{}: {} KAT entries verified", name, entries.len());
}

#[test]
fn kat_dilithium2() {
    run_kat::<Dilithium2Params>("Dilithium2");
}

#[test]
fn kat_dilithium3() {
    run_kat::<Dilithium3Params>("Dilithium3");
}

#[test]
fn kat_dilithium5() {
    run_kat::<Dilithium5Params>("Dilithium5");
}
