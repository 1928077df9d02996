//! Shared test helpers for license tests.

#![allow(dead_code)]

use cocoafob_license::{KeyMaterial, LicenseCodec, LicenseData};

/// PKCS#8 DSA private key (1024-bit p, 160-bit q).
pub const PRIVATE_PEM: &str = include_str!("../fixtures/privkey.pem");
/// [`PRIVATE_PEM`] in the traditional OpenSSL `DSA PRIVATE KEY` form.
pub const TRADITIONAL_PRIVATE_PEM: &str = include_str!("../fixtures/privkey_traditional.pem");
/// Public half of [`PRIVATE_PEM`].
pub const PUBLIC_PEM: &str = include_str!("../fixtures/pubkey.pem");
/// Unrelated key pair with its own domain parameters.
pub const OTHER_PRIVATE_PEM: &str = include_str!("../fixtures/other_privkey.pem");
pub const OTHER_PUBLIC_PEM: &str = include_str!("../fixtures/other_pubkey.pem");

/// `SHA1withDSA` signature of `"Test,Karl"` under [`PRIVATE_PEM`], made with OpenSSL.
pub const FIXED_LICENSE: &str = "GAWQE-FC3EL-EEC85-UPPXD-MDMMY-VXCB4-HPAAL-5DGQC-CUAKF-ZEH6J-GF8NY-XZX8A-AG7PZ-VUFWU-PWUU5-Q";

/// `SHA1withDSA` signature of `"Karl"` under [`PRIVATE_PEM`], made with OpenSSL.
pub const FIXED_NAME_ONLY_LICENSE: &str = "GAWQE-FB8UC-9RA6T-GADH6-58TNM-3UUVC-DET4D-ES3QC-CUAPT-MY9G3-62JXA-4B9QN-GN8SZ-MPGRW-KE2YN-A";

/// Characters a license key may contain besides dashes.
pub const LICENSE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Data the fixed license was issued for.
pub fn fixed_data() -> LicenseData {
    LicenseData::new("Karl").with_product_code("Test")
}

/// Codec holding the fixture key pair.
pub fn issuing_codec() -> LicenseCodec {
    LicenseCodec::from_key_material(KeyMaterial::from_pem(PRIVATE_PEM).unwrap())
}

/// Codec holding only the fixture public key.
pub fn verifying_codec() -> LicenseCodec {
    LicenseCodec::from_key_material(KeyMaterial::from_pem(PUBLIC_PEM).unwrap())
}

/// Codec holding the unrelated key pair.
pub fn other_issuing_codec() -> LicenseCodec {
    LicenseCodec::from_key_material(KeyMaterial::from_pem(OTHER_PRIVATE_PEM).unwrap())
}

/// Returns `license` with the character at `index` replaced by the next
/// alphabet character.
pub fn mutate_at(license: &str, index: usize) -> String {
    let mut chars: Vec<char> = license.chars().collect();
    let pos = LICENSE_ALPHABET.find(chars[index]).unwrap();
    let next = LICENSE_ALPHABET.as_bytes()[(pos + 1) % LICENSE_ALPHABET.len()] as char;
    chars[index] = next;
    chars.into_iter().collect()
}

/// Routes `tracing` output through the test harness. Set `RUST_LOG=debug` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
