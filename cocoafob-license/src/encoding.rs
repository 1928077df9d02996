//! CocoaFob text encoding of signature bytes.
//!
//! Encoding is RFC 4648 base-32, then `O` → `8` and `I` → `9`, then padding
//! removal, then chunking into dash-separated groups of five:
//!
//! ```text
//! b"foobar" -> "MZXW6YTBOI======" -> "MZXW6YTB89" -> "MZXW6-YTB89"
//! ```
//!
//! The standard base-32 alphabet never contains `8` or `9`, so the
//! substitution is reversible.

use crate::error::{LicenseError, LicenseResult};
use data_encoding::{Encoding, Specification};
use std::sync::LazyLock;

/// Number of characters per dash-separated group.
pub const CHUNK_SIZE: usize = 5;

const BASE32_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// RFC 4648 base-32 with padding. Non-zero trailing bits are accepted on
/// decode; [`decode_with_spelling`] reports whether the input was canonical.
static BASE32: LazyLock<Encoding> = LazyLock::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str(BASE32_SYMBOLS);
    spec.padding = Some('=');
    spec.check_trailing_bits = false;
    spec.encoding().expect("RFC 4648 base-32 specification is valid")
});

/// Encodes raw signature bytes as a CocoaFob license key string.
///
/// Empty input produces an empty string.
#[must_use]
pub fn encode_license_key(bytes: &[u8]) -> String {
    let substituted: String = BASE32
        .encode(bytes)
        .chars()
        .filter(|&c| c != '=')
        .map(|c| match c {
            'O' => '8',
            'I' => '9',
            other => other,
        })
        .collect();

    chunk(&substituted, CHUNK_SIZE)
}

/// Decodes a CocoaFob license key string back to raw signature bytes.
///
/// Surrounding whitespace is ignored. Dashes may appear anywhere.
///
/// # Errors
///
/// Returns [`LicenseError::MalformedLicenseKey`] if the key contains
/// characters outside the base-32 alphabet after substitution, or if its
/// length cannot come from whole bytes.
pub fn decode_license_key(license: &str) -> LicenseResult<Vec<u8>> {
    decode_with_spelling(license).map(|decoded| decoded.bytes)
}

/// Bytes decoded from a license key, with whether the key was spelled the way
/// [`encode_license_key`] would spell them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodedKey {
    pub bytes: Vec<u8>,
    pub canonical: bool,
}

/// Decodes a license key and checks it against the canonical spelling of the
/// resulting bytes.
///
/// `O` and `I` typed in place of `8` and `9` count as canonical; they name
/// the same base-32 symbols. Non-zero trailing bits in the final group do not.
pub(crate) fn decode_with_spelling(license: &str) -> LicenseResult<DecodedKey> {
    let mut unpadded: String = license
        .trim()
        .chars()
        .filter(|&c| c != '-')
        .map(|c| match c {
            '8' => 'O',
            '9' => 'I',
            other => other,
        })
        .collect();
    let unpadded_len = unpadded.len();

    while unpadded.len() % 8 != 0 {
        unpadded.push('=');
    }

    let bytes = BASE32
        .decode(unpadded.as_bytes())
        .map_err(|e| LicenseError::MalformedLicenseKey(e.to_string()))?;

    let reencoded = BASE32.encode(&bytes);
    let canonical = reencoded.trim_end_matches('=') == &unpadded[..unpadded_len];

    Ok(DecodedKey { bytes, canonical })
}

/// Joins `s` into `size`-character groups separated by dashes.
fn chunk(s: &str, size: usize) -> String {
    let mut result = String::with_capacity(s.len() + s.len() / size);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && i % size == 0 {
            result.push('-');
        }
        result.push(c);
    }
    result
}
