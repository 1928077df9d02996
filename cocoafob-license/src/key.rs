//! DSA key material and the SHA-1/DSA signature capability.
//!
//! The digest and algorithm are fixed: every CocoaFob implementation signs
//! the canonical string with `SHA1withDSA` and stores the DER-encoded
//! `(r, s)` pair. Changing either invalidates all keys already issued.
//!
//! Keys are read from PEM. A private key is either PKCS#8
//! (`BEGIN PRIVATE KEY`) or the traditional OpenSSL form written by
//! `openssl gendsa` (`BEGIN DSA PRIVATE KEY`). A public key is SPKI
//! (`BEGIN PUBLIC KEY`).

use crate::capability::{LicenseSigner, LicenseVerifier};
use crate::error::{LicenseError, LicenseResult};
use der::asn1::UintRef;
use der::{SecretDocument, Sequence};
use dsa::{BigUint, Components, Signature, SigningKey, VerifyingKey};
use pkcs8::{DecodePrivateKey, DecodePublicKey};
use sha1::{Digest, Sha1};
use signature::{DigestSigner, DigestVerifier, SignatureEncoding};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const PKCS8_LABEL: &str = "PRIVATE KEY";
const OPENSSL_DSA_LABEL: &str = "DSA PRIVATE KEY";
const SPKI_LABEL: &str = "PUBLIC KEY";

/// `DSAPrivateKey ::= SEQUENCE { version, p, q, g, y, x }` (OpenSSL).
#[derive(Sequence)]
struct OpenSslDsaPrivateKey<'a> {
    version: u8,
    p: UintRef<'a>,
    q: UintRef<'a>,
    g: UintRef<'a>,
    y: UintRef<'a>,
    x: UintRef<'a>,
}

fn uint(value: UintRef<'_>) -> BigUint {
    BigUint::from_bytes_be(value.as_bytes())
}

fn invalid_private_key(cause: impl std::fmt::Display) -> LicenseError {
    LicenseError::KeyMaterial(format!("invalid DSA private key: {cause}"))
}

/// DSA private key. Signs licenses and verifies them with its public half.
#[derive(Clone)]
pub struct DsaSigningKey(SigningKey);

/// DSA public key. Verifies licenses only.
#[derive(Clone)]
pub struct DsaVerifyingKey(VerifyingKey);

impl DsaSigningKey {
    /// Parses a PKCS#8 PEM private key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::KeyMaterial`] if the PEM is not a DSA private key.
    pub fn from_pkcs8_pem(pem: &str) -> LicenseResult<Self> {
        SigningKey::from_pkcs8_pem(pem)
            .map(Self)
            .map_err(invalid_private_key)
    }

    /// Parses a traditional OpenSSL `DSA PRIVATE KEY` PEM, as written by
    /// `openssl gendsa`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::KeyMaterial`] if the PEM is not an unencrypted
    /// DSA private key in that form.
    pub fn from_openssl_pem(pem: &str) -> LicenseResult<Self> {
        let (label, doc) = SecretDocument::from_pem(pem).map_err(invalid_private_key)?;
        if label != OPENSSL_DSA_LABEL {
            return Err(invalid_private_key(format!("unexpected PEM label {label:?}")));
        }
        let fields: OpenSslDsaPrivateKey<'_> = doc.decode_msg().map_err(invalid_private_key)?;
        if fields.version != 0 {
            return Err(invalid_private_key(format!(
                "unsupported version {}",
                fields.version
            )));
        }

        let components =
            Components::from_components(uint(fields.p), uint(fields.q), uint(fields.g))
                .map_err(invalid_private_key)?;
        let public =
            VerifyingKey::from_components(components, uint(fields.y)).map_err(invalid_private_key)?;
        SigningKey::from_components(public, uint(fields.x))
            .map(Self)
            .map_err(invalid_private_key)
    }

    /// Returns the corresponding public key.
    #[must_use]
    pub fn verifying_key(&self) -> DsaVerifyingKey {
        DsaVerifyingKey(self.0.verifying_key().clone())
    }
}

impl DsaVerifyingKey {
    /// Parses an SPKI PEM public key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::KeyMaterial`] if the PEM is not a DSA public key.
    pub fn from_public_key_pem(pem: &str) -> LicenseResult<Self> {
        VerifyingKey::from_public_key_pem(pem)
            .map(Self)
            .map_err(|e| LicenseError::KeyMaterial(format!("invalid DSA public key: {e}")))
    }
}

impl LicenseSigner for DsaSigningKey {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, signature::Error> {
        let sig: Signature = self.0.try_sign_digest(Sha1::new_with_prefix(message))?;
        Ok(sig.to_vec())
    }
}

impl LicenseVerifier for DsaSigningKey {
    fn verify(&self, message: &[u8], sig_bytes: &[u8]) -> Result<bool, signature::Error> {
        verify_sha1_dsa(self.0.verifying_key(), message, sig_bytes)
    }
}

impl LicenseVerifier for DsaVerifyingKey {
    fn verify(&self, message: &[u8], sig_bytes: &[u8]) -> Result<bool, signature::Error> {
        verify_sha1_dsa(&self.0, message, sig_bytes)
    }
}

fn verify_sha1_dsa(
    key: &VerifyingKey,
    message: &[u8],
    sig_bytes: &[u8],
) -> Result<bool, signature::Error> {
    // Bytes that are not a DER (r, s) pair cannot match any message.
    let Ok(sig) = Signature::try_from(sig_bytes) else {
        debug!(len = sig_bytes.len(), "signature bytes are not a DER DSA signature");
        return Ok(false);
    };
    Ok(key.verify_digest(Sha1::new_with_prefix(message), &sig).is_ok())
}

impl std::fmt::Debug for DsaSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DsaSigningKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for DsaVerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DsaVerifyingKey").finish_non_exhaustive()
    }
}

/// Key material read from a PEM source.
#[derive(Debug, Clone)]
pub enum KeyMaterial {
    /// A private key, which also yields the public key.
    KeyPair(DsaSigningKey),
    /// A public key only.
    PublicKey(DsaVerifyingKey),
}

impl KeyMaterial {
    /// Parses PEM text holding either a private key or a public key.
    ///
    /// The PEM label selects the parser. Products shipped to users must only
    /// embed the public key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::KeyMaterial`] if the text is not PEM, carries an
    /// unsupported label, or does not hold a valid DSA key.
    pub fn from_pem(pem: &str) -> LicenseResult<Self> {
        let label = der::pem::decode_label(pem.as_bytes())
            .map_err(|e| LicenseError::KeyMaterial(format!("key source is not PEM: {e}")))?;

        let material = match label {
            PKCS8_LABEL => Self::KeyPair(DsaSigningKey::from_pkcs8_pem(pem)?),
            OPENSSL_DSA_LABEL => Self::KeyPair(DsaSigningKey::from_openssl_pem(pem)?),
            SPKI_LABEL => Self::PublicKey(DsaVerifyingKey::from_public_key_pem(pem)?),
            other => {
                return Err(LicenseError::KeyMaterial(format!(
                    "unsupported PEM label {other:?}: expected a DSA private or public key"
                )));
            }
        };
        debug!(label, can_issue = material.can_issue(), "loaded DSA key material");
        Ok(material)
    }

    /// Reads PEM text from `reader` and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Io`] if reading fails, otherwise as [`KeyMaterial::from_pem`].
    pub fn from_reader(mut reader: impl Read) -> LicenseResult<Self> {
        let mut pem = String::new();
        reader.read_to_string(&mut pem)?;
        Self::from_pem(&pem)
    }

    /// Reads a PEM file and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Io`] if the file cannot be read, otherwise as
    /// [`KeyMaterial::from_pem`].
    pub fn from_path(path: impl AsRef<Path>) -> LicenseResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading license key material");
        let pem = fs::read_to_string(path)?;
        Self::from_pem(&pem)
    }

    /// Returns true if this material can issue licenses.
    #[must_use]
    pub fn can_issue(&self) -> bool {
        matches!(self, Self::KeyPair(_))
    }

    /// Returns the public key.
    #[must_use]
    pub fn verifying_key(&self) -> DsaVerifyingKey {
        match self {
            Self::KeyPair(key) => key.verifying_key(),
            Self::PublicKey(key) => key.clone(),
        }
    }
}
