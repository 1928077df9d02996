//! Issuing and verifying CocoaFob licenses.
//!
//! Issuing: canonicalize the data, sign the UTF-8 bytes, text-encode the
//! signature. Verifying: canonicalize the same data, text-decode the key back
//! to signature bytes, check the signature.
//!
//! Verification has two failure channels. Malformed keys, invalid data and
//! missing keys are errors. A well-formed key with the wrong signature is
//! `Ok(false)`. Callers must check the returned boolean.

use crate::capability::{LicenseSigner, LicenseVerifier};
use crate::data::Canonicalize;
use crate::encoding::{decode_with_spelling, encode_license_key};
use crate::error::{LicenseError, LicenseResult};
use crate::key::KeyMaterial;
use std::sync::Arc;
use tracing::debug;

/// Issues a license for `data` with `signer`.
///
/// # Errors
///
/// Returns [`LicenseError::LicenseOperationFailed`] wrapping the cause if
/// canonicalization or signing fails.
pub fn issue_license<D, S>(data: &D, signer: &S) -> LicenseResult<String>
where
    D: Canonicalize + ?Sized,
    S: LicenseSigner + ?Sized,
{
    let message = data.canonicalize().map_err(LicenseError::operation_failed)?;
    let signature = signer
        .sign(&message)
        .map_err(LicenseError::operation_failed)?;
    let license = encode_license_key(&signature);

    debug!(
        message_len = message.len(),
        signature_len = signature.len(),
        "issued license"
    );
    Ok(license)
}

/// Verifies `license` for `data` with `verifier`.
///
/// # Errors
///
/// - [`LicenseError::InvalidLicenseData`] if `data` cannot be canonicalized.
/// - [`LicenseError::MalformedLicenseKey`] if `license` cannot be decoded.
/// - [`LicenseError::LicenseOperationFailed`] if the verifier faults.
pub fn verify_license<D, V>(data: &D, license: &str, verifier: &V) -> LicenseResult<bool>
where
    D: Canonicalize + ?Sized,
    V: LicenseVerifier + ?Sized,
{
    let message = data.canonicalize()?;
    let decoded = decode_with_spelling(license)?;

    // Another spelling of the same bytes was not produced by an issuer.
    if !decoded.canonical {
        debug!("license key is not canonically encoded");
        return Ok(false);
    }

    let valid = verifier
        .verify(&message, &decoded.bytes)
        .map_err(LicenseError::operation_failed)?;

    debug!(valid, "license verification completed");
    Ok(valid)
}

/// Holds the signing and/or verification capability for a product.
///
/// Cheap to clone and safe to share across threads. Build one from
/// [`KeyMaterial`] or inject custom capabilities with
/// [`LicenseCodec::with_signer`] and [`LicenseCodec::with_verifier`].
#[derive(Clone, Default)]
pub struct LicenseCodec {
    signer: Option<Arc<dyn LicenseSigner + Send + Sync>>,
    verifier: Option<Arc<dyn LicenseVerifier + Send + Sync>>,
}

impl LicenseCodec {
    /// Creates a codec with no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec from loaded key material.
    ///
    /// A key pair can issue and verify; a public key can only verify.
    #[must_use]
    pub fn from_key_material(material: KeyMaterial) -> Self {
        match material {
            KeyMaterial::KeyPair(key) => Self::new().with_signer(key.clone()).with_verifier(key),
            KeyMaterial::PublicKey(key) => Self::new().with_verifier(key),
        }
    }

    /// Sets the signing capability.
    #[must_use]
    pub fn with_signer(mut self, signer: impl LicenseSigner + Send + Sync + 'static) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Sets the verification capability.
    #[must_use]
    pub fn with_verifier(mut self, verifier: impl LicenseVerifier + Send + Sync + 'static) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Returns true if this codec holds a private key.
    #[must_use]
    pub fn can_issue(&self) -> bool {
        self.signer.is_some()
    }

    /// Returns true if this codec holds a public key.
    #[must_use]
    pub fn can_verify(&self) -> bool {
        self.verifier.is_some()
    }

    /// Issues a license key for `data`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::NotConfiguredForIssuing`] without a private
    /// key, otherwise as [`issue_license`].
    pub fn issue<D: Canonicalize + ?Sized>(&self, data: &D) -> LicenseResult<String> {
        let signer = self
            .signer
            .as_deref()
            .ok_or(LicenseError::NotConfiguredForIssuing)?;
        issue_license(data, signer)
    }

    /// Verifies `license` for `data`.
    ///
    /// `Ok(false)` means the key is well formed but not valid for `data`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::NotConfiguredForVerification`] without a
    /// public key, otherwise as [`verify_license`].
    pub fn verify<D: Canonicalize + ?Sized>(&self, data: &D, license: &str) -> LicenseResult<bool> {
        let verifier = self
            .verifier
            .as_deref()
            .ok_or(LicenseError::NotConfiguredForVerification)?;
        verify_license(data, license, verifier)
    }
}

impl std::fmt::Debug for LicenseCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseCodec")
            .field("can_issue", &self.can_issue())
            .field("can_verify", &self.can_verify())
            .finish()
    }
}
