//! Signing and verification capabilities injected into the codec.
//!
//! Implementations own the key material and the signature algorithm. The
//! codec only hands them canonical message bytes and raw signature bytes.
//! A codec shared across threads requires its capabilities to be
//! `Send + Sync`.

/// Produces a raw signature over a message using a private key.
pub trait LicenseSigner {
    /// Signs `message` and returns the encoded signature bytes.
    ///
    /// # Errors
    ///
    /// Returns `signature::Error` if the primitive fails (e.g. invalid key).
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, signature::Error>;
}

/// Checks a raw signature over a message using a public key.
pub trait LicenseVerifier {
    /// Returns whether `signature` is valid for `message`.
    ///
    /// A signature that does not match, including bytes that are not a
    /// well-formed signature at all, is `Ok(false)`. Errors are reserved for
    /// faults of the primitive itself.
    ///
    /// # Errors
    ///
    /// Returns `signature::Error` if verification could not be carried out.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, signature::Error>;
}
