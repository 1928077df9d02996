//! Error types for license issuing and verification.

use thiserror::Error;

/// Boxed cause carried by [`LicenseError::LicenseOperationFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Licensing-specific errors.
///
/// A license that decodes cleanly but whose signature does not match is not an
/// error: verification reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// License data cannot be canonicalized (e.g. missing name).
    #[error("invalid license data: {0}")]
    InvalidLicenseData(String),

    /// The codec holds no private key.
    #[error("cannot issue licenses: no private key configured")]
    NotConfiguredForIssuing,

    /// The codec holds no public key.
    #[error("cannot verify licenses: no public key configured")]
    NotConfiguredForVerification,

    /// The license key string cannot be decoded back to signature bytes.
    #[error("malformed license key: {0}")]
    MalformedLicenseKey(String),

    /// Signing or verification failed underneath the codec.
    #[error("license operation failed: {0}")]
    LicenseOperationFailed(#[source] BoxError),

    /// Key source did not contain usable key material.
    #[error("invalid key material: {0}")]
    KeyMaterial(String),

    /// Reading key material failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LicenseError {
    /// Wraps any error as [`LicenseError::LicenseOperationFailed`].
    pub(crate) fn operation_failed(cause: impl Into<BoxError>) -> Self {
        Self::LicenseOperationFailed(cause.into())
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
