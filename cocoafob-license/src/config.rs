//! Codec configuration: where the key material comes from.
//!
//! ```json
//! { "key": { "source": "path", "path": "keys/pubkey.pem" } }
//! { "key": { "source": "pem", "pem": "-----BEGIN PUBLIC KEY-----\n..." } }
//! ```

use crate::codec::LicenseCodec;
use crate::error::LicenseResult;
use crate::key::KeyMaterial;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Source of PEM key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum KeySource {
    /// PEM file on disk.
    Path {
        /// File path.
        path: PathBuf,
    },
    /// Inline PEM text.
    Pem {
        /// PEM text.
        pem: String,
    },
}

impl KeySource {
    /// Loads the key material.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or holds no DSA key.
    pub fn load(&self) -> LicenseResult<KeyMaterial> {
        match self {
            Self::Path { path } => KeyMaterial::from_path(path),
            Self::Pem { pem } => KeyMaterial::from_pem(pem),
        }
    }
}

/// Configuration for building a [`LicenseCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Key material source.
    pub key: KeySource,
}

impl CodecConfig {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::Serialization`] if the JSON is invalid.
    pub fn from_json(json: &str) -> LicenseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads the key material and builds a codec.
    ///
    /// # Errors
    ///
    /// Same as [`KeySource::load`].
    pub fn build_codec(&self) -> LicenseResult<LicenseCodec> {
        let codec = LicenseCodec::from_key_material(self.key.load()?);
        debug!(
            can_issue = codec.can_issue(),
            can_verify = codec.can_verify(),
            "license codec configured"
        );
        Ok(codec)
    }
}
