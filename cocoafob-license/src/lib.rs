//! CocoaFob license keys.
//!
//! This crate issues and verifies short, human-typeable license keys derived
//! from a DSA signature over the registration details:
//! - Canonicalization of product code, name and email into signed bytes
//! - Signing and verification through injected capabilities
//! - The CocoaFob text encoding of the raw signature
//!
//! # Design Principles
//!
//! - **Offline issuing**: the private key never leaves the vendor
//! - **Public key in the product**: shipped software can only verify
//! - **Wrong is not an error**: a well-formed key that does not match is `Ok(false)`
//! - **No ambient state**: capabilities are passed in, nothing is registered globally
//!
//! # License Key Format
//!
//! Keys are base-32 (RFC 4648) with `O` written as `8`, `I` as `9`, padding
//! removed, and grouped in fives: `GAWQE-FC3EL-EEC85-UPPXD-...`.
//!
//! ```no_run
//! use cocoafob_license::{KeyMaterial, LicenseCodec, LicenseData};
//!
//! # fn main() -> cocoafob_license::LicenseResult<()> {
//! let codec = LicenseCodec::from_key_material(KeyMaterial::from_path("privkey.pem")?);
//! let data = LicenseData::new("Karl").with_product_code("Test");
//! let license = codec.issue(&data)?;
//! assert!(codec.verify(&data, &license)?);
//! # Ok(())
//! # }
//! ```

mod capability;
mod codec;
mod config;
mod data;
mod encoding;
mod error;
mod key;

pub use capability::{LicenseSigner, LicenseVerifier};
pub use codec::{issue_license, verify_license, LicenseCodec};
pub use config::{CodecConfig, KeySource};
pub use data::{Canonicalize, LicenseData};
pub use encoding::{decode_license_key, encode_license_key, CHUNK_SIZE};
pub use error::{BoxError, LicenseError, LicenseResult};
pub use key::{DsaSigningKey, DsaVerifyingKey, KeyMaterial};
