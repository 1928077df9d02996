//! License metadata and its canonical signed form.
//!
//! The canonical string is `[product_code ","] name ["," email]`. Field
//! contents are used verbatim: no trimming, case folding or escaping. A comma
//! inside a field shifts the field boundaries, and changing that would break
//! every key already issued in this format.

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Serialize};

/// Produces the exact bytes that get signed and verified.
///
/// [`LicenseData`] implements the standard CocoaFob layout. Applications that
/// sign something else implement this trait on their own type; issuer and
/// verifier must then agree on that implementation.
pub trait Canonicalize {
    /// Returns the canonical string form.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidLicenseData`] if required fields are missing.
    fn canonical_string(&self) -> LicenseResult<String>;

    /// Returns the UTF-8 bytes of [`Canonicalize::canonical_string`].
    ///
    /// # Errors
    ///
    /// Same as [`Canonicalize::canonical_string`].
    fn canonicalize(&self) -> LicenseResult<Vec<u8>> {
        self.canonical_string().map(String::into_bytes)
    }
}

/// The registration details a license is issued for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseData {
    /// Vendor product identifier.
    pub product_code: Option<String>,
    /// Registered name. Required before canonicalization.
    pub name: Option<String>,
    /// Registered email.
    pub email: Option<String>,
}

impl LicenseData {
    /// Creates license data for a registered name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            product_code: None,
            name: Some(name.into()),
            email: None,
        }
    }

    /// Sets the product code.
    #[must_use]
    pub fn with_product_code(mut self, product_code: impl Into<String>) -> Self {
        self.product_code = Some(product_code.into());
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets or replaces the registered name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl Canonicalize for LicenseData {
    fn canonical_string(&self) -> LicenseResult<String> {
        let name = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            Some(_) => {
                return Err(LicenseError::InvalidLicenseData(
                    "name must not be empty".to_string(),
                ));
            }
            None => {
                return Err(LicenseError::InvalidLicenseData(
                    "name is required".to_string(),
                ));
            }
        };

        let mut result = String::with_capacity(
            name.len()
                + self.product_code.as_ref().map_or(0, |p| p.len() + 1)
                + self.email.as_ref().map_or(0, |e| e.len() + 1),
        );

        if let Some(product_code) = &self.product_code {
            result.push_str(product_code);
            result.push(',');
        }

        result.push_str(name);

        if let Some(email) = &self.email {
            result.push(',');
            result.push_str(email);
        }

        Ok(result)
    }
}
