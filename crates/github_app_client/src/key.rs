//! Private key loading for GitHub App authentication.
//!
//! A GitHub App authenticates with an RSA private key downloaded from the
//! App's settings page. The key is read once per invocation and held only in
//! memory for the lifetime of the process.

use std::fs;
use std::path::Path;

use jsonwebtoken::EncodingKey;
use tracing::{debug, error};

use crate::errors::Error;

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;

/// Reads a PEM encoded RSA private key from `path`.
///
/// # Errors
///
/// Returns [`Error::KeyUnreadable`] if the file cannot be read and
/// [`Error::KeyMalformed`] if its contents do not parse as a PEM RSA
/// private key.
pub fn load_private_key(path: &Path) -> Result<EncodingKey, Error> {
    let pem = fs::read(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to read private key file");
        Error::KeyUnreadable(path.to_path_buf(), e)
    })?;

    let key = EncodingKey::from_rsa_pem(&pem).map_err(|e| {
        error!(
            path = %path.display(),
            error = %e,
            "Private key file does not contain a PEM encoded RSA private key"
        );
        Error::KeyMalformed(path.to_path_buf(), e)
    })?;

    debug!(path = %path.display(), "Loaded App private key");
    Ok(key)
}
