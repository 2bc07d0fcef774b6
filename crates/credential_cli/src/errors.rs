//! Error types for the credential helper binary.

use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the credential helper binary.
///
/// Argument validation happens before any network I/O, so the
/// configuration variants always surface without side effects.
#[derive(Error, Debug)]
pub enum Error {
    /// The App authentication pipeline failed.
    #[error(transparent)]
    Client(#[from] github_app_client::Error),

    /// A helper flow failed after the client was constructed.
    #[error(transparent)]
    Credential(#[from] credential_core::Error),

    /// Invalid or missing command-line arguments were provided.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The private key path could not be resolved to an absolute path.
    ///
    /// Generated git configurations reference the key by path, so a path
    /// that only resolves relative to the current directory would break
    /// once git invokes the helper from somewhere else.
    #[error("failed to resolve the private key path to an absolute path")]
    KeyPathResolution(#[source] io::Error),
}
