//! Error types for the credential helper flows.

use std::io;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while running a helper operation.
///
/// Every variant is terminal for the invocation; the binary decides the
/// exit code and whether the `quit=1` sentinel is emitted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The App authentication pipeline failed.
    ///
    /// Wraps resolution, token-exchange and enumeration failures from the
    /// client crate.
    #[error(transparent)]
    Client(#[from] github_app_client::Error),

    /// The helper output could not be written to the output stream.
    #[error("failed to write helper output")]
    Output(#[source] io::Error),
}
