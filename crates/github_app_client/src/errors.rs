//! Error types for GitHub App client operations.
//!
//! This module defines the error types that can occur while authenticating as
//! a GitHub App and working with its installations. Every error here is
//! terminal for a single helper invocation; callers decide the process exit
//! behavior.

use std::path::PathBuf;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub App client operations.
///
/// Each variant maps to one stage of the authentication pipeline: loading the
/// private key, signing the App JWT, resolving an installation, exchanging
/// the JWT for an installation token, or enumerating installations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No usable installation selector fragment was supplied.
    ///
    /// Resolution needs exactly one of: an explicit installation id, an
    /// `owner/repo` slug, an organization name, or a user name.
    #[error("no installation selector provided; supply an installation id, repository, organization or user")]
    AmbiguousSelector,

    /// A page fetch failed while enumerating the App's installations.
    ///
    /// Partial results are discarded; the caller never sees an incomplete
    /// installation list.
    #[error("failed to list App installations")]
    EnumerationFailed(#[source] octocrab::Error),

    /// The configured API base URL could not be constructed.
    ///
    /// Usually means the enterprise domain contains characters that do not
    /// form a valid `https://<domain>/api/v3/` URL.
    #[error("invalid API base URL: {0}")]
    InvalidApiBase(#[from] url::ParseError),

    /// No installation could be found for the given selector.
    ///
    /// The App is not installed on the target account or repository, or the
    /// lookup call itself failed.
    #[error("no installation found for {selector}")]
    InstallationNotFound {
        selector: String,
        #[source]
        source: octocrab::Error,
    },

    /// The private key file could not be parsed as a PEM RSA private key.
    #[error("private key file {0} is not a PEM encoded RSA private key")]
    KeyMalformed(PathBuf, #[source] jsonwebtoken::errors::Error),

    /// The private key file could not be read.
    #[error("failed to read private key file {0}")]
    KeyUnreadable(PathBuf, #[source] std::io::Error),

    /// The App JWT could not be signed with the loaded key.
    ///
    /// Occurs when the key is readable and PEM shaped but unusable for
    /// RS256, for example an EC key in an RSA wrapper.
    #[error("failed to sign App JWT")]
    SigningFailed(#[source] jsonwebtoken::errors::Error),

    /// The installation access-token endpoint returned a failure or an
    /// unparseable payload.
    #[error("failed to create installation access token for installation {installation_id}")]
    TokenExchangeFailed {
        installation_id: u64,
        #[source]
        source: octocrab::Error,
    },

    /// The octocrab client could not be constructed.
    #[error("failed to build the GitHub API client: {0}")]
    ClientBuild(String),
}
