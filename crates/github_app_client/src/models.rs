//! GitHub App installation domain types.
//!
//! These structs mirror the REST payloads the helper consumes. They are
//! deserialized directly from API responses and treated as read-only.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub account (user or organization).
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// The login name of the account
    pub login: String,
    /// The web URL of the account, used as the credential-stanza key
    pub html_url: String,
    /// The type of account (User or Organization)
    #[serde(rename = "type")]
    pub account_type: String,
}

/// Represents a GitHub App installation.
///
/// An installation binds the App to one organization, user, or repository
/// set and is identified by a stable integer id.
#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    /// The unique ID of the installation
    pub id: u64,
    /// The account (user or organization) where the app is installed
    pub account: Account,
}

/// An installation access token issued by GitHub.
///
/// The token is a verbatim echo of the server response, never generated or
/// altered locally. It is held as a [`SecretString`] so it can only be
/// revealed at the single point that writes the credential output.
#[derive(Debug, Deserialize)]
pub struct InstallationAccessToken {
    /// The opaque bearer credential
    pub token: SecretString,
    /// Server-assigned absolute expiry, typically about one hour out
    pub expires_at: DateTime<Utc>,
}
