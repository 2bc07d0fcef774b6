//! Installation selection.
//!
//! An App can be installed on many accounts; each invocation of the helper
//! targets exactly one installation. The selector names that installation
//! either directly by id or indirectly through the account it is installed
//! on.

use std::fmt;

use crate::errors::Error;

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;

/// Identifies the installation a helper invocation should authenticate as.
///
/// Exactly one resolution strategy is attempted per invocation; see
/// [`InstallationSelector::from_fragments`] for the precedence between
/// flag fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallationSelector {
    /// An explicit installation id. Resolution is a no-op.
    Id(u64),
    /// The installation covering a single repository.
    Repository { owner: String, repo: String },
    /// The installation on an organization account.
    Organization(String),
    /// The installation on a user account.
    User(String),
}

impl InstallationSelector {
    /// Builds a selector from the flag fragments a caller supplied.
    ///
    /// When more than one fragment is present the highest precedence one
    /// wins: explicit id, then repository, then organization, then user.
    /// The ordering mirrors how selection strategies were added to the tool
    /// over time without changing the behavior of existing configurations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousSelector`] when every fragment is empty.
    pub fn from_fragments(
        installation_id: Option<u64>,
        repository: Option<(String, String)>,
        organization: Option<String>,
        user: Option<String>,
    ) -> Result<Self, Error> {
        if let Some(id) = installation_id {
            return Ok(Self::Id(id));
        }
        if let Some((owner, repo)) = repository {
            return Ok(Self::Repository { owner, repo });
        }
        if let Some(org) = organization {
            return Ok(Self::Organization(org));
        }
        if let Some(user) = user {
            return Ok(Self::User(user));
        }
        Err(Error::AmbiguousSelector)
    }
}

impl fmt::Display for InstallationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "installation {id}"),
            Self::Repository { owner, repo } => write!(f, "repository {owner}/{repo}"),
            Self::Organization(org) => write!(f, "organization {org}"),
            Self::User(user) => write!(f, "user {user}"),
        }
    }
}
