//! Configuration for the credential helper binary.
//!
//! The command line is validated here once, per operation, into an immutable
//! [`HelperConfig`] value that the rest of the program receives explicitly.
//! `store` and `erase` are dispatched before validation, so an incomplete
//! configuration never affects them.

use std::path::{self, PathBuf};

use github_app_client::{ApiBase, InstallationSelector};
use tracing::debug;

use crate::errors::Error;
use crate::Cli;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Validated App identity and host configuration for one invocation.
#[derive(Debug, Clone)]
pub struct HelperConfig {
    /// Username presented on the `username=` credential line.
    pub username: String,
    /// App ID or client ID.
    pub app_id: String,
    /// Absolute path to the App's private key.
    pub private_key_file: PathBuf,
    /// GitHub Enterprise domain, when not targeting github.com.
    pub domain: Option<String>,
}

impl HelperConfig {
    /// Validates the mandatory identity flags.
    ///
    /// The private key path is made absolute here so a generated git config
    /// keeps working regardless of git's working directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] when a mandatory flag is missing
    /// and [`Error::KeyPathResolution`] when the key path cannot be
    /// absolutized.
    pub fn from_cli(cli: &Cli) -> Result<Self, Error> {
        let username = require(cli.username.as_deref(), "username")?;
        let app_id = require(cli.app_id.as_deref(), "app-id")?;
        let key_file = cli.private_key_file.as_deref().ok_or_else(|| {
            Error::InvalidArguments("--private-key-file is mandatory".to_string())
        })?;

        let private_key_file = path::absolute(key_file).map_err(Error::KeyPathResolution)?;
        debug!(
            private_key_file = %private_key_file.display(),
            "Resolved private key path"
        );

        Ok(Self {
            username,
            app_id,
            private_key_file,
            domain: cli.domain.clone(),
        })
    }

    /// The API host derived from the optional `--domain` flag.
    pub fn api_base(&self) -> ApiBase {
        match &self.domain {
            Some(domain) => ApiBase::Enterprise(domain.clone()),
            None => ApiBase::Public,
        }
    }
}

fn require(value: Option<&str>, flag: &str) -> Result<String, Error> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::InvalidArguments(format!("--{flag} is mandatory"))),
    }
}

/// Builds the installation selector for a `get` invocation.
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] for a malformed `--repository` slug
/// or a lone `--owner`/`--repo`, and propagates
/// [`github_app_client::Error::AmbiguousSelector`] when no fragment is
/// given at all.
pub fn selector_from_cli(cli: &Cli) -> Result<InstallationSelector, Error> {
    let repository = match (&cli.repository, &cli.owner, &cli.repo) {
        (Some(slug), _, _) => Some(parse_slug(slug)?),
        (None, Some(owner), Some(repo)) => Some((owner.clone(), repo.clone())),
        (None, Some(_), None) | (None, None, Some(_)) => {
            return Err(Error::InvalidArguments(
                "--owner and --repo must be used together".to_string(),
            ))
        }
        (None, None, None) => None,
    };

    let selector = InstallationSelector::from_fragments(
        cli.installation_id,
        repository,
        cli.organization.clone(),
        cli.user.clone(),
    )?;
    Ok(selector)
}

fn parse_slug(slug: &str) -> Result<(String, String), Error> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::InvalidArguments(format!(
            "--repository must be OWNER/REPO, got `{slug}`"
        ))),
    }
}
