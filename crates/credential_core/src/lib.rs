//! Orchestration of the credential helper flows.
//!
//! This crate drives the [`github_app_client`] pipeline for the two
//! user-visible operations: filling a credential for git (`get`) and
//! generating a ready-to-use git configuration covering every installation
//! of the App (`generate`). The `store` and `erase` verbs never reach this
//! crate; they are accepted as no-ops by the binary because installation
//! tokens are re-derived from the private key on every request and nothing
//! needs git to persist them.

use std::io::Write;

use github_app_client::{AppInstallationClient, InstallationSelector};
use tracing::{info, instrument};

pub mod errors;
pub use errors::Error;

pub mod git_config;
pub use git_config::GeneratorSettings;

pub mod output;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Runs the `get` flow: resolve the installation, exchange the App JWT for
/// an installation token, and write the credential lines to `out`.
///
/// Nothing is written until both network calls have succeeded, so a failure
/// never leaves a partial credential on the stream.
///
/// # Errors
///
/// Propagates resolution and exchange failures from the client and I/O
/// failures from the writer; all are fatal to the invocation.
#[instrument(skip(client, out), fields(selector = %selector))]
pub async fn fill_credential<C, W>(
    client: &C,
    username: &str,
    selector: &InstallationSelector,
    out: &mut W,
) -> Result<(), Error>
where
    C: AppInstallationClient + ?Sized,
    W: Write,
{
    let installation_id = client.resolve_installation(selector).await?;
    let token = client.create_installation_token(installation_id).await?;

    output::write_credential(out, username, &token).map_err(Error::Output)?;

    info!(installation_id, "Filled credential for git");
    Ok(())
}

/// Runs the discovery flow: enumerate every installation of the App and
/// emit one credential stanza per installation plus the shared cache and
/// URL-rewrite stanzas.
///
/// # Errors
///
/// Propagates enumeration failures from the client (partial installation
/// lists are never rendered) and I/O failures from the writer.
#[instrument(skip(client, settings, out))]
pub async fn generate_git_config<C, W>(
    client: &C,
    settings: &GeneratorSettings,
    out: &mut W,
) -> Result<(), Error>
where
    C: AppInstallationClient + ?Sized,
    W: Write,
{
    let installations = client.list_installations().await?;

    git_config::render(out, &installations, settings).map_err(Error::Output)?;

    info!(
        count = installations.len(),
        "Generated git config for installations"
    );
    Ok(())
}
