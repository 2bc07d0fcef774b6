//! `git-credential-github-app`: a git credential helper that authenticates
//! HTTPS operations as a GitHub App installation.
//!
//! On `get` the helper signs a short lived App JWT, resolves the configured
//! installation, exchanges the JWT for an installation access token, and
//! hands the token to git as the password. `store` and `erase` are accepted
//! as no-ops: tokens are re-derived from the private key on every request.
//! `generate` enumerates every installation of the App and prints a git
//! config routing each account to a scoped helper invocation.
//!
//! Stdout belongs to the credential protocol; all diagnostics go to stderr,
//! filtered by the `GIT_CREDENTIAL_GITHUB_APP_LOG` environment variable.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use github_app_client::{AppIdentity, GitHubAppClient, InstallationSelector};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod errors;

use config::HelperConfig;
use errors::Error;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Git credential helper for GitHub Apps
#[derive(Debug, Parser)]
#[command(name = "git-credential-github-app")]
#[command(version, about = "Git credential helper for GitHub Apps", long_about = None)]
pub(crate) struct Cli {
    /// Username presented to git; the App name is a good choice
    #[arg(long)]
    pub(crate) username: Option<String>,

    /// GitHub App ID or client ID
    #[arg(long)]
    pub(crate) app_id: Option<String>,

    /// Path to the App's PEM encoded RSA private key
    #[arg(long)]
    pub(crate) private_key_file: Option<PathBuf>,

    /// Explicit installation id; skips the installation lookup
    #[arg(long)]
    pub(crate) installation_id: Option<u64>,

    /// Repository the installation covers, as OWNER/REPO
    #[arg(long)]
    pub(crate) repository: Option<String>,

    /// Repository owner, used together with --repo
    #[arg(long)]
    pub(crate) owner: Option<String>,

    /// Repository name, used together with --owner
    #[arg(long)]
    pub(crate) repo: Option<String>,

    /// Organization the App is installed on
    #[arg(long)]
    pub(crate) organization: Option<String>,

    /// User account the App is installed on
    #[arg(long)]
    pub(crate) user: Option<String>,

    /// GitHub Enterprise Server domain, e.g. github.example.com
    #[arg(long)]
    pub(crate) domain: Option<String>,

    /// Credential helper operation to run
    #[arg(value_enum)]
    pub(crate) operation: Operation,
}

/// The verbs git (or the user, for `generate`) invokes the helper with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Operation {
    /// Produce a credential for git
    Get,
    /// Accepted and ignored; nothing is persisted
    Store,
    /// Accepted and ignored; nothing is persisted
    Erase,
    /// Print a git config covering every installation of the App
    Generate,
}

fn connect(config: &HelperConfig) -> Result<GitHubAppClient, Error> {
    let private_key = github_app_client::load_private_key(&config.private_key_file)?;
    let identity = AppIdentity {
        app_id: config.app_id.clone(),
        private_key,
        api_base: config.api_base(),
    };
    Ok(GitHubAppClient::from_identity(&identity)?)
}

fn prepare_get(cli: &Cli) -> Result<(HelperConfig, InstallationSelector, GitHubAppClient), Error> {
    let config = HelperConfig::from_cli(cli)?;
    let selector = config::selector_from_cli(cli)?;
    let client = connect(&config)?;
    Ok((config, selector, client))
}

async fn run_generate(cli: &Cli) -> Result<(), Error> {
    let config = HelperConfig::from_cli(cli)?;
    let client = connect(&config)?;
    let settings = credential_core::GeneratorSettings {
        username: config.username.clone(),
        app_id: config.app_id.clone(),
        private_key_file: config.private_key_file.clone(),
        domain: config.domain.clone(),
    };

    let mut stdout = io::stdout();
    credential_core::generate_git_config(&client, &settings, &mut stdout).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging; stdout is reserved for the credential protocol.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_env("GIT_CREDENTIAL_GITHUB_APP_LOG"))
        .init();

    let cli = Cli::parse();
    match cli.operation {
        // A helper need not implement every verb. Tokens are re-derived per
        // request, so there is nothing to store or invalidate.
        Operation::Store | Operation::Erase => {}
        Operation::Get => {
            let (config, selector, client) = match prepare_get(&cli) {
                Ok(prepared) => prepared,
                Err(e) => {
                    error!("Error: {e}");
                    process::exit(1);
                }
            };

            let mut stdout = io::stdout();
            if let Err(e) =
                credential_core::fill_credential(&client, &config.username, &selector, &mut stdout)
                    .await
            {
                // Tell git to stop retrying the helper before any diagnostics.
                println!("quit=1");
                error!("Error: {e}");
                process::exit(1);
            }
        }
        Operation::Generate => {
            if let Err(e) = run_generate(&cli).await {
                error!("Error: {e}");
                process::exit(1);
            }
        }
    }
}
