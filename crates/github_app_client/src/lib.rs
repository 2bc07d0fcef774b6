//! Crate for authenticating against the GitHub REST API as a GitHub App.
//!
//! This crate owns the App authentication pipeline used by the credential
//! helper: loading the App's RSA private key, signing the short lived App
//! JWT, resolving which installation a caller means, exchanging the JWT for
//! an installation access token, and enumerating every installation of the
//! App.

use async_trait::async_trait;
use chrono::Utc;
use http::header::{HeaderName, ACCEPT, AUTHORIZATION};
use jsonwebtoken::EncodingKey;
use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, error, info, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod jwt;
pub use jwt::AppJwt;

pub mod key;
pub use key::load_private_key;

pub mod models;

pub mod selector;
pub use selector::InstallationSelector;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Page size used when enumerating installations.
const INSTALLATIONS_PAGE_SIZE: u8 = 10;

/// The REST API version header sent with every request.
const API_VERSION: &str = "2022-11-28";

/// The API host a helper invocation talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBase {
    /// The public `api.github.com` host.
    Public,
    /// A GitHub Enterprise Server domain, e.g. `github.example.com`.
    Enterprise(String),
}

impl ApiBase {
    /// The REST root every API call is issued against.
    ///
    /// Enterprise REST roots require the trailing slash; without it the
    /// final path segment is dropped when request paths are joined onto the
    /// root.
    pub fn rest_root(&self) -> Result<Url, Error> {
        let root = match self {
            Self::Public => Url::parse("https://api.github.com")?,
            Self::Enterprise(domain) => Url::parse(&format!("https://{domain}/api/v3/"))?,
        };
        Ok(root)
    }
}

/// The identity of the calling GitHub App.
///
/// Built once at startup from the validated CLI configuration and passed
/// explicitly to every component; immutable for the lifetime of the
/// invocation.
pub struct AppIdentity {
    /// App ID or client ID, used as the JWT issuer.
    pub app_id: String,
    /// The App's RSA private key.
    pub private_key: EncodingKey,
    /// The API host to authenticate against.
    pub api_base: ApiBase,
}

/// Operations the credential helper needs from an App-authenticated client.
///
/// The concrete implementation is [`GitHubAppClient`]; orchestration code
/// depends on this trait so it can be exercised against a stub.
#[async_trait]
pub trait AppInstallationClient: Send + Sync {
    /// Resolves a selector to a concrete installation id.
    ///
    /// An explicit id is returned verbatim without network activity; the
    /// other strategies issue exactly one lookup call each, with account
    /// names lower-cased (GitHub logins are case-insensitive and the lookup
    /// endpoints 404 on mixed-case input).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InstallationNotFound`] if the lookup fails or the
    /// App is not installed on the target.
    async fn resolve_installation(&self, selector: &InstallationSelector) -> Result<u64, Error>;

    /// Exchanges the App JWT for an installation access token.
    ///
    /// The request carries no body, so the token receives the
    /// installation's full default permission scope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenExchangeFailed`] on any non-success response
    /// or unparseable payload.
    async fn create_installation_token(
        &self,
        installation_id: u64,
    ) -> Result<models::InstallationAccessToken, Error>;

    /// Lists every installation of the App, in server order.
    ///
    /// Pages with a fixed page size until the server returns a short page,
    /// which at a fixed page size is how it signals no further page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnumerationFailed`] if any page fetch fails;
    /// partial results are discarded.
    async fn list_installations(&self) -> Result<Vec<models::Installation>, Error>;
}

/// A client for the GitHub REST API, authenticated as a GitHub App.
#[derive(Debug)]
pub struct GitHubAppClient {
    client: Octocrab,
}

impl GitHubAppClient {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Signs a fresh App JWT for `identity` and builds a client around it.
    ///
    /// The JWT is signed at the current wall-clock instant; a client is
    /// built once per invocation and never outlives it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SigningFailed`] if the key cannot sign RS256,
    /// [`Error::InvalidApiBase`] or [`Error::ClientBuild`] if the transport
    /// cannot be constructed.
    pub fn from_identity(identity: &AppIdentity) -> Result<Self, Error> {
        let jwt = jwt::sign(identity, Utc::now())?;
        let rest_root = identity.api_base.rest_root()?;
        Ok(Self::new(build_app_client(&jwt, &rest_root)?))
    }

    async fn installation_at(
        &self,
        path: &str,
        selector: &InstallationSelector,
    ) -> Result<u64, Error> {
        let result: OctocrabResult<models::Installation> =
            self.client.get(path, None::<&()>).await;
        match result {
            Ok(installation) => {
                info!(
                    selector = %selector,
                    installation_id = installation.id,
                    account_login = installation.account.login,
                    "Resolved installation"
                );
                Ok(installation.id)
            }
            Err(e) => {
                log_octocrab_error("Failed to look up installation", &e);
                Err(Error::InstallationNotFound {
                    selector: selector.to_string(),
                    source: e,
                })
            }
        }
    }
}

#[derive(Serialize)]
struct ListInstallationsParams {
    per_page: u8,
    page: u32,
}

#[async_trait]
impl AppInstallationClient for GitHubAppClient {
    #[instrument(skip(self), fields(selector = %selector))]
    async fn resolve_installation(&self, selector: &InstallationSelector) -> Result<u64, Error> {
        match selector {
            InstallationSelector::Id(id) => {
                debug!(installation_id = id, "Using explicit installation id");
                Ok(*id)
            }
            InstallationSelector::Repository { owner, repo } => {
                let path = format!(
                    "/repos/{}/{}/installation",
                    owner.to_lowercase(),
                    repo.to_lowercase()
                );
                self.installation_at(&path, selector).await
            }
            InstallationSelector::Organization(org) => {
                let path = format!("/orgs/{}/installation", org.to_lowercase());
                self.installation_at(&path, selector).await
            }
            InstallationSelector::User(user) => {
                let path = format!("/users/{}/installation", user.to_lowercase());
                self.installation_at(&path, selector).await
            }
        }
    }

    #[instrument(skip(self))]
    async fn create_installation_token(
        &self,
        installation_id: u64,
    ) -> Result<models::InstallationAccessToken, Error> {
        let path = format!("/app/installations/{installation_id}/access_tokens");
        let result: OctocrabResult<models::InstallationAccessToken> =
            self.client.post(path, None::<&()>).await;

        match result {
            Ok(token) => {
                info!(
                    installation_id,
                    expires_at = %token.expires_at,
                    "Created installation access token"
                );
                Ok(token)
            }
            Err(e) => {
                log_octocrab_error("Failed to create installation access token", &e);
                Err(Error::TokenExchangeFailed {
                    installation_id,
                    source: e,
                })
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_installations(&self) -> Result<Vec<models::Installation>, Error> {
        let mut installations = Vec::new();
        let mut page = 1u32;

        loop {
            let params = ListInstallationsParams {
                per_page: INSTALLATIONS_PAGE_SIZE,
                page,
            };
            let batch: Vec<models::Installation> = self
                .client
                .get("/app/installations", Some(&params))
                .await
                .map_err(|e| {
                    log_octocrab_error("Failed to fetch installations page", &e);
                    Error::EnumerationFailed(e)
                })?;

            let fetched = batch.len();
            installations.extend(batch);

            // A short page means the server has no further page.
            if fetched < usize::from(INSTALLATIONS_PAGE_SIZE) {
                break;
            }
            page += 1;
        }

        info!(
            count = installations.len(),
            "Retrieved installations for GitHub App"
        );
        Ok(installations)
    }
}

/// Creates an `Octocrab` client that authenticates every request with the
/// given App JWT.
///
/// All requests carry the bearer JWT, the pinned REST API version header,
/// and the GitHub JSON accept header, and are issued against `rest_root`.
///
/// # Errors
///
/// Returns [`Error::ClientBuild`] if the underlying client cannot be
/// constructed.
pub fn build_app_client(jwt: &AppJwt, rest_root: &Url) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .base_uri(rest_root.as_str())
        .map_err(|e| {
            error!(rest_root = %rest_root, error = %e, "Rejected API base URI");
            Error::ClientBuild(e.to_string())
        })?
        .add_header(
            AUTHORIZATION,
            format!("Bearer {}", jwt.token().expose_secret()),
        )
        .add_header(ACCEPT, "application/vnd.github+json".to_string())
        .add_header(
            HeaderName::from_static("x-github-api-version"),
            API_VERSION.to_string(),
        )
        .build()
        .map_err(|e| {
            error!(error = %e, "Failed to build Octocrab client");
            Error::ClientBuild(e.to_string())
        })
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            error!(
                error_message = %source.message,
                status = %source.status_code,
                "{}. Received an error from GitHub",
                message
            )
        }
        _ => error!(error_message = %e, "{}", message),
    }
}
