//! App JWT construction and signing.
//!
//! A GitHub App proves its identity with a short lived JSON Web Token signed
//! by its private key. The token authorizes only App level endpoints
//! (installation lookup, installation token issuance); it is never usable as
//! a git credential itself.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, Header};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::Error;
use crate::AppIdentity;

#[cfg(test)]
#[path = "jwt_tests.rs"]
mod tests;

/// The maximum App JWT lifetime GitHub accepts, in minutes.
const APP_JWT_LIFETIME_MINUTES: i64 = 10;

/// Registered claims of a GitHub App JWT.
///
/// The issuer is the App ID or client ID; GitHub accepts either as a string.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iat: i64,
    exp: i64,
    iss: String,
}

/// A signed, time bounded App JWT.
///
/// Created fresh per invocation and never persisted. The signed token is
/// held as a [`SecretString`] so it cannot leak through `Debug` output.
#[derive(Debug)]
pub struct AppJwt {
    token: SecretString,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AppJwt {
    /// The signed compact JWT.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The instant the token was issued.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// The instant the token stops being accepted, ten minutes after issue.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Signs an App JWT for `identity`, valid from `now` for ten minutes.
///
/// `now` must be true wall clock time: the token is validated server side on
/// every request, and a stale instant produces tokens that are already
/// expired or not yet valid.
///
/// # Errors
///
/// Returns [`Error::SigningFailed`] if the loaded key cannot produce an
/// RS256 signature.
pub fn sign(identity: &AppIdentity, now: DateTime<Utc>) -> Result<AppJwt, Error> {
    let issued_at = now;
    let expires_at = now + Duration::minutes(APP_JWT_LIFETIME_MINUTES);

    let claims = Claims {
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
        iss: identity.app_id.clone(),
    };

    let token = encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &identity.private_key,
    )
    .map_err(|e| {
        error!(app_id = %identity.app_id, error = %e, "Failed to sign App JWT");
        Error::SigningFailed(e)
    })?;

    debug!(
        app_id = %identity.app_id,
        issued_at = %issued_at,
        expires_at = %expires_at,
        "Signed App JWT"
    );

    Ok(AppJwt {
        token: SecretString::from(token),
        issued_at,
        expires_at,
    })
}
