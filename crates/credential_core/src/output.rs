//! Credential helper protocol output.
//!
//! Formats the result of a `get` operation the way git's credential layer
//! expects: bare `key=value` lines with no trailing explanatory text.

use std::io::{self, Write};

use github_app_client::models::InstallationAccessToken;
use secrecy::ExposeSecret;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// Writes the three credential lines for a resolved installation token.
///
/// This is the only place the token secret is exposed; the expiry is
/// rendered as unix seconds so git can drop the credential once it lapses.
pub fn write_credential<W: Write>(
    w: &mut W,
    username: &str,
    token: &InstallationAccessToken,
) -> io::Result<()> {
    write!(
        w,
        "username={}\npassword={}\npassword_expiry_utc={}\n",
        username,
        token.token.expose_secret(),
        token.expires_at.timestamp()
    )
}
