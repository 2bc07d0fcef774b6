//! Git configuration emitter for discovery mode.
//!
//! Renders one credential stanza per installation so a single
//! `git config --global` block routes every account the App is installed on
//! to a correctly scoped helper invocation, plus a shared caching stanza and
//! an ssh-to-https rewrite.

use std::io::{self, Write};
use std::path::PathBuf;

use github_app_client::models::Installation;

#[cfg(test)]
#[path = "git_config_tests.rs"]
mod tests;

/// How long git's `cache` helper keeps a credential before this helper runs
/// again: 12 hours.
const CACHE_TIMEOUT_SECONDS: u32 = 43_200;

/// The caller identity baked into each generated helper invocation.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Username to present on generated `get` invocations.
    pub username: String,
    /// App ID or client ID.
    pub app_id: String,
    /// Absolute path to the private key file.
    pub private_key_file: PathBuf,
    /// Enterprise domain, if any; defaults to `github.com`.
    pub domain: Option<String>,
}

impl GeneratorSettings {
    fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or("github.com")
    }
}

/// Renders the git config for the given installations, in enumeration order.
///
/// The helper value is the unprefixed helper name: git resolves non-absolute
/// helper names by prepending `git-credential-`.
pub fn render<W: Write>(
    w: &mut W,
    installations: &[Installation],
    settings: &GeneratorSettings,
) -> io::Result<()> {
    for installation in installations {
        writeln!(w, "[credential \"{}\"]", installation.account.html_url)?;
        writeln!(w, "\tuseHttpPath = true")?;
        writeln!(
            w,
            "\thelper = \"github-app --username {} --app-id {} --private-key-file {} --installation-id {}\"",
            settings.username,
            settings.app_id,
            settings.private_key_file.display(),
            installation.id
        )?;
    }

    let domain = settings.domain();
    writeln!(w, "[credential \"https://{domain}\"]")?;
    writeln!(w, "\thelper = \"cache --timeout={CACHE_TIMEOUT_SECONDS}\"")?;
    writeln!(w, "[url \"https://{domain}\"]")?;
    writeln!(w, "\tinsteadOf = ssh://git@{domain}")?;

    Ok(())
}
