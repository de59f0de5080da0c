//! Command-line argument dispatch and server initialization.
//!
//! This module maps validated CLI arguments to the appropriate action,
//! such as starting the API server with its configuration.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::auth::ARG_MFA_SECRET;
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;
    let mfa_secret = matches
        .get_one::<String>(ARG_MFA_SECRET)
        .cloned()
        .context("missing required argument: --mfa-secret")?;

    Ok(Action::Server(Args {
        port,
        dsn,
        mfa_secret: SecretString::from(mfa_secret),
    }))
}
