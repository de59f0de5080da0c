//! # Konfirmi (MFA Verification API)
//!
//! `konfirmi` completes the second step of a two-factor login flow. The
//! password login step (an external collaborator) authenticates the user and
//! hands back a signed `mfa_key` carrying the user id. This service verifies
//! that token, checks the submitted TOTP code against the user's stored
//! secret, and returns a long-lived API key scoped to the requesting device.
//!
//! ## Endpoint
//!
//! `POST /auth/mfa` with `{mfa_token, mfa_key, device}` returns
//! `{name, api_key}` on success and `{"error": ...}` with HTTP 400 on any
//! validation failure.
//!
//! ## Security notes
//!
//! - Bad signatures and unknown user ids produce the same error message, so
//!   callers cannot probe which ids exist.
//! - At most one API key exists per (user, device). Concurrent requests are
//!   serialized by a storage-level unique constraint, not a read-then-write
//!   check.
//! - The signing secret is injected through configuration
//!   (`--mfa-secret` / `KONFIRMI_MFA_SECRET`) and held as a redacted secret,
//!   never ambient global state.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_commit_hash_is_hex_or_unknown() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }
}
