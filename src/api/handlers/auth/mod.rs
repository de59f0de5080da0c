//! MFA challenge completion.
//!
//! Flow Overview:
//! 1) The password login step (external) authenticates the user and returns a
//!    signed `mfa_key` carrying the user id.
//! 2) The client calls `POST /auth/mfa` with that key, the TOTP code the user
//!    entered, and a device label.
//! 3) On success the handler returns the user's name and the API key for that
//!    device, creating the key on first use.
//!
//! Security boundaries:
//! - Signature failures and unknown user ids are collapsed into one error
//!   message so callers cannot probe which ids exist.
//! - One API key per (user, device), enforced by a storage-level unique
//!   constraint rather than a read-then-write check.

pub(crate) mod mfa;
mod signer;
mod state;
mod storage;
mod totp;
pub(crate) mod types;

pub use signer::TokenSigner;
pub use state::AuthState;
