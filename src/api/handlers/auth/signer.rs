//! Signed `mfa_key` token handling.
//!
//! The login step signs the user id with a server-wide secret; this module
//! verifies the signature and recovers the id. The token format is
//! `"<user_id>.<base64url signature>"` with an HMAC-SHA256 signature over the
//! decimal id.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Token failed verification.
///
/// Deliberately opaque: callers cannot distinguish a malformed token from a
/// bad signature, so the error message leaks nothing about which check failed.
#[derive(Debug, thiserror::Error)]
#[error("invalid signed token")]
pub struct InvalidToken;

#[derive(Clone)]
pub struct TokenSigner {
    secret: SecretString,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Sign a user id into an `mfa_key` token.
    #[must_use]
    pub fn sign(&self, user_id: i64) -> String {
        let value = user_id.to_string();
        let signature = URL_SAFE_NO_PAD.encode(self.signature_for(value.as_bytes()));
        format!("{value}.{signature}")
    }

    /// Verify an `mfa_key` token and recover the embedded user id.
    ///
    /// # Errors
    /// Returns [`InvalidToken`] for any malformed or tampered token.
    pub fn unsign(&self, token: &str) -> Result<i64, InvalidToken> {
        let (value, signature) = token.rsplit_once('.').ok_or(InvalidToken)?;
        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| InvalidToken)?;

        let mut mac = self.keyed_mac();
        mac.update(value.as_bytes());
        // verify_slice is constant-time
        mac.verify_slice(&signature).map_err(|_| InvalidToken)?;

        value.parse().map_err(|_| InvalidToken)
    }

    fn keyed_mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length")
    }

    fn signature_for(&self, value: &[u8]) -> Vec<u8> {
        let mut mac = self.keyed_mac();
        mac.update(value);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::{HmacSha256, TokenSigner};
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use hmac::Mac;
    use secrecy::SecretString;

    fn signer(secret: &str) -> TokenSigner {
        TokenSigner::new(SecretString::from(secret.to_string()))
    }

    #[test]
    fn sign_then_unsign_round_trips() {
        let signer = signer("sekreto");
        for user_id in [0, 1, 42, 999_999, i64::MAX] {
            let token = signer.sign(user_id);
            assert_eq!(signer.unsign(&token).ok(), Some(user_id));
        }
    }

    #[test]
    fn token_format_is_value_dot_signature() {
        let token = signer("sekreto").sign(42);
        let (value, signature) = token.rsplit_once('.').expect("token has a separator");
        assert_eq!(value, "42");
        assert!(URL_SAFE_NO_PAD.decode(signature).is_ok());
    }

    #[test]
    fn tampered_value_is_rejected() {
        let signer = signer("sekreto");
        let token = signer.sign(42);
        let tampered = token.replacen("42", "43", 1);
        assert!(signer.unsign(&tampered).is_err());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let signer = signer("sekreto");
        let mut token = signer.sign(42);
        let last = token.pop().expect("token is not empty");
        token.push(if last == 'A' { 'B' } else { 'A' });
        assert!(signer.unsign(&token).is_err());
    }

    #[test]
    fn garbage_and_empty_tokens_are_rejected() {
        let signer = signer("sekreto");
        assert!(signer.unsign("").is_err());
        assert!(signer.unsign("no-separator").is_err());
        assert!(signer.unsign("42.!!!not-base64!!!").is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = signer("sekreto").sign(42);
        assert!(signer("alia-sekreto").unsign(&token).is_err());
    }

    #[test]
    fn valid_signature_over_non_numeric_value_is_rejected() {
        // A correctly signed payload that is not a user id must still fail,
        // with the same opaque error.
        let mut mac = HmacSha256::new_from_slice(b"sekreto").expect("any key length");
        mac.update(b"not-a-number");
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        let token = format!("not-a-number.{signature}");
        assert!(signer("sekreto").unsign(&token).is_err());
    }

    #[test]
    fn error_message_is_opaque() {
        let err = signer("sekreto").unsign("junk").expect_err("must fail");
        assert_eq!(err.to_string(), "invalid signed token");
    }
}
