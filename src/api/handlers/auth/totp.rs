//! TOTP code verification against a stored base32 secret.

use anyhow::{Context, Result, anyhow};
use totp_rs::{Algorithm, Secret, TOTP};

const TOTP_DIGITS: usize = 6;
const TOTP_SKEW: u8 = 1;
const TOTP_STEP: u64 = 30;

/// Check a submitted code against the user's base32 secret.
///
/// The current time step and one adjacent step on each side are accepted, so
/// clock drift of up to one period does not reject a freshly generated code.
///
/// # Errors
/// Returns an error when the stored secret is not valid base32 or the system
/// clock is unavailable; a wrong code is `Ok(false)`.
pub(super) fn verify_code(secret_base32: &str, code: &str) -> Result<bool> {
    let secret = Secret::Encoded(secret_base32.trim().to_string())
        .to_bytes()
        .map_err(|err| anyhow!("stored OTP secret is not valid base32: {err:?}"))?;

    // new_unchecked: legacy provisioners issue 80-bit secrets, below the
    // RFC 4226 minimum that `TOTP::new` enforces.
    let totp = TOTP::new_unchecked(Algorithm::SHA1, TOTP_DIGITS, TOTP_SKEW, TOTP_STEP, secret);

    totp.check_current(code)
        .context("failed to read system time for TOTP check")
}

#[cfg(test)]
mod tests {
    use super::{TOTP_DIGITS, TOTP_SKEW, TOTP_STEP, verify_code};
    use totp_rs::{Algorithm, Secret, TOTP};

    // 32 base32 chars = 160-bit secret
    const SECRET: &str = "JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP";
    // 16 base32 chars = 80-bit secret, as issued by older provisioners
    const SHORT_SECRET: &str = "JBSWY3DPEHPK3PXP";

    fn current_code(secret_base32: &str) -> String {
        let secret = Secret::Encoded(secret_base32.to_string())
            .to_bytes()
            .expect("valid base32");
        let totp = TOTP::new_unchecked(Algorithm::SHA1, TOTP_DIGITS, TOTP_SKEW, TOTP_STEP, secret);
        totp.generate_current().expect("system time available")
    }

    #[test]
    fn current_code_verifies() {
        let code = current_code(SECRET);
        assert_eq!(verify_code(SECRET, &code).ok(), Some(true));
    }

    #[test]
    fn short_legacy_secret_verifies() {
        let code = current_code(SHORT_SECRET);
        assert_eq!(verify_code(SHORT_SECRET, &code).ok(), Some(true));
    }

    #[test]
    fn wrong_code_is_a_mismatch_not_an_error() {
        let code = current_code(SECRET);
        // Flip one digit so the code is valid-looking but wrong.
        let wrong: String = code
            .chars()
            .enumerate()
            .map(|(i, c)| if i == 0 { if c == '0' { '1' } else { '0' } } else { c })
            .collect();
        assert_eq!(verify_code(SECRET, &wrong).ok(), Some(false));
    }

    #[test]
    fn empty_code_is_a_mismatch() {
        assert_eq!(verify_code(SECRET, "").ok(), Some(false));
    }

    #[test]
    fn invalid_base32_secret_is_an_error() {
        assert!(verify_code("definitely not base32!", "123456").is_err());
    }
}
