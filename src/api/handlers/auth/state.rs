//! Shared auth state injected into handlers.

use super::signer::TokenSigner;

pub struct AuthState {
    signer: TokenSigner,
}

impl AuthState {
    #[must_use]
    pub fn new(signer: TokenSigner) -> Self {
        Self { signer }
    }

    pub(super) fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthState, TokenSigner};
    use secrecy::SecretString;

    #[test]
    fn state_exposes_signer() {
        let signer = TokenSigner::new(SecretString::from("sekreto".to_string()));
        let token = signer.sign(7);
        let state = AuthState::new(signer);
        assert_eq!(state.signer().unsign(&token).ok(), Some(7));
    }
}
