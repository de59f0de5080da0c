//! The MFA challenge completion endpoint.

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::{
    AuthState, storage, totp,
    types::{ErrorResponse, MfaVerifyRequest, MfaVerifyResponse},
};

pub(crate) const ERR_EMPTY_BODY: &str = "request body cannot be empty";
pub(crate) const ERR_INVALID_MFA_KEY: &str = "Invalid mfa_key";
pub(crate) const ERR_OTP_NOT_ENABLED: &str =
    "This endpoint should only be used by user who enables MFA";
pub(crate) const ERR_WRONG_TOTP: &str = "Wrong TOTP Token";

#[utoipa::path(
    post,
    path = "/auth/mfa",
    request_body = MfaVerifyRequest,
    responses(
        (status = 200, description = "TOTP code accepted; returns the user name and the device API key", body = MfaVerifyResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
/// Complete an MFA challenge and return the per-device API key.
pub async fn mfa(
    pool: Extension<PgPool>,
    state: Extension<Arc<AuthState>>,
    payload: Option<Json<MfaVerifyRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return bad_request(ERR_EMPTY_BODY);
    };

    let Ok(user_id) = state.signer().unsign(&request.mfa_key) else {
        return bad_request(ERR_INVALID_MFA_KEY);
    };

    let user = match storage::lookup_user(&pool, user_id).await {
        Ok(Some(user)) => user,
        // Same message as a bad signature: callers must not learn whether
        // the id was well-formed but nonexistent.
        Ok(None) => return bad_request(ERR_INVALID_MFA_KEY),
        Err(err) => {
            error!("Failed to lookup user: {err:#}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if !user.enable_otp {
        return bad_request(ERR_OTP_NOT_ENABLED);
    }

    let Some(otp_secret) = user.otp_secret.as_deref() else {
        // enable_otp without a secret violates the data invariant
        error!(user_id, "user has OTP enabled but no OTP secret");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    match totp::verify_code(otp_secret, &request.mfa_token) {
        Ok(true) => {}
        Ok(false) => return bad_request(ERR_WRONG_TOTP),
        Err(err) => {
            error!("Failed to verify TOTP code: {err:#}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    let api_key = match storage::get_or_create_api_key(&pool, user.id, &request.device).await {
        Ok(code) => code,
        Err(err) => {
            error!("Failed to get or create api key: {err:#}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        StatusCode::OK,
        Json(MfaVerifyResponse {
            name: user.name,
            api_key,
        }),
    )
        .into_response()
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
