//! Request/response types for the MFA endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MfaVerifyRequest {
    /// TOTP code the user entered.
    pub mfa_token: String,
    /// Signed token obtained from the previous auth step (e.g. /auth/login).
    pub mfa_key: String,
    /// Device name; the returned API key is associated with this device.
    pub device: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MfaVerifyResponse {
    pub name: String,
    pub api_key: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
