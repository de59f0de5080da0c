//! Database helpers for MFA verification: user lookup and the per-device
//! API key get-or-create.

use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sqlx::{PgPool, Row};
use tracing::{Instrument, debug};

/// User fields the MFA handler needs.
pub(super) struct UserRecord {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) enable_otp: bool,
    pub(super) otp_secret: Option<String>,
}

/// Look up a user by id (returns `None` when no such user exists).
pub(super) async fn lookup_user(pool: &PgPool, user_id: i64) -> Result<Option<UserRecord>> {
    let query = "SELECT id, name, enable_otp, otp_secret FROM users WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user")?;

    Ok(row.map(|row| UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        enable_otp: row.get("enable_otp"),
        otp_secret: row.get("otp_secret"),
    }))
}

/// Return the API key code for (user, device), creating it when absent.
///
/// The insert relies on the `UNIQUE (user_id, name)` constraint: two
/// concurrent calls for the same device cannot both insert; the loser's
/// insert is skipped and the surviving row's code is returned.
pub(super) async fn get_or_create_api_key(
    pool: &PgPool,
    user_id: i64,
    device: &str,
) -> Result<String> {
    if let Some(code) = lookup_api_key(pool, user_id, device).await? {
        return Ok(code);
    }

    debug!(user_id, device, "creating new api key");

    let code = generate_api_key_code()?;
    let query = r"
        INSERT INTO api_keys (user_id, name, code)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, name) DO NOTHING
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let result = sqlx::query(query)
        .bind(user_id)
        .bind(device)
        .bind(&code)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to insert api key")?;

    if result.rows_affected() == 1 {
        return Ok(code);
    }

    // A concurrent request created the key between the lookup and the
    // insert; the stored code wins.
    lookup_api_key(pool, user_id, device)
        .await?
        .context("api key missing after insert conflict")
}

async fn lookup_api_key(pool: &PgPool, user_id: i64, device: &str) -> Result<Option<String>> {
    let query = "SELECT code FROM api_keys WHERE user_id = $1 AND name = $2 LIMIT 1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .bind(device)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup api key")?;

    Ok(row.map(|row| row.get("code")))
}

/// Generate an opaque credential for a new API key.
/// The raw value is returned to the client once; nothing about it is derived
/// from the user or device.
fn generate_api_key_code() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate api key code")?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
