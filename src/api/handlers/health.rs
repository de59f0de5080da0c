//! Database-aware health probe.

use crate::GIT_COMMIT_HASH;
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgPool};
use tokio::time::{Duration, timeout};
use tracing::{Instrument, debug, error, info_span, warn};
use utoipa::ToSchema;

const HEALTH_DB_TIMEOUT_SECONDS: u64 = 2;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses (
        (status = 200, description = "Database connection is healthy", body = Health),
        (status = 503, description = "Database connection is unhealthy", body = Health)
    ),
    tag = "health",
)]
/// Report service health including database connectivity.
pub async fn health(method: Method, pool: Extension<PgPool>) -> impl IntoResponse {
    let db_healthy = database_healthy(&pool.0).await;

    if db_healthy {
        debug!("Database connection is healthy");
    } else {
        debug!("Database connection is unhealthy");
    }

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if db_healthy {
            "ok".to_string()
        } else {
            "error".to_string()
        },
    };

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = format!(
        "{}:{}:{}",
        health.name,
        health.version,
        short_commit(&health.commit)
    )
    .parse::<HeaderValue>()
    {
        headers.insert("X-App", value);
    }

    if db_healthy {
        (StatusCode::OK, headers, body)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, headers, body)
    }
}

/// Probe database connectivity with a bounded acquire + ping.
async fn database_healthy(pool: &PgPool) -> bool {
    let acquire_span = info_span!(
        "db.acquire",
        db.system = "postgresql",
        db.operation = "ACQUIRE"
    );

    let probe = async {
        match pool.acquire().instrument(acquire_span).await {
            Ok(mut conn) => {
                let ping_span =
                    info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
                match conn.ping().instrument(ping_span).await {
                    Ok(()) => true,
                    Err(error) => {
                        error!("Failed to ping database: {}", error);
                        false
                    }
                }
            }
            Err(error) => {
                error!("Failed to acquire database connection: {}", error);
                false
            }
        }
    };

    match timeout(Duration::from_secs(HEALTH_DB_TIMEOUT_SECONDS), probe).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Database health check timed out");
            false
        }
    }
}

fn short_commit(hash: &str) -> &str {
    if hash.len() > 7 { &hash[..7] } else { hash }
}

#[cfg(test)]
mod tests {
    use super::{Health, short_commit};

    #[test]
    fn short_commit_truncates_long_hashes() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
    }

    #[test]
    fn short_commit_keeps_short_hashes() {
        assert_eq!(short_commit("abc"), "abc");
        assert_eq!(short_commit(""), "");
    }

    #[test]
    fn health_serializes_expected_fields() {
        let health = Health {
            commit: "deadbeef".to_string(),
            name: "konfirmi".to_string(),
            version: "0.1.0".to_string(),
            database: "ok".to_string(),
        };
        let value = serde_json::to_value(&health).expect("health serializes");
        assert_eq!(value["database"], "ok");
        assert_eq!(value["name"], "konfirmi");
    }
}
