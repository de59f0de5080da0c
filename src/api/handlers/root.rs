use axum::response::IntoResponse;

// Banner route, intentionally outside the OpenAPI document.
pub async fn root() -> impl IntoResponse {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
