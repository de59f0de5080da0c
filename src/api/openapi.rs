use crate::api::handlers::{auth, health};
use utoipa::openapi::{InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated document.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and included in the generated `OpenAPI` document.
pub(crate) fn api_router() -> OpenApiRouter {
    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the route to OpenAPI.
    let router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth::mfa::mfa));

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();
    info.license = Some(License::new(env!("CARGO_PKG_LICENSE")));

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("MFA challenge completion".to_string());

    OpenApiBuilder::new()
        .info(info)
        .tags(Some(vec![auth_tag]))
        .build()
}

#[cfg(test)]
mod tests {
    use super::openapi;

    #[test]
    fn openapi_document_lists_routes() {
        let doc = openapi();
        assert!(doc.paths.paths.contains_key("/auth/mfa"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn openapi_info_comes_from_cargo() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
    }
}
