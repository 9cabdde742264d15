use crate::api_docs::ApiDoc;
use crate::config::APP_CONFIG;
use crate::middleware::http_logger::http_logger;
use crate::routes;
use crate::utils::jwt::JwtManager;
use axum::Router;
use axum::middleware;
use http::header;
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt,
    cors::{AllowOrigin, Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: JwtManager,
}

/// All API routes without middleware. Tests drive this router directly.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(routes::health::create_route())
        .merge(routes::auth::create_route())
        .merge(routes::users::create_route())
        .merge(routes::classes::create_route())
        .merge(routes::courses::create_route())
        .merge(routes::sessions::create_route())
        .merge(routes::attendance::create_route())
        .merge(routes::leave::create_route())
        .merge(routes::notifications::create_route())
        .merge(routes::parents::create_route())
}

pub async fn create_app(state: AppState) -> anyhow::Result<Router> {
    let mut router = api_router().with_state(state);

    // Add Swagger UI
    if APP_CONFIG.swagger_enabled {
        let swagger_ui =
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
        router = router.merge(swagger_ui);
    }

    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    // Axum middleware (middleware::from_fn) must be applied separately from
    // ServiceBuilder, which only takes Tower layers.
    let router = router.layer(middleware::from_fn(http_logger));

    // Configure CORS
    let allowed_headers = [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ACCEPT_LANGUAGE,
    ];

    let allowed_methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];

    let cors_layer = if APP_CONFIG.cors_allowed_origins == "*" {
        // When allowing all origins (*), credentials cannot be used (CORS spec
        // limitation). Specify origins explicitly if credentials are needed.
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(false)
    } else {
        let allowed_origins: HashSet<String> = APP_CONFIG
            .cors_allowed_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let origins: Vec<http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(true)
    };

    // Apply Tower middleware stack
    let middleware = ServiceBuilder::new()
        .layer(cors_layer)
        .layer(PropagateHeaderLayer::new(header::HeaderName::from_static(
            "x-request-id",
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    Ok(router.layer(middleware))
}
