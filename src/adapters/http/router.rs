//! Top-level axum router.

use std::time::Duration;

use axum::http::{header::HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::account::account_routes;
use super::admin::admin_routes;
use super::middleware::auth_middleware;
use super::payments::{admin_payment_routes, payment_routes};
use super::state::AppState;
use super::tutor::tutor_routes;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed browser origins. `*` allows any origin; empty disables CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Builds the full application router.
///
/// # Routes
/// - `GET /health` - Liveness probe (no auth)
/// - `/api/...` - Everything else, behind `auth_middleware`
pub fn build_router(state: AppState, config: &RouterConfig) -> Router {
    let api = Router::new()
        .merge(account_routes())
        .merge(tutor_routes())
        .nest("/payments", payment_routes())
        .nest("/admin/payments", admin_payment_routes())
        .nest("/admin", admin_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let mut router = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid));

    if let Some(cors) = cors_layer(&config.cors_origins) {
        router = router.layer(cors);
    }

    router
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers(Any),
    )
}
