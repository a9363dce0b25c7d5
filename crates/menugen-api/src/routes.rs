use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use menugen_shared::ErrorBody;
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::security;
use crate::state::AppState;

/// Room for the form boundaries and the `openaiKey` field on top of the
/// image itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Result<Router, regex::Error> {
    let body_limit = state.settings.upload.max_bytes + MULTIPART_OVERHEAD_BYTES;
    let cors = security::cors_layer(&state.settings.cors)?;

    let api_routes = Router::new()
        .route("/api/process-menu", post(handlers::menu::process_menu))
        .route("/api/auth/user", get(handlers::auth::current_user))
        .route("/api/auth/login", get(handlers::auth::sign_in))
        .route("/api/auth/logout", get(handlers::auth::sign_out))
        .layer(DefaultBodyLimit::max(body_limit));

    let router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes)
        .fallback(handlers::not_found)
        .with_state(state);

    Ok(with_middleware(router, cors))
}

/// Security headers, CORS, panic recovery and request tracing, innermost
/// first.
fn with_middleware(mut router: Router, cors: CorsLayer) -> Router {
    for (name, value) in security::security_headers() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
    }

    router
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error".to_string(),
            details: None,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("menu renderer exploded");
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_internal_error() {
        let cors = security::cors_layer(&Settings::defaults().unwrap().cors).unwrap();
        let app = with_middleware(Router::new().route("/explode", get(explode)), cors);

        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }
}
