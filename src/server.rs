use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router: public and bearer-protected routes, CORS,
/// body limit and request tracing.
pub fn app(state: AppState) -> Router {
    let max_body = state.config().server.max_request_size_bytes;
    let cors = cors_layer(&state.config().server.cors_origins);

    Router::new()
        // Public
        .route("/", get(public::health::root))
        .route("/api/health", get(public::health::health))
        .route("/api/debug/headers", get(public::debug::headers))
        // Radar API (list is public, mutations are protected)
        .merge(radar_routes(state.clone()))
        .merge(secure_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(max_body))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

fn radar_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, jwt_auth_middleware);

    Router::new()
        .route(
            "/api/radar",
            get(public::radar::list)
                .merge(post(protected::radar::create).route_layer(auth.clone())),
        )
        .route(
            "/api/radar/:id",
            delete(protected::radar::delete).route_layer(auth.clone()),
        )
        .route(
            "/api/radar/:id/classification",
            patch(protected::radar::update_classification).route_layer(auth.clone()),
        )
        .route(
            "/api/radar/:id/technology",
            patch(protected::radar::update_technology).route_layer(auth),
        )
}

fn secure_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/secure/me", get(protected::secure::me))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            // AllowOrigin::list panics on a wildcard
            Ok(value) if value == "*" => {
                tracing::warn!("Ignoring wildcard CORS origin; credentials require explicit origins");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
