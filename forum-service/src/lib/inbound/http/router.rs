use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::create_identity::create_identity;
use super::handlers::create_topic::create_topic;
use super::handlers::delete_identity::delete_identity;
use super::handlers::delete_topic::delete_topic;
use super::handlers::get_identity::get_identity;
use super::handlers::get_topic::get_topic;
use super::handlers::list_identities::list_identities;
use super::handlers::list_topics::list_topics;
use super::handlers::update_identity::update_identity;
use super::handlers::update_topic::update_topic;
use super::middleware::authenticate as auth_middleware;
use crate::domain::identity::ports::AuthenticationPort;
use crate::domain::identity::ports::IdentityServicePort;
use crate::domain::topic::ports::TopicServicePort;

/// Shared handler state.
///
/// Services sit behind their ports so the same router serves Postgres-backed
/// and in-memory wiring.
#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub authentication: Arc<dyn AuthenticationPort>,
    pub topic_service: Arc<dyn TopicServicePort>,
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    authentication: Arc<dyn AuthenticationPort>,
    topic_service: Arc<dyn TopicServicePort>,
) -> Router {
    let state = AppState {
        identity_service,
        authentication,
        topic_service,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(authenticate))
        .route("/api/users", post(create_identity));

    let protected_routes = Router::new()
        .route("/api/users", get(list_identities))
        .route(
            "/api/users/:identity_id",
            get(get_identity)
                .patch(update_identity)
                .delete(delete_identity),
        )
        .route("/api/topics", post(create_topic).get(list_topics))
        .route(
            "/api/topics/:topic_id",
            get(get_topic).patch(update_topic).delete(delete_topic),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
