//! HTTP adapters - REST API implementations.
//!
//! `build_app` wraps the relay router in the middleware stack selected by
//! `ServerConfig`: CORS, request tracing and a request timeout. A request
//! that outlives the timeout is answered like any other provider failure.

pub mod relay;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::HeaderValue;
use axum::{BoxError, Router};
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::domain::payment::ProviderError;

// Re-export key types for convenience
pub use relay::relay_router;
pub use relay::{CheckoutSettings, RelayApiError, RelayAppState};

/// Build the complete application router.
pub fn build_app(state: RelayAppState, server: &ServerConfig) -> Router {
    let mut app = relay_router()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_secs,
                ))),
        );

    if server.request_logging_enabled() {
        app = app.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );
    }

    if server.cors_enabled {
        app = app.layer(cors_layer(server));
    }

    app
}

/// Errors raised by the middleware stack itself, not by a handler.
async fn handle_middleware_error(err: BoxError) -> RelayApiError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request exceeded the configured timeout");
        return RelayApiError(
            ProviderError::network("The payment provider did not respond in time").into(),
        );
    }

    tracing::error!(error = %err, "Unhandled middleware error");
    RelayApiError(ProviderError::provider("Request could not be completed").into())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(values))
}
