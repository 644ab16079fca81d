//! Checkout Relay server binary.
//!
//! Loads configuration, initialises logging, builds the provider adapters and
//! serves the relay router until interrupted.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use checkout_relay::adapters::http::{build_app, CheckoutSettings, RelayAppState};
use checkout_relay::adapters::{
    BraintreeConfig, BraintreeGatewayAdapter, HttpUserService, StripeCardAdapter, StripeConfig,
};
use checkout_relay::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_validated()?;
    init_tracing(&config.server);

    let stripe = StripeConfig::from_settings(&config.payment);
    let braintree = BraintreeConfig::from_settings(&config.payment);
    tracing::info!(
        stripe_mode = if config.payment.is_live_mode() { "live" } else { "test" },
        stripe_api_version = %stripe.api_version(),
        braintree_environment = ?config.payment.braintree_environment,
        merchant_id = %braintree.merchant_id(),
        "Payment providers configured"
    );

    let mut state = RelayAppState::new(
        Arc::new(StripeCardAdapter::new(stripe)),
        Arc::new(BraintreeGatewayAdapter::new(braintree)),
        CheckoutSettings::from_config(&config)?,
    );

    match config.users.base_url.as_deref() {
        Some(base_url) => {
            let users = HttpUserService::new(base_url);
            tracing::info!(base_url = %users.base_url(), "User service relay enabled");
            state = state.with_user_service(Arc::new(users));
        }
        None => tracing::warn!("No user service configured; /api/login and /api/register answer 503"),
    }

    let app = build_app(state, &config.server);
    let addr = config.server.socket_addr()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "Checkout relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Checkout relay stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs are JSON.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.is_production() {
        builder.json().with_current_span(false).init();
    } else {
        builder.with_target(true).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
