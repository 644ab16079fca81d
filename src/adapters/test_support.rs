//! Helpers for adapter tests.

use axum::Router;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_fake_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
