//! Shared helpers for integration tests.
//!
//! Spins up an in-process axum mock of the PortfolioGen backend on an
//! ephemeral port and builds a dashboard controller pointed at it.

#![allow(dead_code)]

use axum::Router;
use portfoliogen::services::{ApiClient, ApiClientConfig, Dashboard};
use serde_json::{json, Value};

/// Bind the mock backend to an ephemeral local port and serve it in the
/// background. Returns the base URL to configure the client with.
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A dashboard controller talking to the given backend.
pub fn dashboard(base_url: &str) -> Dashboard {
    let client = ApiClient::new(ApiClientConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap();
    Dashboard::new(client)
}

/// Profile body served by the mock `GET /api/user/me`.
pub fn profile_json() -> Value {
    json!({
        "login": "octocat",
        "name": "The Octocat",
        "avatarUrl": "https://example.com/octocat.png",
        "bio": "I build things",
        "email": "octo@example.com"
    })
}

/// Two-repository body served by the mock `GET /api/user/repos`.
pub fn repos_json() -> Value {
    json!([
        {
            "id": "r1",
            "name": "foo",
            "description": "a foo repo",
            "language": "Rust",
            "starCount": 12,
            "url": "https://github.com/octocat/foo"
        },
        {
            "id": "r2",
            "name": "bar",
            "description": null,
            "language": null,
            "starCount": 0,
            "url": "https://github.com/octocat/bar"
        }
    ])
}
