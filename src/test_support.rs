//! In-process mock backend for network tests.
//!
//! Tests build an axum `Router` with the `/api/...` routes they need and
//! hand it to `spawn`. Every request is recorded (method, path, CSRF
//! header) so tests can assert on exactly what the client sent.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::net::csrf::CSRF_HEADER_NAME;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SeenRequest {
    pub method: String,
    pub path: String,
    pub csrf: Option<String>,
}

type Seen = Arc<Mutex<Vec<SeenRequest>>>;

pub(crate) struct MockBackend {
    pub backend_url: String,
    seen: Seen,
}

impl MockBackend {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.backend_url).expect("mock backend url should parse")
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("seen mutex should lock").clone()
    }

    /// The most recent request to `path` with `method`.
    pub fn last(&self, method: &str, path: &str) -> SeenRequest {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .unwrap_or_else(|| panic!("no {method} {path} recorded"))
    }
}

async fn record(State(seen): State<Seen>, request: Request, next: Next) -> Response {
    let csrf = request
        .headers()
        .get(CSRF_HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    seen.lock().expect("seen mutex should lock").push(SeenRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_owned(),
        csrf,
    });
    next.run(request).await
}

/// Serve `router` on an ephemeral localhost port.
pub(crate) async fn spawn(router: Router) -> MockBackend {
    let seen = Seen::default();
    let app = router.layer(middleware::from_fn_with_state(seen.clone(), record));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("mock backend should bind");
    let addr = listener.local_addr().expect("mock backend should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend should serve");
    });
    MockBackend { backend_url: format!("http://{addr}"), seen }
}

/// Config pointing at a localhost port nothing listens on.
pub(crate) async fn dead_backend_config() -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("placeholder listener should bind");
    let addr = listener.local_addr().expect("placeholder listener should have an address");
    drop(listener);
    ClientConfig::new(&format!("http://{addr}")).expect("dead backend url should parse")
}

pub(crate) fn user_json(username: &str, role: &str, permissions: &[&str]) -> Value {
    json!({
        "id": format!("id-{username}"),
        "username": username,
        "role": role,
        "permissions": permissions,
    })
}
