// src/server/mod.rs
// =============================================================================
// The local HTTP server that backs the browser page.
//
// Routes:
//   GET  /                 the page (sidebar form, tree, code viewer)
//   GET  /health           liveness
//   GET  /api/session      connection / traversal state
//   POST /api/session      submit profile + region, returns repositories
//   GET  /api/repositories cached repository list
//   POST /api/explore      tree of one repository
//   POST /api/view         outcome for the ticked files
//   POST /api/refresh      drop cached trees / list
// =============================================================================

mod error;
mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::AppContext;

pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Builds the router over a shared context.
pub fn build_app(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/api/session",
            get(handlers::session_info).post(handlers::connect),
        )
        .route("/api/repositories", get(handlers::repositories))
        .route("/api/explore", post(handlers::explore))
        .route("/api/view", post(handlers::view))
        .route("/api/refresh", post(handlers::refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Serves the page until the process is stopped.
pub async fn serve(ctx: Arc<AppContext>, bind: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("serving on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app(ctx)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecommit::memory::{MemoryConnector, MemorySourceControl};
    use crate::config::ConnectionSettings;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let source = Arc::new(
            MemorySourceControl::new()
                .with_repository(
                    "shop",
                    &[("src/cart.py", "cart = []\n"), ("README.md", "# shop")],
                )
                .with_repository("blog", &[("post.md", "hello")]),
        );
        let ctx = AppContext::new(
            Arc::new(MemoryConnector { source }),
            ConnectionSettings::default(),
        );
        build_app(Arc::new(ctx))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn connected_app() -> Router {
        let app = app();
        let (status, _) = call(
            &app,
            "POST",
            "/api/session",
            Some(json!({"profile": "dev", "region": "eu-west-1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        app
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let app = app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("<html"));
    }

    #[tokio::test]
    async fn test_api_requires_session() {
        let app = app();
        let (status, body) = call(&app, "GET", "/api/repositories", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("not connected"));
    }

    #[tokio::test]
    async fn test_session_lists_repositories() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/api/session",
            Some(json!({"profile": "dev", "region": "eu-west-1"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["repositories"],
            json!([{"name": "blog"}, {"name": "shop"}])
        );

        let (_, info) = call(&app, "GET", "/api/session", None).await;
        assert_eq!(info["connected"], json!(true));
        assert_eq!(info["traverse"], json!(false));
        assert_eq!(info["repository"], Value::Null);
    }

    #[tokio::test]
    async fn test_explore_returns_single_root() {
        let app = connected_app().await;
        let (status, body) = call(&app, "POST", "/api/explore", Some(json!({"repository": "shop"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["traverse"], json!(true));
        assert_eq!(
            body["nodes"],
            json!([{
                "label": "shop",
                "value": "shop",
                "children": [
                    {"label": "src", "value": "src", "children": [
                        {"label": "cart.py", "value": "src/cart.py"}
                    ]},
                    {"label": "README.md", "value": "README.md"}
                ]
            }])
        );
    }

    #[tokio::test]
    async fn test_session_remembers_explored_repository() {
        let app = connected_app().await;
        call(&app, "POST", "/api/explore", Some(json!({"repository": "shop"}))).await;

        let (_, info) = call(&app, "GET", "/api/session", None).await;
        assert_eq!(info["traverse"], json!(true));
        assert_eq!(info["repository"], json!("shop"));

        // a full refresh drops the list, the next read lists again
        let (status, _) = call(&app, "POST", "/api/refresh", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = call(&app, "GET", "/api/repositories", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["repositories"], json!([{"name": "blog"}, {"name": "shop"}]));
    }

    #[tokio::test]
    async fn test_view_states() {
        let app = connected_app().await;

        let (_, halt) = call(&app, "POST", "/api/view", Some(json!({"repository": "shop", "checked": []}))).await;
        assert_eq!(halt, json!({"state": "halt"}));

        let (_, warning) = call(
            &app,
            "POST",
            "/api/view",
            Some(json!({"repository": "shop", "checked": ["src/cart.py", "README.md"]})),
        )
        .await;
        assert_eq!(warning["state"], "warning");
        assert!(warning.get("content").is_none());

        let (status, view) = call(
            &app,
            "POST",
            "/api/view",
            Some(json!({"repository": "shop", "checked": ["src/cart.py"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["state"], "view");
        assert_eq!(view["content"], "cart = []\n");
        assert_eq!(view["language"], "python");
    }

    #[tokio::test]
    async fn test_missing_file_is_bad_gateway() {
        let app = connected_app().await;
        let (status, body) = call(
            &app,
            "POST",
            "/api/view",
            Some(json!({"repository": "shop", "checked": ["gone.rs"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("GetFile"));
    }

    #[tokio::test]
    async fn test_refresh() {
        let app = connected_app().await;
        let (status, _) = call(&app, "POST", "/api/refresh", Some(json!({"repository": "shop"}))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, "POST", "/api/refresh", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
