mod handlers;
mod static_files;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

pub fn build_router() -> Router {
    let api = Router::new()
        .route("/api/locations", get(handlers::locations))
        .route("/api/distance", get(handlers::distance))
        .route("/api/compare", get(handlers::compare))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/style.css", get(handlers::style))
        .route("/app.js", get(handlers::script))
        .merge(api)
        .layer(CorsLayer::permissive())
}

pub async fn start(host: &str, port: u16) {
    let app = build_router();
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  Dual Chronos server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Option<String>, Value) {
        let resp = build_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let cache = resp
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, cache, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_locations() {
        let (status, cache, body) = get_json("/api/locations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-store"));
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 20);
        assert_eq!(list[0]["name"], "Korea");
        assert_eq!(list[0]["tz"], "Asia/Seoul");
    }

    #[tokio::test]
    async fn test_distance() {
        let (status, _, body) = get_json("/api/distance?first=Korea&second=New%20York").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["distance"], "11052.58 km");
    }

    #[tokio::test]
    async fn test_distance_unknown_is_empty() {
        let (status, _, body) = get_json("/api/distance?first=Korea&second=Atlantis").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["distance"], "");

        let (_, _, body) = get_json("/api/distance").await;
        assert_eq!(body["distance"], "");
    }

    #[tokio::test]
    async fn test_compare_at_instant() {
        let (status, _, body) =
            get_json("/api/compare?first=Japan&second=England&at=2026-01-15T06:04:05Z").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["snapshot"]["first"]["time"], "3:04:05 PM");
        assert_eq!(body["snapshot"]["second"]["time"], "6:04:05 AM");
    }

    #[tokio::test]
    async fn test_compare_half_selection_is_null() {
        let (status, _, body) = get_json("/api/compare?first=Japan").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["snapshot"].is_null());
    }

    #[tokio::test]
    async fn test_compare_bad_instant() {
        let (status, _, body) = get_json("/api/compare?first=Japan&second=UAE&at=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_index_page() {
        let resp = build_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<select id=\"first\">"));
    }

    #[tokio::test]
    async fn test_script_drops_responses_for_changed_selection() {
        let resp = build_router()
            .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let js = String::from_utf8(bytes.to_vec()).unwrap();
        // The pair is captured before each fetch and checked after it.
        assert!(js.contains("const pair = { first: first.value, second: second.value };"));
        assert_eq!(js.matches("if (isStale(pair)").count(), 2);
        assert!(js.contains("clearInterval(timer)"));
    }
}
