use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::clock::{Selection, Snapshot};
use crate::distance;
use crate::location::{location_list, LocationInfo};

use super::static_files;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── Static file handlers ────────────────────────────────────────

pub async fn index() -> Html<&'static str> {
    Html(static_files::INDEX_HTML)
}

pub async fn style() -> Response {
    (
        [(header::CONTENT_TYPE, "text/css")],
        static_files::STYLE_CSS,
    )
        .into_response()
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        static_files::APP_JS,
    )
        .into_response()
}

// ─── GET /api/locations ──────────────────────────────────────────

pub async fn locations() -> Json<Vec<LocationInfo>> {
    let start = Instant::now();
    let list = location_list();

    tracing::info!(
        count = list.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/locations"
    );

    Json(list)
}

// ─── GET /api/distance ───────────────────────────────────────────

/// Both selections; either may be absent or empty.
#[derive(Deserialize)]
pub struct PairQuery {
    pub first: Option<String>,
    pub second: Option<String>,
    /// Optional RFC 3339 instant; defaults to now.
    pub at: Option<String>,
}

impl PairQuery {
    fn selection(&self) -> Selection {
        Selection {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct DistanceResponse {
    pub distance: String,
}

pub async fn distance(Query(params): Query<PairQuery>) -> Json<DistanceResponse> {
    let start = Instant::now();

    let first = params.first.as_deref().unwrap_or("");
    let second = params.second.as_deref().unwrap_or("");
    let distance = distance::distance(first, second);

    tracing::info!(
        first,
        second,
        %distance,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/distance"
    );

    Json(DistanceResponse { distance })
}

// ─── GET /api/compare ────────────────────────────────────────────

#[derive(Serialize)]
pub struct CompareResponse {
    pub snapshot: Option<Snapshot>,
}

pub async fn compare(Query(params): Query<PairQuery>) -> Result<Json<CompareResponse>, ApiError> {
    let start = Instant::now();

    let at = match &params.at {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid instant '{}': {}", s, e)))?,
        None => Utc::now(),
    };

    let snapshot = Snapshot::capture(&params.selection(), at);

    tracing::info!(
        first = ?params.first,
        second = ?params.second,
        captured = snapshot.is_some(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/compare"
    );

    Ok(Json(CompareResponse { snapshot }))
}
