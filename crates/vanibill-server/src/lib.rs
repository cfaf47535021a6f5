//! HTTP command endpoint: `POST /parse` turns one transcript into a
//! normalized `{action, slots}` pair. The parser is total, so the 500 path
//! is reserved for infrastructure faults only.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, warn};

use vanibill_parser::{normalize_action, parse_segment, ParsedCommand};

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub ok: bool,
    pub action: &'static str,
    pub slots: Map<String, Value>,
    pub raw: ParsedCommand,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Builds the application router, CORS included.
pub fn build_router() -> Router {
    // The endpoint carries no credentials, so any origin is reflected back;
    // localhost dev servers on arbitrary ports work without a config knob.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/parse", post(parse_post).options(preflight))
        .layer(cors)
}

/// Bare OPTIONS probes (no preflight headers) still get an empty 204.
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn parse_post(Json(req): Json<ParseRequest>) -> Response {
    let transcript = req.transcript.as_deref().map(str::trim).unwrap_or("");
    let user_id = req.user_id.as_deref().map(str::trim).unwrap_or("");

    if transcript.is_empty() || user_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Missing transcript or userId",
            }),
        )
            .into_response();
    }

    match classify(transcript, user_id) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            warn!(target: "server", "parse handler failed unexpectedly: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Internal error",
                }),
            )
                .into_response()
        }
    }
}

fn classify(transcript: &str, user_id: &str) -> Result<ParseResponse, serde_json::Error> {
    let raw = parse_segment(transcript);
    let normalized = normalize_action(&raw);
    debug!(
        target: "server",
        user_id,
        action = normalized.action,
        "transcript classified"
    );
    Ok(ParseResponse {
        ok: true,
        action: normalized.action,
        slots: normalized.slots,
        raw,
    })
}
