use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

use super::date_format::{parse_timestamp, DateFormat};
use super::domain::WorkAssignment;
use super::service::{PairAnalyzer, PairReport};
use crate::error::AppError;
use crate::workflows::assignments::{AssignmentImporter, SkippedRow};

/// Settings shared by the collaboration handlers.
#[derive(Debug, Clone, Copy)]
pub struct CollaborationSettings {
    pub default_format: DateFormat,
}

/// Payload for `POST /api/v1/pairs/analyze`. Exactly one of `csv` or `records` is required.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub now: Option<NaiveDateTime>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub records: Option<Vec<WorkAssignment>>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub report: PairReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub import_skipped: Vec<SkippedRow>,
}

/// Router builder exposing the longest-pair analysis over HTTP.
pub fn collaboration_router(settings: CollaborationSettings) -> Router {
    Router::new()
        .route("/api/v1/pairs/analyze", post(analyze_handler))
        .route("/api/v1/pairs/formats", get(formats_handler))
        .with_state(Arc::new(settings))
}

pub(crate) async fn analyze_handler(
    State(settings): State<Arc<CollaborationSettings>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let AnalyzeRequest {
        date_format,
        now,
        csv,
        records,
    } = request;

    let format = match date_format {
        Some(tag) => match tag.parse::<DateFormat>() {
            Ok(format) => format,
            Err(err) => return AppError::from(err).into_response(),
        },
        None => settings.default_format,
    };

    let (records, import_skipped) = match (csv, records) {
        (Some(csv), None) => match AssignmentImporter::from_reader(Cursor::new(csv.into_bytes())) {
            Ok(import) => (import.assignments, import.skipped),
            Err(err) => return bad_request(err.to_string()),
        },
        (None, Some(records)) => (records, Vec::new()),
        _ => return bad_request("provide exactly one of `csv` or `records`".to_string()),
    };

    let now = now.unwrap_or_else(|| Local::now().naive_local());
    match PairAnalyzer::new(format).analyze(&records, now) {
        Ok(report) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                report,
                import_skipped,
            }),
        )
            .into_response(),
        Err(err) => {
            let payload = json!({
                "error": err.user_message(),
                "detail": err.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn formats_handler(State(settings): State<Arc<CollaborationSettings>>) -> Response {
    let formats: Vec<&'static str> = DateFormat::supported()
        .into_iter()
        .map(DateFormat::tag)
        .collect();
    let payload = json!({
        "formats": formats,
        "default": settings.default_format.tag(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

fn bad_request(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_timestamp(&value).map_err(serde::de::Error::custom))
        .transpose()
}
