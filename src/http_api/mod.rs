use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    ColumnLayout, ConversionError, ConversionReport, DOWNLOAD_FILE_NAME, InputFormat, MIME_TYPE,
    SkippedRow, convert_bytes,
};

const SKIPPED_ROWS_HEADER: &str = "x-skipped-rows";

#[derive(Clone)]
pub struct AppState {
    layout: Arc<RwLock<ColumnLayout>>,
}

impl AppState {
    pub fn new(layout: ColumnLayout) -> Self {
        Self {
            layout: Arc::new(RwLock::new(layout)),
        }
    }

    fn layout(&self) -> ColumnLayout {
        self.layout.read().clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Unsupported(String),
}

impl From<ConversionError> for ApiError {
    fn from(value: ConversionError) -> Self {
        match value {
            ConversionError::UnsupportedFormat(_) => ApiError::Unsupported(value.to_string()),
            other => ApiError::Invalid(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Unsupported(message) => {
                let body = Json(ErrorBody {
                    error: "unsupported_format",
                    message,
                });
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, body).into_response()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConvertParams {
    filename: Option<String>,
}

impl ConvertParams {
    fn format(&self) -> Result<Option<InputFormat>, ApiError> {
        match &self.filename {
            Some(name) => Ok(Some(InputFormat::from_path(name)?)),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportBody {
    file_name: &'static str,
    ics: String,
    event_count: usize,
    rows_examined: usize,
    skipped: Vec<SkippedRow>,
}

impl From<ConversionReport> for ReportBody {
    fn from(report: ConversionReport) -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME,
            ics: report.to_ics(),
            event_count: report.events().len(),
            rows_examined: report.rows_examined(),
            skipped: report.skipped().to_vec(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/layout", get(get_layout).put(update_layout))
        .route("/convert", post(convert_download))
        .route("/convert/report", post(convert_report))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, layout: ColumnLayout) -> std::io::Result<()> {
    let state = AppState::new(layout);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_layout(State(state): State<AppState>) -> Json<ColumnLayout> {
    Json(state.layout())
}

async fn update_layout(
    State(state): State<AppState>,
    Json(layout): Json<ColumnLayout>,
) -> Json<ColumnLayout> {
    {
        let mut guard = state.layout.write();
        *guard = layout;
    }
    info!(layout = %state.layout().to_cli_summary(), "column layout updated");
    Json(state.layout())
}

fn run_conversion(
    state: &AppState,
    params: &ConvertParams,
    body: &[u8],
) -> Result<ConversionReport, ApiError> {
    if body.is_empty() {
        return Err(ApiError::Invalid("request body is empty".into()));
    }
    let format = params.format()?;
    let layout = state.layout();
    Ok(convert_bytes(body, format, &layout)?)
}

async fn convert_download(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let report = run_conversion(&state, &params, &body)?;
    let headers = [
        (header::CONTENT_TYPE, MIME_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
        ),
        (
            HeaderName::from_static(SKIPPED_ROWS_HEADER),
            report.skipped().len().to_string(),
        ),
    ];
    Ok((StatusCode::OK, headers, report.to_ics()).into_response())
}

async fn convert_report(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
    body: Bytes,
) -> Result<Json<ReportBody>, ApiError> {
    let report = run_conversion(&state, &params, &body)?;
    Ok(Json(ReportBody::from(report)))
}
