use anyhow::anyhow;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::error;

use super::require_admin;
use crate::{
    report::{self, PDF_FILENAME, XLSX_FILENAME},
    web::{AppState, responses::json_error},
};

const PDF_CONTENT_TYPE: &str = "application/pdf";
const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn download_pdf(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Err(redirect) = require_admin(&state, &jar) {
        return redirect.into_response();
    }

    let records = state.board_snapshot().await;
    match report::export_pdf(&records, Utc::now(), state.report_settings()).await {
        Ok(bytes) => attachment(PDF_CONTENT_TYPE, PDF_FILENAME, bytes),
        Err(err) => export_failed(err),
    }
}

pub async fn download_spreadsheet(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Err(redirect) = require_admin(&state, &jar) {
        return redirect.into_response();
    }

    let records = state.board_snapshot().await;
    match report::export_spreadsheet(&records, state.report_settings()) {
        Ok(bytes) => attachment(XLSX_CONTENT_TYPE, XLSX_FILENAME, bytes),
        Err(err) => export_failed(err),
    }
}

fn attachment(content_type: &'static str, filename: &str, bytes: Vec<u8>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    let disposition = format!("attachment; filename=\"{}\"", filename);
    match HeaderValue::from_str(&disposition) {
        Ok(value) => {
            headers.insert(header::CONTENT_DISPOSITION, value);
            (headers, bytes).into_response()
        }
        Err(err) => export_failed(anyhow!("invalid header value: {err}")),
    }
}

fn export_failed(err: anyhow::Error) -> Response {
    error!(?err, "export failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Gagal membuat file export. Silakan coba lagi.",
    )
    .into_response()
}
