// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Local;
use tracing::info;

use super::error::ApiError;
use super::AppState;
use crate::models::{ColumnTable, EchoResponse, RateTablePayload, RequestEnvelope};

/// `GET /rate-table`: the configured demo series.
pub async fn get_rate_table(State(state): State<AppState>) -> Result<Json<ColumnTable>, ApiError> {
    let demo = &state.config.demo;
    if !demo.enabled {
        return Err(ApiError::not_found("demo route disabled"));
    }

    let series = state
        .rates
        .fetch(&demo.currency, demo.start_date, demo.end_date)
        .await?;
    Ok(Json(ColumnTable::from(&series)))
}

/// `POST /rate-table`: the add-in request.
///
/// Credentials are checked before the body is read.
pub async fn post_rate_table(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ColumnTable>, ApiError> {
    if !state.verifier.verify(&headers) {
        return Err(ApiError::unauthorized());
    }

    let envelope = RequestEnvelope::from_slice(&body)
        .map_err(|e| ApiError::invalid_input().with_detail(e.to_string()))?;

    if envelope.namespace() != Some(state.config.addin.namespace.as_str()) {
        return Err(ApiError::invalid_namespace());
    }

    let cells = envelope
        .into_payload()
        .map_err(|e| ApiError::invalid_input().with_detail(e.to_string()))?
        .and_then(RateTablePayload::into_cells)
        .ok_or_else(ApiError::invalid_input)?;
    let request = cells.into_request()?;
    info!(to = %request.to, start = %request.start, end = %request.end, "rate table requested");

    let series = state
        .rates
        .fetch(&request.to, request.start, request.end)
        .await?;
    Ok(Json(ColumnTable::from(&series)))
}

/// `POST /echo`: connectivity probe.
pub async fn post_echo() -> Json<EchoResponse> {
    Json(EchoResponse::at(Local::now().naive_local()))
}
