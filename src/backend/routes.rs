//! Form service handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::BackendState;

type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Deserialize)]
pub struct FormBody {
    pub form_name: String,
    pub form_data: Vec<Value>,
}

fn authorize(state: &BackendState, headers: &HeaderMap) -> Result<(), ApiError> {
    let authorized = match headers.get(AUTHORIZATION).map(HeaderValue::to_str) {
        Some(Ok(value)) => state.token_matches(value),
        _ => false,
    };
    if authorized {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid or missing API token" }))))
    }
}

fn body_or_422(body: Result<Json<FormBody>, JsonRejection>) -> Result<FormBody, ApiError> {
    body.map(|Json(body)| body)
        .map_err(|rejection| (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": rejection.body_text() }))))
}

fn not_found() -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Form not found" })))
}

/// Ids are positive integers; anything else cannot name a stored form.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>().map_err(|_| not_found())
}

/// `POST /api/forms/save`: create a form.
pub async fn save_form(
    State(state): State<BackendState>,
    headers: HeaderMap,
    body: Result<Json<FormBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers)?;
    let body = body_or_422(body)?;

    let fields = body.form_data.len();
    let id = state.insert(body.form_name, body.form_data).await;
    info!(form_id = id, fields, "form created");

    Ok(Json(json!({ "message": "Form saved successfully", "formId": id })))
}

/// `PUT /api/forms/update/{id}`: replace a form.
pub async fn update_form(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    body: Result<Json<FormBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers)?;
    let id = parse_id(&raw_id)?;
    let body = body_or_422(body)?;

    let fields = body.form_data.len();
    if !state.replace(id, body.form_name, body.form_data).await {
        return Err(not_found());
    }
    info!(form_id = id, fields, "form updated");

    Ok(Json(json!({ "message": "Form updated successfully" })))
}

/// `GET /api/forms/list`: id, name and last update of every form.
pub async fn list_forms(State(state): State<BackendState>, headers: HeaderMap) -> Result<Json<Vec<Value>>, ApiError> {
    authorize(&state, &headers)?;

    let rows = state
        .list()
        .await
        .into_iter()
        .map(|(id, form)| json!({ "id": id, "form_name": form.form_name, "updated_at": form.updated_at }))
        .collect();

    Ok(Json(rows))
}

/// `GET /api/forms/{id}`: one form with its fields.
pub async fn get_form(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers)?;
    let id = parse_id(&raw_id)?;

    let form = state.get(id).await.ok_or_else(not_found)?;
    Ok(Json(json!({ "id": id, "form_name": form.form_name, "form_data": form.form_data })))
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
