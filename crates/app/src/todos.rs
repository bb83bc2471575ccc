use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use metrics::counter;
use serde_json::Value;
use tracing::{info, warn};

use todo_board_core::{Todo, TodoTitle};

use crate::error::ApiError;
use crate::router::AppState;

pub const CREATED_BODY: &str = "Todo created";

/// `GET /todos`: every todo, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    match state.store().list_all().await {
        Ok(todos) => {
            counter!("todos_list_requests_total", "result" => "ok").increment(1);
            Ok(Json(todos))
        }
        Err(err) => {
            counter!("todos_list_requests_total", "result" => "error").increment(1);
            Err(ApiError::store("list_all", err))
        }
    }
}

/// `POST /todos`: validates `{"title": string}` and appends a row.
///
/// Only `application/json` bodies are decoded. Any other content type, a
/// missing one, or malformed JSON leaves the title missing instead of
/// producing an extractor rejection.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    let payload = if is_json_content(&headers) {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    } else {
        Value::Null
    };

    let title = TodoTitle::from_payload(&payload).map_err(|reason| {
        counter!("todos_rejected_total", "reason" => reason.as_str()).increment(1);
        warn!(stage = "api", reason = reason.as_str(), "rejected create request");
        ApiError::from(reason)
    })?;

    state
        .store()
        .insert(&title)
        .await
        .map_err(|err| ApiError::store("insert", err))?;

    counter!("todos_created_total").increment(1);
    info!(stage = "api", title_len = title.as_str().len(), "todo created");
    Ok((StatusCode::CREATED, CREATED_BODY))
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
