use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Contacts API" }))
}

pub async fn healthchecker(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.db.ping().await.map_err(|e| {
        ApiError::Internal(format!("Error connecting to the database: {}", e))
    })?;

    Ok(Json(json!({ "message": "Database is healthy" })))
}
