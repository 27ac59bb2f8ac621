use crate::{
    domain::entities::*,
    domain::services::Reminder,
    infrastructure::http::middleware::{ApiResult, AppState, AuthenticatedUser},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

pub async fn list_contacts(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Query(params): Query<ContactListParams>,
) -> ApiResult<Json<Vec<ContactResponse>>> {
    let contacts = state
        .contact_service
        .list_contacts(&auth_user, params.limit, params.offset)
        .await?;
    Ok(Json(contacts))
}

pub async fn create_contact(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Json(request): Json<ContactRequest>,
) -> ApiResult<(StatusCode, Json<ContactResponse>)> {
    let contact = state
        .contact_service
        .create_contact(&auth_user, request)
        .await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn get_contact(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<ContactResponse>> {
    let contact = state.contact_service.get_contact(&auth_user, &id).await?;
    Ok(Json(contact))
}

pub async fn update_contact(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(request): Json<ContactRequest>,
) -> ApiResult<Json<ContactResponse>> {
    let contact = state
        .contact_service
        .update_contact(&auth_user, &id, request)
        .await?;
    Ok(Json(contact))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.contact_service.delete_contact(&auth_user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn search_contacts(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Query(params): Query<ContactSearchParams>,
) -> ApiResult<Json<Vec<ContactResponse>>> {
    let contacts = state
        .contact_service
        .search_contacts(&auth_user, params)
        .await?;
    Ok(Json(contacts))
}

pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Query(params): Query<UpcomingBirthdaysParams>,
) -> ApiResult<Json<Vec<Reminder<String>>>> {
    let reminders = state
        .contact_service
        .upcoming_birthdays(&auth_user, params.days)
        .await?;
    Ok(Json(reminders))
}
