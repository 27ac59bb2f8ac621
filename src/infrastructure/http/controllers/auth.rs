use crate::{
    domain::entities::*,
    infrastructure::http::middleware::{bearer_token, ApiResult, AppState, AuthenticatedUser},
};
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.auth_service.signup(request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let tokens = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(tokens))
}

/// The refresh token is sent as the bearer credential.
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<TokenResponse>> {
    let token = bearer_token(&headers)?;
    let tokens = state.auth_service.refresh(token).await?;
    Ok(Json(tokens))
}

pub async fn logout(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
) -> ApiResult<StatusCode> {
    state.auth_service.logout(auth_user.user_id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session(
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
) -> ApiResult<Json<SessionResponse>> {
    Ok(Json(SessionResponse {
        expires_at: auth_user.session.expires_at.clone(),
        user: UserResponse::from(auth_user.user),
    }))
}
