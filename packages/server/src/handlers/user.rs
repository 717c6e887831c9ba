use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::user;
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppPath};
use crate::models::user::*;
use crate::state::AppState;
use crate::utils::identity::{find_or_create_user, find_user};
use common::ErrorBody;

#[utoipa::path(
    post,
    path = "/verify-user",
    tag = "Users",
    operation_id = "verifyUser",
    summary = "Resolve the caller's local user",
    description = "Returns the user record for the token's subject, creating it on first login with the email and name claims from the token. An existing user is returned unchanged.",
    responses(
        (status = 200, description = "Existing or newly created user", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(subject = %auth_user.subject))]
pub async fn verify_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let identity = auth_user.identity(&state.config.auth.audience);
    let user = find_or_create_user(&state.db, &identity).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/users/{subject_id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user by subject id",
    description = "Returns the user, or `null` when no user has that subject id.",
    params(("subject_id" = String, Path, description = "Identity provider subject id")),
    responses(
        (status = 200, description = "User or null", body = Option<UserResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_user(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(subject_id): AppPath<String>,
) -> Result<Json<Option<UserResponse>>, AppError> {
    let user = find_user(&state.db, &subject_id).await?;
    Ok(Json(user.map(UserResponse::from)))
}

#[utoipa::path(
    put,
    path = "/users/{subject_id}",
    tag = "Users",
    operation_id = "updateUser",
    summary = "Edit a profile",
    description = "Overwrites name and email. Both are required and the email must contain `@` and `.`. With ownership enforcement enabled only the user themself may edit the profile.",
    params(("subject_id" = String, Path, description = "Identity provider subject id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the profile owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(subject_id): AppPath<String>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let update = validate_update_user(&payload)?;
    auth_user.require_owner(&subject_id, state.config.api.enforce_ownership)?;

    let existing = find_user(&state.db, &subject_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let mut active: user::ActiveModel = existing.into();
    active.name = Set(Some(update.name));
    active.email = Set(Some(update.email));

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}
