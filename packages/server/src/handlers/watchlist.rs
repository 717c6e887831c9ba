use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::watch_list_item;
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppPath};
use crate::models::watchlist::*;
use crate::state::AppState;
use common::ErrorBody;

#[utoipa::path(
    get,
    path = "/watchlist",
    tag = "Watchlist",
    operation_id = "listWatchlist",
    summary = "List the caller's watchlist",
    responses(
        (status = 200, description = "Watchlist items", body = Vec<WatchlistItemResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(subject = %auth_user.subject))]
pub async fn list_watchlist(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<WatchlistItemResponse>>, AppError> {
    let items = watch_list_item::Entity::find()
        .filter(watch_list_item::Column::Auth0Id.eq(auth_user.subject))
        .order_by_asc(watch_list_item::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(WatchlistItemResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/watchlist",
    tag = "Watchlist",
    operation_id = "addToWatchlist",
    summary = "Add a movie to the caller's watchlist",
    description = "Adding a movie twice stores two items.",
    request_body = AddWatchlistItemRequest,
    responses(
        (status = 201, description = "Item added", body = WatchlistItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(subject = %auth_user.subject, movie_id = payload.movie_id))]
pub async fn add_to_watchlist(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddWatchlistItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_add_watchlist_item(&payload)?;

    let new_item = watch_list_item::ActiveModel {
        movie_id: Set(payload.movie_id),
        auth0_id: Set(auth_user.subject),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_item.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(WatchlistItemResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/watchlist/{movie_id}",
    tag = "Watchlist",
    operation_id = "removeFromWatchlist",
    summary = "Remove a movie from the caller's watchlist",
    description = "Deletes every item for this movie owned by the caller and returns how many were removed. Removing a movie that is not on the watchlist returns a count of 0.",
    params(("movie_id" = i32, Path, description = "Catalog movie id")),
    responses(
        (status = 200, description = "Number of items removed", body = DeleteCountResponse),
        (status = 400, description = "Malformed movie id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(subject = %auth_user.subject))]
pub async fn remove_from_watchlist(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(movie_id): AppPath<i32>,
) -> Result<Json<DeleteCountResponse>, AppError> {
    let result = watch_list_item::Entity::delete_many()
        .filter(watch_list_item::Column::MovieId.eq(movie_id))
        .filter(watch_list_item::Column::Auth0Id.eq(auth_user.subject))
        .exec(&state.db)
        .await?;

    Ok(Json(DeleteCountResponse {
        count: result.rows_affected,
    }))
}
