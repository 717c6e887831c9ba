use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::review;
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppPath};
use crate::models::review::*;
use crate::state::AppState;
use crate::utils::authors::attach_authors;
use common::ErrorBody;

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "listMovieReviews",
    summary = "List the reviews of a movie",
    description = "Public. Each review carries its author's email in `user` (`null` for an unknown author). With strict author checking enabled, a review whose author has no user record fails the whole request.",
    params(("id" = i32, Path, description = "Catalog movie id")),
    responses(
        (status = 200, description = "Reviews of the movie", body = Vec<MovieReview>),
        (status = 400, description = "Malformed movie id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Author missing in strict mode (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_movie_reviews(
    State(state): State<AppState>,
    AppPath(movie_id): AppPath<i32>,
) -> Result<Json<Vec<MovieReview>>, AppError> {
    let reviews = review::Entity::find()
        .filter(review::Column::MovieId.eq(movie_id))
        .order_by_asc(review::Column::Id)
        .all(&state.db)
        .await?;

    let listed = attach_authors(&state.db, reviews, state.config.api.strict_authors)
        .await?
        .into_iter()
        .map(|(review, author)| movie_review(review, author))
        .collect();

    Ok(Json(listed))
}

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    operation_id = "createReview",
    summary = "Review a movie",
    description = "Stores a review authored by the caller. `stars` must be 1-5 and `text` must not be blank. A user may review the same movie more than once.",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(subject = %auth_user.subject, movie_id = payload.movie_id))]
pub async fn create_review(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_review(&payload)?;

    let new_review = review::ActiveModel {
        movie_id: Set(payload.movie_id),
        review: Set(payload.text),
        stars: Set(payload.stars),
        auth0_id: Set(auth_user.subject),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_review.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ReviewResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/user/reviews/{subject_id}",
    tag = "Reviews",
    operation_id = "listUserReviews",
    summary = "List the reviews written by a user",
    params(("subject_id" = String, Path, description = "Author's subject id")),
    responses(
        (status = 200, description = "Reviews by the user", body = Vec<ReviewResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_user_reviews(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(subject_id): AppPath<String>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = review::Entity::find()
        .filter(review::Column::Auth0Id.eq(subject_id))
        .order_by_asc(review::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "updateReview",
    summary = "Edit a review",
    description = "Overwrites the text and rating. Any authenticated caller may edit unless ownership enforcement is enabled.",
    params(("id" = i32, Path, description = "Review id")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Updated review", body = ReviewResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_review(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    validate_update_review(&payload)?;

    let existing = find_review(&state.db, id).await?;
    auth_user.require_owner(&existing.auth0_id, state.config.api.enforce_ownership)?;

    let mut active: review::ActiveModel = existing.into();
    active.review = Set(payload.text);
    active.stars = Set(payload.stars);

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "deleteReview",
    summary = "Delete a review",
    description = "Deletes by id and returns the deleted review. Any authenticated caller may delete unless ownership enforcement is enabled.",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Deleted review", body = ReviewResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_review(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ReviewResponse>, AppError> {
    let existing = find_review(&state.db, id).await?;
    auth_user.require_owner(&existing.auth0_id, state.config.api.enforce_ownership)?;

    review::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(existing.into()))
}

async fn find_review<C: ConnectionTrait>(db: &C, id: i32) -> Result<review::Model, AppError> {
    review::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".into()))
}
