use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::recommendation;
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppPath};
use crate::models::recommendation::*;
use crate::state::AppState;
use crate::utils::authors::attach_authors;
use common::ErrorBody;

#[utoipa::path(
    get,
    path = "/recommendations/{id}",
    tag = "Recommendations",
    operation_id = "listMovieRecommendations",
    summary = "List recommendations made from a movie",
    description = "Public. Returns recommendations whose parent is the given movie, each with the author's email in `user` and the comment repeated as `title`.",
    params(("id" = i32, Path, description = "Catalog id of the parent movie")),
    responses(
        (status = 200, description = "Recommendations", body = Vec<MovieRecommendation>),
        (status = 400, description = "Malformed movie id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Author missing in strict mode (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_movie_recommendations(
    State(state): State<AppState>,
    AppPath(movie_id): AppPath<i32>,
) -> Result<Json<Vec<MovieRecommendation>>, AppError> {
    let recommendations = recommendation::Entity::find()
        .filter(recommendation::Column::MovieIdParent.eq(movie_id))
        .order_by_asc(recommendation::Column::Id)
        .all(&state.db)
        .await?;

    let listed = attach_authors(&state.db, recommendations, state.config.api.strict_authors)
        .await?
        .into_iter()
        .map(|(rec, author)| MovieRecommendation::new(rec.into(), author))
        .collect();

    Ok(Json(listed))
}

#[utoipa::path(
    post,
    path = "/recommendations",
    tag = "Recommendations",
    operation_id = "createRecommendation",
    summary = "Recommend a movie",
    description = "Stores a recommendation from `movieIdParent` to `movieIdRecommend` authored by the caller. Movie ids are not checked against the catalog.",
    request_body = CreateRecommendationRequest,
    responses(
        (status = 201, description = "Recommendation created", body = RecommendationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(subject = %auth_user.subject))]
pub async fn create_recommendation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecommendationRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_recommendation(&payload)?;

    let new_recommendation = recommendation::ActiveModel {
        movie_id_parent: Set(payload.movie_id_parent),
        movie_id_recommend: Set(payload.movie_id_recommend),
        comment: Set(payload.comment),
        auth0_id: Set(auth_user.subject),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_recommendation.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(RecommendationResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/user/recommendations/{subject_id}",
    tag = "Recommendations",
    operation_id = "listUserRecommendations",
    summary = "List the recommendations made by a user",
    params(("subject_id" = String, Path, description = "Author's subject id")),
    responses(
        (status = 200, description = "Recommendations by the user", body = Vec<RecommendationResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_user_recommendations(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(subject_id): AppPath<String>,
) -> Result<Json<Vec<RecommendationResponse>>, AppError> {
    let recommendations = recommendation::Entity::find()
        .filter(recommendation::Column::Auth0Id.eq(subject_id))
        .order_by_asc(recommendation::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        recommendations
            .into_iter()
            .map(RecommendationResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    delete,
    path = "/recommendations/{id}",
    tag = "Recommendations",
    operation_id = "deleteRecommendation",
    summary = "Delete a recommendation",
    description = "Deletes by id and returns the deleted recommendation. Any authenticated caller may delete unless ownership enforcement is enabled.",
    params(("id" = i32, Path, description = "Recommendation id")),
    responses(
        (status = 200, description = "Deleted recommendation", body = RecommendationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recommendation not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_recommendation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let existing = recommendation::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recommendation not found".into()))?;
    auth_user.require_owner(&existing.auth0_id, state.config.api.enforce_ownership)?;

    recommendation::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;

    Ok(Json(existing.into()))
}
