use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::author::Author;
use crate::validation::{ValidationError, validate_movie_id, validate_non_empty, validate_stars};

/// A stored review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[schema(example = 12)]
    pub id: i32,
    /// Catalog id of the reviewed movie.
    #[schema(example = 42)]
    pub movie_id: i32,
    /// Review text.
    #[schema(example = "Great film")]
    pub review: String,
    #[schema(example = 5)]
    pub stars: i32,
    /// Subject id of the author.
    #[schema(example = "auth0|64f1c2")]
    pub auth0_id: String,
    pub created_at: DateTime<Utc>,
}

/// A review as listed under its movie, with the author's email attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MovieReview {
    /// When the review was posted.
    pub time: DateTime<Utc>,
    #[schema(example = 5)]
    pub stars: i32,
    /// Review text.
    #[schema(example = "Great film")]
    pub content: String,
    /// Author email; `null` when the author is unknown or has no email.
    #[schema(value_type = Option<String>, example = "ada@example.com")]
    pub user: Author,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[schema(example = 42)]
    pub movie_id: i32,
    #[schema(example = "Great film")]
    pub text: String,
    /// Rating from 1 to 5.
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub stars: i32,
}

pub fn validate_create_review(payload: &CreateReviewRequest) -> Result<(), ValidationError> {
    validate_movie_id(payload.movie_id, "movieId")?;
    validate_non_empty(&payload.text, "Review text")?;
    validate_stars(payload.stars)
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateReviewRequest {
    #[schema(example = "Even better the second time")]
    pub text: String,
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub stars: i32,
}

pub fn validate_update_review(payload: &UpdateReviewRequest) -> Result<(), ValidationError> {
    validate_non_empty(&payload.text, "Review text")?;
    validate_stars(payload.stars)
}
