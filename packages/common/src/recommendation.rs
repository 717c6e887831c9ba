use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::author::Author;
use crate::validation::{ValidationError, validate_movie_id};

/// A stored recommendation: "if you liked `movie_id_parent`, watch `movie_id_recommend`".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = 42)]
    pub movie_id_parent: i32,
    #[schema(example = 603)]
    pub movie_id_recommend: i32,
    #[schema(example = "Same director, same mood")]
    pub comment: String,
    #[schema(example = "auth0|64f1c2")]
    pub auth0_id: String,
    pub created_at: DateTime<Utc>,
}

/// A recommendation as listed under its parent movie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MovieRecommendation {
    #[serde(flatten)]
    pub recommendation: RecommendationResponse,
    /// Author email; `null` when the author is unknown or has no email.
    #[schema(value_type = Option<String>, example = "ada@example.com")]
    pub user: Author,
    /// Display title, mirrors `comment`.
    #[schema(example = "Same director, same mood")]
    pub title: String,
}

impl MovieRecommendation {
    pub fn new(recommendation: RecommendationResponse, user: Author) -> Self {
        let title = recommendation.comment.clone();
        Self {
            recommendation,
            user,
            title,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendationRequest {
    #[schema(example = 42)]
    pub movie_id_parent: i32,
    #[schema(example = 603)]
    pub movie_id_recommend: i32,
    #[schema(example = "Same director, same mood")]
    pub comment: String,
}

/// The comment may be empty; both movie ids must look like catalog ids.
pub fn validate_create_recommendation(
    payload: &CreateRecommendationRequest,
) -> Result<(), ValidationError> {
    validate_movie_id(payload.movie_id_parent, "movieIdParent")?;
    validate_movie_id(payload.movie_id_recommend, "movieIdRecommend")
}
