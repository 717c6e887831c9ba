use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, validate_movie_id};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItemResponse {
    #[schema(example = 9)]
    pub id: i32,
    #[schema(example = 42)]
    pub movie_id: i32,
    /// Subject id of the owner.
    #[schema(example = "auth0|64f1c2")]
    pub auth0_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchlistItemRequest {
    #[schema(example = 42)]
    pub movie_id: i32,
}

pub fn validate_add_watchlist_item(payload: &AddWatchlistItemRequest) -> Result<(), ValidationError> {
    validate_movie_id(payload.movie_id, "movieId")
}

/// Number of watchlist rows removed by a delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteCountResponse {
    #[schema(example = 1)]
    pub count: u64,
}
