use common::Author;
pub use common::review::*;

use crate::entity::review;

impl From<review::Model> for ReviewResponse {
    fn from(m: review::Model) -> Self {
        Self {
            id: m.id,
            movie_id: m.movie_id,
            review: m.review,
            stars: m.stars,
            auth0_id: m.auth0_id,
            created_at: m.created_at,
        }
    }
}

/// Listing shape for `GET /reviews/{movieId}`.
pub fn movie_review(m: review::Model, user: Author) -> MovieReview {
    MovieReview {
        time: m.created_at,
        stars: m.stars,
        content: m.review,
        user,
    }
}
