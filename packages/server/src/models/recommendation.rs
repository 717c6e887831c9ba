pub use common::recommendation::*;

impl From<crate::entity::recommendation::Model> for RecommendationResponse {
    fn from(m: crate::entity::recommendation::Model) -> Self {
        Self {
            id: m.id,
            movie_id_parent: m.movie_id_parent,
            movie_id_recommend: m.movie_id_recommend,
            comment: m.comment,
            auth0_id: m.auth0_id,
            created_at: m.created_at,
        }
    }
}
