pub use common::watchlist::*;

impl From<crate::entity::watch_list_item::Model> for WatchlistItemResponse {
    fn from(m: crate::entity::watch_list_item::Model) -> Self {
        Self {
            id: m.id,
            movie_id: m.movie_id,
            auth0_id: m.auth0_id,
            created_at: m.created_at,
        }
    }
}
