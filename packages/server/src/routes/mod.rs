use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::health::ping))
        .merge(user_routes())
        .merge(review_routes())
        .merge(recommendation_routes())
        .merge(watchlist_routes())
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::user::verify_user))
        .routes(routes!(
            handlers::user::get_user,
            handlers::user::update_user
        ))
}

fn review_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::review::create_review))
        .routes(routes!(
            handlers::review::list_movie_reviews,
            handlers::review::update_review,
            handlers::review::delete_review
        ))
        .routes(routes!(handlers::review::list_user_reviews))
}

fn recommendation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::recommendation::create_recommendation))
        .routes(routes!(
            handlers::recommendation::list_movie_recommendations,
            handlers::recommendation::delete_recommendation
        ))
        .routes(routes!(
            handlers::recommendation::list_user_recommendations
        ))
}

fn watchlist_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::watchlist::list_watchlist,
            handlers::watchlist::add_to_watchlist
        ))
        .routes(routes!(handlers::watchlist::remove_from_watchlist))
}
