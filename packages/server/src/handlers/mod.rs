pub mod health;
pub mod recommendation;
pub mod review;
pub mod user;
pub mod watchlist;
