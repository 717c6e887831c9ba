pub mod author;
pub mod error;
pub mod recommendation;
pub mod review;
pub mod user;
pub mod validation;
pub mod watchlist;

pub use author::Author;
pub use error::ErrorBody;
pub use validation::ValidationError;
