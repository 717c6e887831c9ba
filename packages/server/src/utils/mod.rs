pub mod authors;
pub mod identity;
pub mod jwt;
