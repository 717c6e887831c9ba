pub mod recommendation;
pub mod review;
pub mod user;
pub mod watch_list_item;
