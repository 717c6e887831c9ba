use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A star-rated review of a catalog movie.
///
/// `auth0_id` names the author by subject id. There is no foreign key to
/// `user`, so a review can outlive (or predate) its author's row.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub movie_id: i32,
    #[sea_orm(column_type = "Text")]
    pub review: String,
    /// 1 to 5.
    pub stars: i32,
    pub auth0_id: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
