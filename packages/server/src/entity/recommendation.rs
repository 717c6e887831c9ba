use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recommendation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Movie the recommendation is listed under.
    pub movie_id_parent: i32,
    /// Movie being recommended.
    pub movie_id_recommend: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub auth0_id: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
