use std::time::Duration;

use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::entity::{recommendation, review, watch_list_item};

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // Set connection pool options
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Create the lookup indexes used by the list endpoints.
///
/// Schema sync only knows about unique constraints, so the non-unique
/// indexes are created here on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let indexes = [
        // GET /reviews/{movieId}
        (
            "idx_review_movie",
            Index::create()
                .if_not_exists()
                .name("idx_review_movie")
                .table(review::Entity)
                .col(review::Column::MovieId)
                .to_owned(),
        ),
        // GET /user/reviews/{subjectId}
        (
            "idx_review_author",
            Index::create()
                .if_not_exists()
                .name("idx_review_author")
                .table(review::Entity)
                .col(review::Column::Auth0Id)
                .to_owned(),
        ),
        // GET /recommendations/{movieId}
        (
            "idx_recommendation_parent",
            Index::create()
                .if_not_exists()
                .name("idx_recommendation_parent")
                .table(recommendation::Entity)
                .col(recommendation::Column::MovieIdParent)
                .to_owned(),
        ),
        // GET /user/recommendations/{subjectId}
        (
            "idx_recommendation_author",
            Index::create()
                .if_not_exists()
                .name("idx_recommendation_author")
                .table(recommendation::Entity)
                .col(recommendation::Column::Auth0Id)
                .to_owned(),
        ),
        // GET /watchlist and DELETE /watchlist/{movieId}
        (
            "idx_watch_list_item_owner_movie",
            Index::create()
                .if_not_exists()
                .name("idx_watch_list_item_owner_movie")
                .table(watch_list_item::Entity)
                .col(watch_list_item::Column::Auth0Id)
                .col(watch_list_item::Column::MovieId)
                .to_owned(),
        ),
    ];

    for (name, index) in indexes {
        create_index(db, name, index).await?;
    }

    Ok(())
}

async fn create_index(
    db: &DatabaseConnection,
    name: &str,
    index: IndexCreateStatement,
) -> Result<(), DbErr> {
    let stmt = index.to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index {} exists", name);
            Ok(())
        }
        Err(e) => {
            warn!("Failed to create index {}: {}", name, e);
            Err(e)
        }
    }
}
