use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::{debug, info};

use crate::entity::user;
use crate::error::AppError;

/// Who the caller is, according to a verified token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

pub async fn find_user<C: ConnectionTrait>(
    db: &C,
    subject: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Auth0Id.eq(subject))
        .one(db)
        .await
}

/// Return the local user for `identity`, creating it on first contact.
///
/// Email and name are copied only when the row is created; an existing
/// row is never updated here. Two first logins racing for the same subject
/// both end up returning the single row the unique constraint allows.
pub async fn find_or_create_user<C: ConnectionTrait>(
    db: &C,
    identity: &Identity,
) -> Result<user::Model, AppError> {
    if let Some(existing) = find_user(db, &identity.subject).await? {
        return Ok(existing);
    }

    let new_user = user::ActiveModel {
        auth0_id: Set(identity.subject.clone()),
        email: Set(identity.email.clone()),
        name: Set(identity.name.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = user::Entity::insert(new_user)
        .on_conflict(
            OnConflict::column(user::Column::Auth0Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => {
            debug!(subject = %identity.subject, "First-login race: user created concurrently");
        }
        Ok(_) => info!(subject = %identity.subject, "Created user on first login"),
        Err(e) => return Err(e.into()),
    }

    find_user(db, &identity.subject).await?.ok_or_else(|| {
        AppError::Internal(format!(
            "User {} missing right after insert",
            identity.subject
        ))
    })
}
