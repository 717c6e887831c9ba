use std::collections::HashMap;

use common::Author;
use sea_orm::*;

use crate::entity::{recommendation, review, user};
use crate::error::AppError;

/// Content that names its author by subject id.
pub trait Authored {
    fn author_subject(&self) -> &str;
}

impl Authored for review::Model {
    fn author_subject(&self) -> &str {
        &self.auth0_id
    }
}

impl Authored for recommendation::Model {
    fn author_subject(&self) -> &str {
        &self.auth0_id
    }
}

/// Resolve the author of every record with a single query.
///
/// The result is parallel to `records`. Subjects without a user row come
/// back as `Author::Unknown`.
pub async fn resolve_authors<C, T>(db: &C, records: &[T]) -> Result<Vec<Author>, DbErr>
where
    C: ConnectionTrait,
    T: Authored,
{
    let mut subjects: Vec<&str> = records.iter().map(Authored::author_subject).collect();
    subjects.sort_unstable();
    subjects.dedup();

    if subjects.is_empty() {
        return Ok(Vec::new());
    }

    let emails: HashMap<String, Option<String>> = user::Entity::find()
        .filter(user::Column::Auth0Id.is_in(subjects))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.auth0_id, u.email))
        .collect();

    Ok(records
        .iter()
        .map(|r| match emails.get(r.author_subject()) {
            Some(email) => Author::Known {
                email: email.clone(),
            },
            None => Author::Unknown,
        })
        .collect())
}

/// Pair each record with its author.
///
/// With `strict` set, any unknown author fails the whole batch instead.
pub async fn attach_authors<C, T>(
    db: &C,
    records: Vec<T>,
    strict: bool,
) -> Result<Vec<(T, Author)>, AppError>
where
    C: ConnectionTrait,
    T: Authored,
{
    let authors = resolve_authors(db, &records).await?;

    if strict {
        let mut missing: Vec<&str> = records
            .iter()
            .zip(&authors)
            .filter(|(_, author)| !author.is_known())
            .map(|(record, _)| record.author_subject())
            .collect();
        missing.sort_unstable();
        missing.dedup();
        if !missing.is_empty() {
            return Err(AppError::Internal(format!(
                "No user for author subject(s): {}",
                missing.join(", ")
            )));
        }
    }

    Ok(records.into_iter().zip(authors).collect())
}
