use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, is_valid_email};

/// Local user record, keyed by the identity provider's subject id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 7)]
    pub id: i32,
    /// Subject id issued by the identity provider.
    #[schema(example = "auth0|64f1c2")]
    pub auth0_id: String,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for editing a profile. Both fields are required; they are
/// optional here so that a missing field gets the same message as an empty one.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

/// A profile edit that passed validation, with surrounding whitespace removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

pub fn validate_update_user(payload: &UpdateUserRequest) -> Result<ProfileUpdate, ValidationError> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    let email = payload.email.as_deref().map(str::trim).unwrap_or_default();

    if name.is_empty() || email.is_empty() || !is_valid_email(email) {
        return Err(ValidationError::new(
            "Name and email are required and email must be valid",
        ));
    }

    Ok(ProfileUpdate {
        name: name.to_string(),
        email: email.to_string(),
    })
}
