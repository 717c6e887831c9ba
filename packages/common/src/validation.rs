/// A request payload that failed validation. The message is shown to the caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 5;

/// Validate a star rating (1-5 inclusive).
pub fn validate_stars(stars: i32) -> Result<(), ValidationError> {
    if !(MIN_STARS..=MAX_STARS).contains(&stars) {
        return Err(ValidationError::new(format!(
            "Stars must be between {MIN_STARS} and {MAX_STARS}"
        )));
    }
    Ok(())
}

/// Validate a catalog movie id (positive integer).
pub fn validate_movie_id(movie_id: i32, field: &str) -> Result<(), ValidationError> {
    if movie_id <= 0 {
        return Err(ValidationError::new(format!("{field} must be a positive integer")));
    }
    Ok(())
}

/// Validate a free-text field that must contain something besides whitespace.
pub fn validate_non_empty(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Loose email check: an `@` and a `.` somewhere in the address.
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}
