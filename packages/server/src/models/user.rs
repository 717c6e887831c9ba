pub use common::user::*;

impl From<crate::entity::user::Model> for UserResponse {
    fn from(m: crate::entity::user::Model) -> Self {
        Self {
            id: m.id,
            auth0_id: m.auth0_id,
            email: m.email,
            name: m.name,
            created_at: m.created_at,
        }
    }
}
