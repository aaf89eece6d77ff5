use crate::{models::User, sanitize::escape_html};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The only fields a caller may change on an existing user.
///
/// Anything else in the request body (`id`, `role`, ...) is dropped while
/// binding, since this type has nowhere to put it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// HTML-escapes every field that is present
    pub fn sanitized(self) -> Self {
        Self {
            username: self.username.as_deref().map(escape_html),
            email: self.email.as_deref().map(escape_html),
        }
    }

    /// Copies the present fields onto `user`, leaving `id` and `role` alone
    pub fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = Some(username);
        }
        if let Some(email) = self.email {
            user.email = Some(email);
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Profile {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    #[schema(example = "USER")]
    pub role: Option<String>,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}
