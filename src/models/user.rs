use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::dto::empty_as_none;

/// A stored user row. Every column is nullable, so a request that binds
/// straight onto this type can leave any of them out.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, FromRow, ToSchema)]
pub struct User {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Privilege label such as `USER` or `ADMIN`.
    #[serde(default)]
    #[schema(example = "ADMIN")]
    pub role: Option<String>,
}
