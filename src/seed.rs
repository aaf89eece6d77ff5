use tracing::info;

use crate::{database::SqliteDatabase, models::User};

pub const SEED_USERNAME: &str = "normalUser";
pub const SEED_EMAIL: &str = "normal@example.com";
pub const SEED_ROLE: &str = "USER";

/// Inserts the baseline test user into an empty `users` table. Run once, before the
/// server accepts requests. Returns `None` when users already exist.
pub async fn seed_test_user(db: &SqliteDatabase) -> sqlx::Result<Option<User>> {
    let existing = db.count_users().await?;
    if existing > 0 {
        info!(existing, "Users already present, skipping seed");
        return Ok(None);
    }

    let user = User {
        id: None,
        username: Some(SEED_USERNAME.to_owned()),
        email: Some(SEED_EMAIL.to_owned()),
        role: Some(SEED_ROLE.to_owned()),
    };
    let user = db.save_user(&user).await?;
    info!(id = ?user.id, role = SEED_ROLE, "Seeded test user");
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_database;

    #[tokio::test]
    async fn seeds_normal_user_with_id_one() {
        let db = test_database().await;
        seed_test_user(&db).await.unwrap();

        let stored = db.get_user_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.username.as_deref(), Some("normalUser"));
        assert_eq!(stored.email.as_deref(), Some("normal@example.com"));
        assert_eq!(stored.role.as_deref(), Some("USER"));
    }

    #[tokio::test]
    async fn second_seed_leaves_existing_users_alone() {
        let db = test_database().await;
        assert!(seed_test_user(&db).await.unwrap().is_some());
        assert!(seed_test_user(&db).await.unwrap().is_none());
        assert_eq!(db.count_users().await.unwrap(), 1);
    }
}
