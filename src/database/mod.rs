use std::{str::FromStr, time::Duration};

use crate::models::User;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Result, SqlitePool,
};

/// Connects to the SQLite database at `db_url`, returning a connection pool for accessing it.
///
/// An in-memory database only lives as long as the connection that opened it, so for
/// those URLs the pool is pinned to one connection that is never recycled.
/// A database file that does not exist yet is created.
pub async fn connect_sqlx(db_url: &str) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);
    let options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(2));
    let options = if is_in_memory(db_url) {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
            .idle_timeout(Duration::from_secs(30))
            .max_connections(8)
    };
    options.connect_with(connect_options).await
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// Creates the `users` table if it is missing
pub async fn migrate(pool: &SqlitePool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub struct SqliteDatabase {
    sqlx_db: SqlitePool,
}

impl SqliteDatabase {
    pub fn new(sqlx_db: SqlitePool) -> Self {
        SqliteDatabase { sqlx_db }
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, role
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    /// List every user, lowest ID first
    pub async fn list_users(&self) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT id, username, email, role FROM users ORDER BY id")
            .fetch_all(&self.sqlx_db)
            .await
    }

    pub async fn count_users(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.sqlx_db)
            .await
    }

    /// Save a user, overwriting every column of the row at `user.id`.
    ///
    /// When `id` is unset or matches no row a new row is inserted and the
    /// storage-assigned ID is returned; a caller-supplied unknown ID is not kept.
    pub async fn save_user(&self, user: &User) -> Result<User> {
        let mut tx = self.sqlx_db.begin().await?;

        if let Some(id) = user.id {
            let updated = sqlx::query_as::<_, User>(
                r#"
                UPDATE users
                SET username = ?,
                    email = ?,
                    role = ?
                WHERE id = ?
                RETURNING id, username, email, role
                "#,
            )
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.role)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(saved) = updated {
                tx.commit().await?;
                return Ok(saved);
            }
        }

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, role)
            VALUES (?, ?, ?)
            RETURNING id, username, email, role
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.role)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(inserted)
    }

    /// Update only the profile columns of an existing user.
    ///
    /// `None` keeps the stored value. `role` is never written. Returns `None`
    /// when no row has this ID.
    pub async fn update_user_profile(
        &self,
        id: i64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE(?, username),
                email = COALESCE(?, email)
            WHERE id = ?
            RETURNING id, username, email, role
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await
    }
}

#[cfg(test)]
pub(crate) async fn test_database() -> SqliteDatabase {
    let pool = connect_sqlx("sqlite::memory:").await.unwrap();
    migrate(&pool).await.unwrap();
    SqliteDatabase::new(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, role: &str) -> User {
        User {
            id: None,
            username: Some(username.to_owned()),
            email: Some(format!("{}@example.com", username)),
            role: Some(role.to_owned()),
        }
    }

    #[tokio::test]
    async fn save_without_id_inserts_with_generated_id() {
        let db = test_database().await;
        let first = db.save_user(&user("alice", "USER")).await.unwrap();
        let second = db.save_user(&user("bob", "USER")).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn saved_user_reads_back_unchanged() {
        let db = test_database().await;
        let saved = db.save_user(&user("alice", "USER")).await.unwrap();
        let loaded = db.get_user_by_id(saved.id.unwrap()).await.unwrap();
        assert_eq!(loaded, Some(saved));
    }

    #[tokio::test]
    async fn save_with_known_id_overwrites_every_column() {
        let db = test_database().await;
        let saved = db.save_user(&user("alice", "USER")).await.unwrap();

        let overwrite = User {
            id: saved.id,
            username: None,
            email: None,
            role: Some("ADMIN".to_owned()),
        };
        let stored = db.save_user(&overwrite).await.unwrap();

        assert_eq!(stored, overwrite);
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_new_row() {
        let db = test_database().await;
        db.save_user(&user("alice", "USER")).await.unwrap();

        let stray = User {
            id: Some(42),
            ..user("mallory", "ADMIN")
        };
        let stored = db.save_user(&stray).await.unwrap();

        assert_eq!(stored.id, Some(2));
        assert!(db.get_user_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_missing_user_returns_none() {
        let db = test_database().await;
        assert!(db.get_user_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn profile_update_keeps_role_and_absent_fields() {
        let db = test_database().await;
        let saved = db.save_user(&user("alice", "USER")).await.unwrap();
        let id = saved.id.unwrap();

        let updated = db
            .update_user_profile(id, Some("alicia"), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.username.as_deref(), Some("alicia"));
        assert_eq!(updated.email, saved.email);
        assert_eq!(updated.role.as_deref(), Some("USER"));
    }

    #[tokio::test]
    async fn profile_update_of_missing_user_writes_nothing() {
        let db = test_database().await;
        let result = db.update_user_profile(9, Some("ghost"), None).await.unwrap();
        assert!(result.is_none());
        assert!(db.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn connect_creates_missing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        assert!(!path.exists());

        let pool = connect_sqlx(&format!("sqlite://{}", path.display()))
            .await
            .unwrap();
        migrate(&pool).await.unwrap();
        let db = SqliteDatabase::new(pool);
        db.save_user(&user("alice", "USER")).await.unwrap();

        assert!(path.exists());
        assert_eq!(db.count_users().await.unwrap(), 1);
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:demo?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://demo.db"));
    }
}
