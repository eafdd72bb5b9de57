// ABOUTME: User account database operations
// ABOUTME: Handles local account creation and identity-provider linkage lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::Database;
use crate::models::{NewUser, User};
use anyhow::Result;
use sqlx::Row;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT,
                provider TEXT,
                provider_user_id TEXT,
                email TEXT,
                profile_photo_url TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_username ON users(username)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_users_provider ON users(provider, provider_user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the username is already taken or the insert
    /// fails.
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            r"
            INSERT INTO users (username, password, provider, provider_user_id, email, profile_photo_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.provider)
        .bind(&user.provider_user_id)
        .bind(&user.email)
        .bind(&user.profile_photo_url)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: user.username.clone(),
            password: user.password.clone(),
            provider: user.provider.clone(),
            provider_user_id: user.provider_user_id.clone(),
            email: user.email.clone(),
            profile_photo_url: user.profile_photo_url.clone(),
        })
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, username, password, provider, provider_user_id, email, profile_photo_url
            FROM users WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Get a user by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, username, password, provider, provider_user_id, email, profile_photo_url
            FROM users WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Get a user by identity-provider linkage
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user_by_provider(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, username, password, provider, provider_user_id, email, profile_photo_url
            FROM users WHERE provider = $1 AND provider_user_id = $2
            ",
        )
        .bind(provider)
        .bind(provider_user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Get total number of users
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// Convert a database row to a User struct
    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        Ok(User {
            id: row.get("id"),
            username: row.get("username"),
            password: row.get("password"),
            provider: row.get("provider"),
            provider_user_id: row.get("provider_user_id"),
            email: row.get("email"),
            profile_photo_url: row.get("profile_photo_url"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::NewUser;

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let db = create_test_db().await.unwrap();

        let created = db
            .create_user(&NewUser::local("alice", "secret"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = db.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "alice");
        assert_eq!(fetched.password.as_deref(), Some("secret"));

        assert!(db.get_user(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let db = create_test_db().await.unwrap();

        db.create_user(&NewUser::local("alice", "secret"))
            .await
            .unwrap();
        assert!(db
            .create_user(&NewUser::local("alice", "other"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_provider_lookup_matches_both_fields() {
        let db = create_test_db().await.unwrap();

        let user = NewUser {
            username: "google-123".to_owned(),
            password: None,
            provider: Some("google".to_owned()),
            provider_user_id: Some("123".to_owned()),
            email: Some("alice@example.com".to_owned()),
            profile_photo_url: None,
        };
        db.create_user(&user).await.unwrap();

        assert!(db
            .get_user_by_provider("google", "123")
            .await
            .unwrap()
            .is_some());
        assert!(db
            .get_user_by_provider("facebook", "123")
            .await
            .unwrap()
            .is_none());
        assert!(db
            .get_user_by_provider("google", "999")
            .await
            .unwrap()
            .is_none());
    }
}
