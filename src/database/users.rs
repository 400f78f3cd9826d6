// ABOUTME: User account database operations
// ABOUTME: Handles user creation and lookup by id, email, and Google subject id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::constants::error_messages;
use crate::errors::{AppError, AppResult};
use crate::models::User;

impl Database {
    /// Create a new user
    ///
    /// The store enforces email uniqueness via a UNIQUE constraint; a
    /// violation surfaces as a duplicate error rather than a generic
    /// database failure, so two racing registrations cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email is already in use
    /// - The database operation fails
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (
                id, email, google_id, password_hash, display_name,
                avatar_url, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.google_id)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(&user.avatar_url)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists(error_messages::USER_ALREADY_EXISTS)
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;

        Ok(user.id)
    }

    /// Get a user by ID
    ///
    /// # Errors
    /// Returns an error if the database query fails
    pub async fn get_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let user_id_str = user_id.to_string();
        self.get_user_by_field("id", &user_id_str).await
    }

    /// Get a user by email
    ///
    /// # Errors
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_user_by_field("email", email).await
    }

    /// Get a user by Google subject id
    ///
    /// # Errors
    /// Returns an error if the database query fails
    pub async fn get_user_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        self.get_user_by_field("google_id", google_id).await
    }

    /// Internal implementation for getting a user by a single column
    async fn get_user_by_field(&self, field: &str, value: &str) -> AppResult<Option<User>> {
        let query = format!(
            r"
            SELECT id, email, google_id, password_hash, display_name,
                   avatar_url, created_at
            FROM users WHERE {field} = $1
            "
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by {field}: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Convert a database row to a User struct
    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let id: String = row.get("id");

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| AppError::internal(format!("Failed to parse user id UUID: {e}")))?,
            email: row.get("email"),
            google_id: row.get("google_id"),
            password_hash: row.get("password_hash"),
            display_name: row.get("display_name"),
            avatar_url: row.get("avatar_url"),
            created_at: row.get("created_at"),
        })
    }
}

/// Whether a sqlx error is a UNIQUE constraint violation
fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE constraint failed")
    )
}
