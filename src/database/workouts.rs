// ABOUTME: Workout record database operations
// ABOUTME: Persists workouts with embedded exercise lists as a JSON column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, Workout};

impl Database {
    /// Save a new workout
    ///
    /// # Errors
    /// Returns an error if serialization or the database operation fails
    pub async fn create_workout(&self, workout: &Workout) -> AppResult<Uuid> {
        let exercises_json = serde_json::to_string(&workout.exercises)?;

        sqlx::query(
            r"
            INSERT INTO workouts (
                id, user_id, date, workout_type, exercises, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(workout.id.to_string())
        .bind(&workout.user_id)
        .bind(workout.date)
        .bind(&workout.workout_type)
        .bind(exercises_json)
        .bind(workout.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        Ok(workout.id)
    }

    /// Get all workouts owned by `owner_id`, newest training date first
    ///
    /// # Errors
    /// Returns an error if the database query fails
    pub async fn get_workouts_by_owner(&self, owner_id: &str) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, workout_type, exercises, created_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY date DESC
            ",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workouts: {e}")))?;

        let mut workouts = Vec::with_capacity(rows.len());
        for row in rows {
            workouts.push(Self::row_to_workout(&row)?);
        }

        Ok(workouts)
    }

    /// Get a workout by ID
    ///
    /// # Errors
    /// Returns an error if the database query fails
    pub async fn get_workout_by_id(&self, workout_id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, date, workout_type, exercises, created_at
            FROM workouts WHERE id = $1
            ",
        )
        .bind(workout_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        row.map(|r| Self::row_to_workout(&r)).transpose()
    }

    /// Delete a workout by ID
    ///
    /// # Errors
    /// Returns a not-found error if no row matched, or a database error
    /// if the operation fails
    pub async fn delete_workout(&self, workout_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(workout_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Workout"));
        }

        Ok(())
    }

    /// Convert a database row to a Workout struct
    fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
        let id: String = row.get("id");
        let exercises_json: String = row.get("exercises");
        let exercises: Vec<Exercise> = serde_json::from_str(&exercises_json)?;

        Ok(Workout {
            id: Uuid::parse_str(&id)
                .map_err(|e| AppError::internal(format!("Failed to parse workout id UUID: {e}")))?,
            user_id: row.get("user_id"),
            date: row.get("date"),
            workout_type: row.get("workout_type"),
            exercises,
            created_at: row.get("created_at"),
        })
    }
}
