// ABOUTME: Workout route handlers for create, list, and delete operations
// ABOUTME: Derives the owner id from the session principal and checks it on every operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Workout routes.
//!
//! Creating and listing workouts scope everything to the owner id derived
//! from the caller's session token. Delete re-derives the owner id and
//! compares it to the record before removing anything; a workout owned by
//! someone else reports not-found so record existence is never leaked.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{delete, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    auth::SessionResolver,
    constants::limits,
    database::Database,
    errors::{AppError, AppResult},
    models::{Exercise, Workout},
    routes::{extract_session_token, SessionTokenQuery},
    server::ServerResources,
};

/// Workout creation request
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    /// When the session took place; defaults to now when omitted
    pub date: Option<DateTime<Utc>>,
    /// Session-type label
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Exercises performed, in order
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
    /// Workout-level weight unit applied to exercises that omit their own
    pub weight_unit: Option<String>,
}

/// One exercise in a workout creation request
#[derive(Debug, Deserialize)]
pub struct ExerciseInput {
    /// Exercise name
    pub name: String,
    /// Repetition count or duration ("12", "30s")
    pub reps: Option<String>,
    /// Number of sets; defaults to 3
    pub sets: Option<i64>,
    /// Weight moved, if any
    pub weight: Option<f64>,
    /// Weight unit for this exercise; falls back to the workout-level value
    pub weight_unit: Option<String>,
}

/// Confirmation body for deletions
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Workout service for business logic
#[derive(Clone)]
pub struct WorkoutService {
    database: Arc<Database>,
    resolver: SessionResolver,
}

impl WorkoutService {
    /// Creates a new workout service
    #[must_use]
    pub fn new(database: Arc<Database>) -> Self {
        let resolver = SessionResolver::new(database.clone());
        Self { database, resolver }
    }

    /// Create a workout owned by the session's principal
    ///
    /// # Errors
    /// Returns an auth error for an invalid session and a database error
    /// if the write fails
    #[tracing::instrument(skip(self, token, request), fields(route = "create_workout"))]
    pub async fn create(&self, token: &str, request: CreateWorkoutRequest) -> AppResult<Workout> {
        let (principal, _user) = self.resolver.resolve(token).await?;
        let owner_id = principal.owner_id();

        let workout_unit = request
            .weight_unit
            .unwrap_or_else(|| limits::DEFAULT_WEIGHT_UNIT.to_owned());

        let exercises: Vec<Exercise> = request
            .exercises
            .into_iter()
            .map(|input| Exercise {
                name: input.name,
                reps: input.reps,
                sets: input.sets.unwrap_or(limits::DEFAULT_EXERCISE_SETS),
                weight: input.weight,
                weight_unit: input.weight_unit.unwrap_or_else(|| workout_unit.clone()),
            })
            .collect();

        let date = request.date.unwrap_or_else(Utc::now);
        let workout = Workout::new(owner_id, date, request.workout_type, exercises);

        self.database.create_workout(&workout).await?;
        info!(workout_id = %workout.id, "Workout created");

        Ok(workout)
    }

    /// List the principal's workouts, newest training date first
    ///
    /// # Errors
    /// Returns an auth error for an invalid session and a database error
    /// if the read fails
    #[tracing::instrument(skip(self, token), fields(route = "list_workouts"))]
    pub async fn list(&self, token: &str) -> AppResult<Vec<Workout>> {
        let (principal, _user) = self.resolver.resolve(token).await?;
        self.database
            .get_workouts_by_owner(&principal.owner_id())
            .await
    }

    /// Delete a workout after verifying the caller owns it
    ///
    /// # Errors
    /// Returns an auth error for an invalid session and not-found for an
    /// unknown id or a workout owned by someone else
    #[tracing::instrument(skip(self, token), fields(route = "delete_workout"))]
    pub async fn delete(&self, token: &str, workout_id: &str) -> AppResult<MessageResponse> {
        let (principal, _user) = self.resolver.resolve(token).await?;

        // Non-UUID ids (including legacy object ids) cannot exist in this store
        let workout_id =
            Uuid::parse_str(workout_id).map_err(|_| AppError::not_found("Workout"))?;

        let workout = self
            .database
            .get_workout_by_id(workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        if workout.user_id != principal.owner_id() {
            debug!(workout_id = %workout_id, "Delete refused: caller does not own workout");
            return Err(AppError::not_found("Workout"));
        }

        self.database.delete_workout(workout_id).await?;
        info!(workout_id = %workout_id, "Workout deleted");

        Ok(MessageResponse {
            message: "Deleted".to_owned(),
        })
    }
}

/// Axum route handlers for workout endpoints
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Build the workouts router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts", post(Self::handle_create).get(Self::handle_list))
            .route("/workouts/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle workout creation
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SessionTokenQuery>,
        Json(request): Json<CreateWorkoutRequest>,
    ) -> AppResult<Json<Workout>> {
        let token = extract_session_token(&headers, &query)?;
        let service = WorkoutService::new(resources.database.clone());
        let workout = service.create(&token, request).await?;
        Ok(Json(workout))
    }

    /// Handle workout listing
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SessionTokenQuery>,
    ) -> AppResult<Json<Vec<Workout>>> {
        let token = extract_session_token(&headers, &query)?;
        let service = WorkoutService::new(resources.database.clone());
        let workouts = service.list(&token).await?;
        Ok(Json(workouts))
    }

    /// Handle workout deletion
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SessionTokenQuery>,
        Path(workout_id): Path<String>,
    ) -> AppResult<Json<MessageResponse>> {
        let token = extract_session_token(&headers, &query)?;
        let service = WorkoutService::new(resources.database.clone());
        let response = service.delete(&token, &workout_id).await?;
        Ok(Json(response))
    }
}
