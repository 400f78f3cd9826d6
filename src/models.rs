// ABOUTME: Core data models for users, workouts, and embedded exercises
// ABOUTME: Defines the three record schemas persisted by the data store adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

//! Common data models for the Ironlog server.
//!
//! A [`User`] is reachable by email+password, by Google subject id, or both;
//! email is globally unique. A [`Workout`] belongs to exactly one owner via a
//! verbatim owner-id string (raw Google subject id or raw internal user id,
//! depending on login path) and embeds its [`Exercise`] list — exercises have
//! no identity of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits;

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (globally unique)
    pub email: String,
    /// Google subject id if the user signed in with Google
    pub google_id: Option<String>,
    /// Hashed password for email+password accounts
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Display name
    pub display_name: String,
    /// Avatar image URL if the identity provider supplied one
    pub avatar_url: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new email+password user
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            google_id: None,
            password_hash: Some(password_hash),
            display_name,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    /// Create a new Google-account user
    #[must_use]
    pub fn new_google(
        google_id: String,
        email: String,
        display_name: String,
        avatar_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            google_id: Some(google_id),
            password_hash: None,
            display_name,
            avatar_url,
            created_at: Utc::now(),
        }
    }
}

/// A logged training session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique workout identifier
    pub id: Uuid,
    /// Owner id, stored verbatim from the caller's session principal
    pub user_id: String,
    /// When the session took place
    pub date: DateTime<Utc>,
    /// Session-type label (free-form, e.g. "Push", "Pull", "Legs", "Core", "Cardio")
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Ordered exercise list, embedded in the workout record
    pub exercises: Vec<Exercise>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Create a new workout owned by `user_id`
    #[must_use]
    pub fn new(
        user_id: String,
        date: DateTime<Utc>,
        workout_type: String,
        exercises: Vec<Exercise>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            workout_type,
            exercises,
            created_at: Utc::now(),
        }
    }
}

/// An exercise embedded in a workout
///
/// `reps` is a string so clients can log "12" as well as "30s".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Repetition count or duration
    pub reps: Option<String>,
    /// Number of sets
    #[serde(default = "default_sets")]
    pub sets: i64,
    /// Weight moved, if any
    pub weight: Option<f64>,
    /// Weight unit, "lbs" or "kg"
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
}

fn default_sets() -> i64 {
    limits::DEFAULT_EXERCISE_SETS
}

fn default_weight_unit() -> String {
    limits::DEFAULT_WEIGHT_UNIT.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User::new(
            "a@x.com".into(),
            "$2b$12$hash".into(),
            "A".into(),
        );
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("a@x.com"));
    }

    #[test]
    fn test_exercise_defaults() {
        let exercise: Exercise =
            serde_json::from_str(r#"{"name": "Plank", "reps": "30s"}"#).unwrap();
        assert_eq!(exercise.sets, 3);
        assert_eq!(exercise.weight_unit, "lbs");
        assert!(exercise.weight.is_none());
    }

    #[test]
    fn test_workout_type_wire_name() {
        let workout = Workout::new(
            "owner".into(),
            Utc::now(),
            "Push".into(),
            vec![],
        );
        let json = serde_json::to_value(&workout).unwrap();
        assert_eq!(json["type"], "Push");
        assert!(json.get("workout_type").is_none());
    }
}
