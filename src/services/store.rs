// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory workout collection.
//!
//! The store exclusively owns the ordered collection (oldest first) and
//! assigns identities. It performs no input validation; callers check
//! distance/duration/kind values before reaching it.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, KindValue, Workout};
use crate::time_utils::now_millis;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Last id handed out in this process.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Next time-based id: the creation millisecond, bumped past any id
/// already issued by this process.
fn next_id(created_at: DateTime<Utc>) -> i64 {
    let millis = created_at.timestamp_millis();
    let prev = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
            Some(millis.max(prev + 1))
        })
        .unwrap_or_else(|prev| prev);
    millis.max(prev + 1)
}

/// New values for the editable fields of an existing workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutPatch {
    pub distance_km: f64,
    pub duration_min: f64,
    pub value: KindValue,
}

/// Ordered workout collection.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection with previously persisted workouts.
    pub fn load(&mut self, workouts: Vec<Workout>) {
        tracing::debug!(count = workouts.len(), "Loaded workouts into store");
        self.workouts = workouts;
    }

    /// Create a workout stamped with the current time. The kind follows
    /// from the variant of `value`.
    pub fn create(
        &mut self,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        value: KindValue,
    ) -> &Workout {
        self.create_at(coordinates, distance_km, duration_min, value, now_millis())
    }

    /// Create a workout with an explicit creation time.
    pub fn create_at(
        &mut self,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        value: KindValue,
        created_at: DateTime<Utc>,
    ) -> &Workout {
        let id = self.fresh_id(created_at);
        let workout = Workout::new(id, coordinates, distance_km, duration_min, value, created_at);

        tracing::debug!(
            workout_id = workout.id(),
            kind = %workout.kind(),
            "Created workout"
        );

        let index = self.workouts.len();
        self.workouts.push(workout);
        &self.workouts[index]
    }

    fn fresh_id(&self, created_at: DateTime<Utc>) -> String {
        loop {
            let id = next_id(created_at).to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.workouts.iter().any(|w| w.id() == id)
    }

    /// Look up a workout. `None` is an expected outcome (stale UI reference).
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Apply new base values to an existing workout and re-derive.
    ///
    /// Returns `Ok(None)` if `id` is absent. A patch whose value belongs to
    /// the other kind is rejected and the workout is left untouched.
    pub fn update(&mut self, id: &str, patch: WorkoutPatch) -> Result<Option<&Workout>> {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id() == id) else {
            return Ok(None);
        };

        if patch.value.kind() != workout.kind() {
            return Err(AppError::Validation(format!(
                "A {} workout cannot be changed to {}",
                workout.kind(),
                patch.value.kind()
            )));
        }

        workout.apply(patch.distance_km, patch.duration_min, patch.value);
        tracing::debug!(workout_id = id, "Updated workout");
        Ok(Some(&*workout))
    }

    /// Remove a workout. Deleting an absent id is a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id() != id);
        let removed = self.workouts.len() != before;
        tracing::debug!(workout_id = id, removed, "Delete workout");
        removed
    }

    pub fn reset_all(&mut self) {
        tracing::debug!(count = self.workouts.len(), "Clearing all workouts");
        self.workouts.clear();
    }

    /// Read-only ordered view (oldest first).
    pub fn snapshot(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
