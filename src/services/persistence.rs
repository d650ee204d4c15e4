// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence adapter: workout collection <-> durable key-value store.
//!
//! The whole collection is written as one JSON array under a single key.
//! Loading rebuilds every workout through the model constructors so derived
//! fields always come from the current derivation code.

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use crate::models::{RecordError, Workout, WorkoutRecord};
use std::collections::HashSet;

/// Saves and loads the workout collection.
pub struct PersistenceAdapter {
    kv: Box<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new<S: KeyValueStore + 'static>(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv: Box::new(kv),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored collection with `workouts`.
    pub fn save(&self, workouts: &[Workout]) -> Result<()> {
        let json = encode(workouts)?;
        self.kv.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = workouts.len(), "Saved workouts");
        Ok(())
    }

    /// Read the stored collection. Absent or unreadable data yields an
    /// empty collection; individual bad records are dropped.
    pub fn load(&self) -> Vec<Workout> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored workouts");
                return Vec::new();
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to read stored workouts");
                return Vec::new();
            }
        };

        let workouts = decode(&raw);
        tracing::info!(key = %self.key, count = workouts.len(), "Loaded workouts");
        workouts
    }

    /// Remove the stored collection.
    pub fn clear(&self) -> Result<()> {
        self.kv.remove(&self.key)?;
        tracing::debug!(key = %self.key, "Cleared stored workouts");
        Ok(())
    }
}

/// Serialize the collection to its stored JSON form.
pub fn encode(workouts: &[Workout]) -> Result<String> {
    let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
    serde_json::to_string(&records)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialize workouts: {}", e)))
}

/// Rebuild workouts from their stored JSON form.
///
/// Each element is converted independently so one bad record never hides
/// the rest. Later duplicates of an id are dropped.
pub fn decode(raw: &str) -> Vec<Workout> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(error = %e, "Stored workouts are not a JSON array; ignoring");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut workouts = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        match rebuild(value) {
            Ok(workout) if !seen.insert(workout.id().to_string()) => {
                tracing::warn!(index, workout_id = workout.id(), "Dropping duplicate workout id");
            }
            Ok(workout) => workouts.push(workout),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping unreadable workout record");
            }
        }
    }

    workouts
}

fn rebuild(value: serde_json::Value) -> std::result::Result<Workout, RecordError> {
    let record: WorkoutRecord = serde_json::from_value(value)?;
    Workout::try_from(record)
}
