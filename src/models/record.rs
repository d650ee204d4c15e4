// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Plain-data workout record as stored in the durable key-value store.
//!
//! The record carries no behavior. Converting it back into a [`Workout`]
//! re-runs derivation; stored `description`, `paceMinPerKm` and
//! `speedKmPerH` values are written for readers of the raw value only.

use crate::models::workout::{KindValue, Workout, WorkoutKind};
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored workout record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct WorkoutRecord {
    pub id: String,
    /// `running` or `cycling`
    pub kind: String,
    /// `[lat, lng]`
    pub coordinates: [f64; 2],
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_spm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_min_per_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_km_per_h: Option<f64>,
    /// Creation time (RFC3339)
    pub created_at: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub click_count: u32,
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id().to_string(),
            kind: workout.kind().as_str().to_string(),
            coordinates: workout.coordinates().into(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            cadence_spm: workout.cadence_spm(),
            elevation_gain_m: workout.elevation_gain_m(),
            pace_min_per_km: workout.pace_min_per_km(),
            speed_km_per_h: workout.speed_km_per_h(),
            created_at: format_utc_rfc3339(workout.created_at()),
            description: workout.description().to_string(),
            click_count: workout.click_count(),
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = RecordError;

    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(RecordError::MissingField("id"));
        }

        let kind: WorkoutKind = record
            .kind
            .parse()
            .map_err(|_| RecordError::UnknownKind(record.kind.clone()))?;

        let value = match kind {
            WorkoutKind::Running => record
                .cadence_spm
                .filter(|c| *c > 0)
                .map(KindValue::Cadence)
                .ok_or(RecordError::MissingField("cadenceSpm"))?,
            WorkoutKind::Cycling => record
                .elevation_gain_m
                .filter(|e| e.is_finite())
                .map(KindValue::Elevation)
                .ok_or(RecordError::MissingField("elevationGainM"))?,
        };

        if !is_positive(record.distance_km) {
            return Err(RecordError::InvalidValue("distanceKm"));
        }
        if !is_positive(record.duration_min) {
            return Err(RecordError::InvalidValue("durationMin"));
        }
        if !record.coordinates.iter().all(|c| c.is_finite()) {
            return Err(RecordError::InvalidValue("coordinates"));
        }

        let created_at = parse_utc_rfc3339(&record.created_at)
            .ok_or_else(|| RecordError::InvalidTimestamp(record.created_at.clone()))?;

        Ok(Workout::new(
            record.id,
            record.coordinates.into(),
            record.distance_km,
            record.duration_min,
            value,
            created_at,
        )
        .with_click_count(record.click_count))
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Why a stored record could not be turned back into a workout.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown workout kind: {0:?}")]
    UnknownKind(String),

    #[error("Missing or empty field: {0}")]
    MissingField(&'static str),

    #[error("Out-of-range value for field: {0}")]
    InvalidValue(&'static str),

    #[error("Invalid createdAt timestamp: {0:?}")]
    InvalidTimestamp(String),
}
