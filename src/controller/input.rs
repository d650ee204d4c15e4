// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form input coercion and validation, shared by create and edit.
//!
//! Distance and duration must be finite and strictly positive. Cadence must
//! be a positive whole number. Elevation gain only has to be finite; a
//! negative gain (net descent) is accepted.

use crate::error::{AppError, Result};
use crate::models::{KindValue, WorkoutKind};
use crate::ui::FormFields;

/// Validated form values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub distance_km: f64,
    pub duration_min: f64,
    pub value: KindValue,
}

/// Parse and validate the raw form values for a workout of `kind`.
pub fn parse_input(kind: WorkoutKind, fields: &FormFields) -> Result<WorkoutInput> {
    let distance_km = positive("Distance", parse_number("Distance", &fields.distance)?)?;
    let duration_min = positive("Duration", parse_number("Duration", &fields.duration)?)?;

    let value = match kind {
        WorkoutKind::Running => KindValue::Cadence(parse_cadence(&fields.cadence)?),
        WorkoutKind::Cycling => {
            KindValue::Elevation(parse_number("Elevation gain", &fields.elevation)?)
        }
    };

    Ok(WorkoutInput {
        distance_km,
        duration_min,
        value,
    })
}

/// Parse the kind selector value.
pub fn parse_kind(raw: &str) -> Result<WorkoutKind> {
    raw.parse()
        .map_err(|e: crate::models::workout::UnknownKind| AppError::Validation(e.to_string()))
}

fn parse_number(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::Validation(format!("{} has to be a number", name)))
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::Validation(format!(
            "{} has to be a positive number",
            name
        )))
    }
}

fn parse_cadence(raw: &str) -> Result<u32> {
    let value = positive("Cadence", parse_number("Cadence", raw)?)?;
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(AppError::Validation(
            "Cadence has to be a positive whole number".to_string(),
        ));
    }
    Ok(value as u32)
}
