// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model: a tagged variant over the supported kinds.
//!
//! Constructors always return a fully derived workout. No validation happens
//! here; the controller checks inputs before a workout is ever built.

use crate::time_utils::format_display_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Workout kind discriminant. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Wire/selector value (`running`, `cycling`).
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized label used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }

    /// Style class for this kind's marker popup.
    pub fn popup_class(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running-popup",
            WorkoutKind::Cycling => "cycling-popup",
        }
    }

    /// Unit of the derived metric (pace or speed).
    pub fn metric_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "min/km",
            WorkoutKind::Cycling => "km/h",
        }
    }

    /// Unit of the kind-specific input (cadence or elevation gain).
    pub fn value_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "spm",
            WorkoutKind::Cycling => "m",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown workout kind: {0:?}")]
pub struct UnknownKind(pub String);

/// The kind-specific input value. Its variant determines the kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindValue {
    Cadence(u32),
    Elevation(f64),
}

impl KindValue {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            KindValue::Cadence(_) => WorkoutKind::Running,
            KindValue::Elevation(_) => WorkoutKind::Cycling,
        }
    }
}

/// Kind-specific payload: the input value plus its derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindDetails {
    Running {
        cadence_spm: u32,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl KindDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            KindDetails::Running { .. } => WorkoutKind::Running,
            KindDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn value(&self) -> KindValue {
        match *self {
            KindDetails::Running { cadence_spm, .. } => KindValue::Cadence(cadence_spm),
            KindDetails::Cycling {
                elevation_gain_m, ..
            } => KindValue::Elevation(elevation_gain_m),
        }
    }

    /// Pace (min/km) for running, speed (km/h) for cycling.
    pub fn metric(&self) -> f64 {
        match *self {
            KindDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            KindDetails::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        }
    }
}

/// Compute the kind payload from the base fields.
pub fn derive_details(value: KindValue, distance_km: f64, duration_min: f64) -> KindDetails {
    match value {
        KindValue::Cadence(cadence_spm) => KindDetails::Running {
            cadence_spm,
            pace_min_per_km: duration_min / distance_km,
        },
        KindValue::Elevation(elevation_gain_m) => KindDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h: distance_km / (duration_min / 60.0),
        },
    }
}

/// Build the display description, e.g. `Running on April 14, 2026`.
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), format_display_date(created_at))
}

/// A single logged workout.
///
/// Base fields are private so derived fields can only change through
/// [`Workout::recompute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    created_at: DateTime<Utc>,
    description: String,
    click_count: u32,
    details: KindDetails,
}

impl Workout {
    pub fn new(
        id: impl Into<String>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        value: KindValue,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut workout = Self {
            id: id.into(),
            coordinates,
            distance_km,
            duration_min,
            created_at,
            description: String::new(),
            click_count: 0,
            details: derive_details(value, distance_km, duration_min),
        };
        workout.recompute();
        workout
    }

    pub fn running(
        id: impl Into<String>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            id,
            coordinates,
            distance_km,
            duration_min,
            KindValue::Cadence(cadence_spm),
            created_at,
        )
    }

    pub fn cycling(
        id: impl Into<String>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            id,
            coordinates,
            distance_km,
            duration_min,
            KindValue::Elevation(elevation_gain_m),
            created_at,
        )
    }

    /// Re-derive the metric and description from the base fields. Idempotent.
    pub fn recompute(&mut self) {
        self.details = derive_details(self.details.value(), self.distance_km, self.duration_min);
        self.description = describe(self.kind(), self.created_at);
    }

    /// Replace the editable base fields and re-derive. The caller guarantees
    /// `value` matches this workout's kind.
    pub(crate) fn apply(&mut self, distance_km: f64, duration_min: f64, value: KindValue) {
        debug_assert_eq!(value.kind(), self.kind());
        self.distance_km = distance_km;
        self.duration_min = duration_min;
        self.details = derive_details(value, distance_km, duration_min);
        self.recompute();
    }

    pub(crate) fn with_click_count(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }

    /// Retained for stored-format compatibility; nothing calls it.
    pub fn click(&mut self) {
        self.click_count += 1;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn details(&self) -> &KindDetails {
        &self.details
    }

    pub fn value(&self) -> KindValue {
        self.details.value()
    }

    pub fn metric(&self) -> f64 {
        self.details.metric()
    }

    pub fn cadence_spm(&self) -> Option<u32> {
        match self.details {
            KindDetails::Running { cadence_spm, .. } => Some(cadence_spm),
            KindDetails::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain_m(&self) -> Option<f64> {
        match self.details {
            KindDetails::Cycling {
                elevation_gain_m, ..
            } => Some(elevation_gain_m),
            KindDetails::Running { .. } => None,
        }
    }

    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            KindDetails::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            KindDetails::Cycling { .. } => None,
        }
    }

    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            KindDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            KindDetails::Running { .. } => None,
        }
    }

    /// Marker popup text, e.g. `🏃‍♂️ Running on April 14, 2026`.
    pub fn popup_text(&self) -> String {
        format!("{} {}", self.kind().emoji(), self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn april_14() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 14, 8, 0, 0).unwrap()
    }

    fn london() -> Coordinates {
        Coordinates::new(51.5, -0.1)
    }

    #[test]
    fn test_running_derives_pace_and_description() {
        let workout = Workout::running("1", london(), 5.0, 25.0, 180, april_14());

        assert_eq!(workout.kind(), WorkoutKind::Running);
        assert_eq!(workout.pace_min_per_km(), Some(5.0));
        assert_eq!(workout.speed_km_per_h(), None);
        assert_eq!(workout.cadence_spm(), Some(180));
        assert_eq!(workout.description(), "Running on April 14, 2026");
        assert_eq!(workout.click_count(), 0);
    }

    #[test]
    fn test_cycling_derives_speed() {
        let workout = Workout::cycling("2", london(), 20.0, 60.0, 150.0, april_14());

        assert_eq!(workout.kind(), WorkoutKind::Cycling);
        assert_eq!(workout.speed_km_per_h(), Some(20.0));
        assert_eq!(workout.elevation_gain_m(), Some(150.0));
        assert_eq!(workout.cadence_spm(), None);
        assert_eq!(workout.description(), "Cycling on April 14, 2026");
    }

    #[test]
    fn test_negative_elevation_is_kept() {
        let workout = Workout::cycling("3", london(), 10.0, 30.0, -42.5, april_14());
        assert_eq!(workout.elevation_gain_m(), Some(-42.5));
        assert_eq!(workout.metric(), 20.0);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut workout = Workout::running("4", london(), 3.0, 20.0, 170, april_14());
        let before = workout.clone();
        workout.recompute();
        workout.recompute();
        assert_eq!(workout, before);
    }

    #[test]
    fn test_apply_rederives_metric() {
        let mut workout = Workout::running("5", london(), 5.0, 25.0, 180, april_14());
        workout.apply(10.0, 45.0, KindValue::Cadence(175));

        assert_eq!(workout.pace_min_per_km(), Some(4.5));
        assert_eq!(workout.cadence_spm(), Some(175));
        assert_eq!(workout.id(), "5");
        assert_eq!(workout.created_at(), april_14());
    }

    #[test]
    fn test_popup_text_and_class() {
        let workout = Workout::cycling("6", london(), 20.0, 60.0, 150.0, april_14());
        assert_eq!(workout.popup_text(), "🚴‍♀️ Cycling on April 14, 2026");
        assert_eq!(workout.kind().popup_class(), "cycling-popup");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("running".parse::<WorkoutKind>(), Ok(WorkoutKind::Running));
        assert_eq!(" Cycling ".parse::<WorkoutKind>(), Ok(WorkoutKind::Cycling));
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn test_coordinates_serialize_as_pair() {
        let json = serde_json::to_string(&london()).unwrap();
        assert_eq!(json, "[51.5,-0.1]");
        let back: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(back, london());
    }

    #[test]
    fn test_click_increments() {
        let mut workout = Workout::running("7", london(), 5.0, 25.0, 180, april_14());
        workout.click();
        workout.click();
        assert_eq!(workout.click_count(), 2);
    }
}
