//! Display model for one workout in the sidebar list.

use crate::models::{KindValue, Workout, WorkoutKind};

/// Pre-formatted values for a list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: String,
    pub kind: WorkoutKind,
    pub title: String,
    pub emoji: &'static str,
    pub distance_km: String,
    pub duration_min: String,
    /// Pace or speed, one decimal place
    pub metric: String,
    pub metric_unit: &'static str,
    /// Cadence or elevation gain
    pub value: String,
    pub value_unit: &'static str,
}

impl From<&Workout> for ListEntry {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        let value = match workout.value() {
            KindValue::Cadence(c) => c.to_string(),
            KindValue::Elevation(e) => e.to_string(),
        };

        Self {
            id: workout.id().to_string(),
            kind,
            title: workout.description().to_string(),
            emoji: kind.emoji(),
            distance_km: workout.distance_km().to_string(),
            duration_min: workout.duration_min().to_string(),
            metric: format!("{:.1}", workout.metric()),
            metric_unit: kind.metric_unit(),
            value,
            value_unit: kind.value_unit(),
        }
    }
}
