// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering and input collaborators consumed by the controller.
//!
//! Hosts implement these traits and deliver user events by calling the
//! controller's `handle_*` methods. The controller never reaches for a
//! global view; every collaborator is handed to it in [`Views`].

pub mod console;
pub mod entry;

pub use entry::ListEntry;

use crate::models::{Coordinates, Workout, WorkoutKind};
use std::future::Future;

/// Raw form values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Kind selector value (`running` / `cycling`)
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormFields {
    /// Values used to pre-fill the form when editing `workout`.
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            kind: workout.kind().as_str().to_string(),
            distance: workout.distance_km().to_string(),
            duration: workout.duration_min().to_string(),
            cadence: workout
                .cadence_spm()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            elevation: workout
                .elevation_gain_m()
                .map(|e| e.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Interactive map widget.
pub trait MapView {
    fn center(&mut self, at: Coordinates, zoom: u8);
    fn place_marker(&mut self, at: Coordinates, popup_text: &str, style_class: &str);
    fn clear_markers(&mut self);
    fn pan_to(&mut self, at: Coordinates, zoom: u8, animated: bool);
}

/// Workout entry form.
pub trait FormView {
    fn read_fields(&self) -> FormFields;
    fn fill(&mut self, fields: &FormFields);
    /// Show the input belonging to `kind` (cadence or elevation), hide the other.
    fn show_kind_field(&mut self, kind: WorkoutKind);
    fn set_kind_locked(&mut self, locked: bool);
    /// Empty the numeric inputs; the kind selection is kept.
    fn clear(&mut self);
    fn show(&mut self);
    fn hide(&mut self);
    fn set_footer_year(&mut self, year: i32);
}

/// Sidebar list of workouts, newest at the top.
pub trait WorkoutListView {
    fn prepend(&mut self, entry: &ListEntry);
    fn clear(&mut self);
}

/// Blocking user dialogs.
pub trait Dialogs {
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}

/// Position provider. Awaited once at startup; no retry.
pub trait Geolocation {
    fn request_position(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("permission denied")]
    Denied,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// All rendering collaborators, constructed once by the host.
pub struct Views {
    pub map: Box<dyn MapView>,
    pub form: Box<dyn FormView>,
    pub list: Box<dyn WorkoutListView>,
    pub dialogs: Box<dyn Dialogs>,
}

impl Views {
    /// Add one workout to the list and, if the map is up, as a marker.
    pub(crate) fn render_workout(&mut self, workout: &Workout, with_marker: bool) {
        if with_marker {
            self.map.place_marker(
                workout.coordinates(),
                &workout.popup_text(),
                workout.kind().popup_class(),
            );
        }
        self.list.prepend(&ListEntry::from(workout));
    }
}
