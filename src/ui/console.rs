// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line-oriented console implementations of the view collaborators.
//!
//! Output goes to stdout; logs go to stderr. The form's field values live
//! in a shared [`ConsoleFormState`] so the command loop can type into it.

use crate::models::{Coordinates, WorkoutKind};
use crate::ui::{
    Dialogs, FormFields, FormView, Geolocation, GeolocationError, ListEntry, MapView,
    WorkoutListView,
};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// Form state shared between the console form and the command loop.
#[derive(Debug, Default)]
pub struct ConsoleFormState {
    pub fields: FormFields,
    pub visible: bool,
    pub kind_locked: bool,
}

pub type SharedFormState = Rc<RefCell<ConsoleFormState>>;

#[derive(Debug, Default)]
pub struct ConsoleMap;

impl MapView for ConsoleMap {
    fn center(&mut self, at: Coordinates, zoom: u8) {
        println!("map: centered on {} (zoom {})", at, zoom);
    }

    fn place_marker(&mut self, at: Coordinates, popup_text: &str, style_class: &str) {
        println!("map: marker at {} [{}] {}", at, style_class, popup_text);
    }

    fn clear_markers(&mut self) {
        println!("map: markers cleared");
    }

    fn pan_to(&mut self, at: Coordinates, zoom: u8, animated: bool) {
        let how = if animated { "panned" } else { "jumped" };
        println!("map: {} to {} (zoom {})", how, at, zoom);
    }
}

#[derive(Debug)]
pub struct ConsoleForm {
    state: SharedFormState,
}

impl ConsoleForm {
    pub fn new(state: SharedFormState) -> Self {
        Self { state }
    }
}

impl FormView for ConsoleForm {
    fn read_fields(&self) -> FormFields {
        self.state.borrow().fields.clone()
    }

    fn fill(&mut self, fields: &FormFields) {
        self.state.borrow_mut().fields = fields.clone();
    }

    fn show_kind_field(&mut self, kind: WorkoutKind) {
        let input = match kind {
            WorkoutKind::Running => "cadence",
            WorkoutKind::Cycling => "elevation",
        };
        println!("form: kind {} ({} input shown)", kind, input);
    }

    fn set_kind_locked(&mut self, locked: bool) {
        self.state.borrow_mut().kind_locked = locked;
    }

    fn clear(&mut self) {
        let mut state = self.state.borrow_mut();
        let kind = std::mem::take(&mut state.fields.kind);
        state.fields = FormFields {
            kind,
            ..FormFields::default()
        };
    }

    fn show(&mut self) {
        self.state.borrow_mut().visible = true;
        println!("form: open");
    }

    fn hide(&mut self) {
        self.state.borrow_mut().visible = false;
        println!("form: closed");
    }

    fn set_footer_year(&mut self, year: i32) {
        println!("© {} Mapty", year);
    }
}

#[derive(Debug, Default)]
pub struct ConsoleList;

impl WorkoutListView for ConsoleList {
    fn prepend(&mut self, entry: &ListEntry) {
        println!(
            "list: [{}] {} {} | {} km | {} min | {} {} | {} {}",
            entry.id,
            entry.emoji,
            entry.title,
            entry.distance_km,
            entry.duration_min,
            entry.metric,
            entry.metric_unit,
            entry.value,
            entry.value_unit
        );
    }

    fn clear(&mut self) {
        println!("list: cleared");
    }
}

#[derive(Debug, Default)]
pub struct ConsoleDialogs;

impl Dialogs for ConsoleDialogs {
    fn alert(&mut self, message: &str) {
        println!("alert: {}", message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// Reports a configured position, or fails if none is set.
#[derive(Debug, Clone)]
pub struct FixedGeolocation {
    position: Option<Coordinates>,
}

impl FixedGeolocation {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl Geolocation for FixedGeolocation {
    async fn request_position(&self) -> Result<Coordinates, GeolocationError> {
        self.position.ok_or_else(|| {
            GeolocationError::Unavailable("no home position configured".to_string())
        })
    }
}
