//! Controller states.

use crate::models::Coordinates;

/// What the open form will do on submit.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    /// New workout at the clicked map position
    Create(Coordinates),
    /// Edit the workout with this id
    Edit(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    /// No open form. Also the resting state when geolocation failed.
    Idle,
    /// Waiting on the geolocation provider
    Locating,
    MapReady,
    FormOpen(FormMode),
}

impl ControllerState {
    pub fn is_form_open(&self) -> bool {
        matches!(self, ControllerState::FormOpen(_))
    }

    /// Id of the workout being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        match self {
            ControllerState::FormOpen(FormMode::Edit(id)) => Some(id),
            _ => None,
        }
    }
}
