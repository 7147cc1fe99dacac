///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use druid::{Data, Lens};

use dragging::DragSession;

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Modules
///
///////////////////////////////////////////////////////////////////////////////////////////////////
pub mod config;
pub mod context_menu;
pub mod dragging;
pub mod geometry;
pub mod knob;
pub mod model;

pub use config::KnobConfig;
pub use context_menu::ContextMenu;
pub use knob::Knob;
pub use model::KnobModel;

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// KnobParams
//
///////////////////////////////////////////////////////////////////////////////////////////////////
/// The values the embedding application hands to a [`Knob`].
///
/// Both angles are in degrees. `max_angle` is the length of the sweep and `start_angle`
/// the rotation it starts from, measured clockwise from the positive x axis.
#[derive(Clone, Copy, Data, Lens, PartialEq, Debug)]
pub struct KnobParams {
    pub max_angle: f64,
    pub start_angle: f64,
}

impl KnobParams {
    pub fn new(max_angle: f64, start_angle: f64) -> Self {
        Self {
            max_angle,
            start_angle,
        }
    }

    /// Returns a copy that is safe to do arithmetic with.
    pub fn sanitized(self) -> Self {
        let max_angle = if self.max_angle.is_finite() && self.max_angle >= 0.0 {
            self.max_angle
        } else {
            log::warn!("Invalid max angle {} passed to Knob, using 0", self.max_angle);
            0.0
        };

        let start_angle = if self.start_angle.is_finite() {
            self.start_angle
        } else {
            log::warn!("Invalid start angle {} passed to Knob, using 0", self.start_angle);
            0.0
        };

        Self {
            max_angle,
            start_angle,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// KnobState
//
///////////////////////////////////////////////////////////////////////////////////////////////////
#[derive(Clone, Copy, PartialEq, Data, Debug)]
pub enum KnobState {
    Idle,
    Dragging(DragSession),
}

impl Default for KnobState {
    fn default() -> Self {
        KnobState::Idle
    }
}
