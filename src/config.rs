///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use druid::{Color, Data, Lens, Size};
use druid_color_thesaurus::{gray, white};

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Defaults
///
///////////////////////////////////////////////////////////////////////////////////////////////////
pub const SURFACE_SIZE: f64 = 35.0;
pub const RING_RADIUS: f64 = 14.0;
pub const INDICATOR_RADIUS: f64 = 6.0;
pub const DOT_RADIUS: f64 = 1.25;
pub const TRACK_WIDTH: f64 = 2.5;
pub const FILL_WIDTH: f64 = 1.5;
/// Where the background track ends, in degrees (2.25 turns of pi).
pub const TRACK_END: f64 = 405.0;
/// Angle units per pixel of vertical drag.
pub const DRAG_SENSITIVITY: f64 = 16.0;
pub const RESET_ANGLE: f64 = 150.0;

pub const TRACK_COLOR: Color = Color::rgb8(0x12, 0x12, 0x12);
pub const ACCENT_COLOR: Color = Color::rgb8(0x22, 0xC5, 0x5E);

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// KnobConfig
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// Everything about a knob that stays fixed for the widget's lifetime.
#[derive(Clone, Data, Lens, PartialEq, Debug)]
pub struct KnobConfig {
    pub surface_size: f64,
    pub ring_radius: f64,
    pub indicator_radius: f64,
    pub dot_radius: f64,
    pub track_width: f64,
    pub fill_width: f64,
    pub track_end: f64,
    pub sensitivity: f64,
    pub reset_angle: f64,
    pub track_color: Color,
    pub accent_color: Color,
    pub menu_size: Size,
    pub menu_background: Color,
    pub menu_text_color: Color,
}

impl KnobConfig {
    pub fn new() -> Self {
        Self {
            surface_size: SURFACE_SIZE,
            ring_radius: RING_RADIUS,
            indicator_radius: INDICATOR_RADIUS,
            dot_radius: DOT_RADIUS,
            track_width: TRACK_WIDTH,
            fill_width: FILL_WIDTH,
            track_end: TRACK_END,
            sensitivity: DRAG_SENSITIVITY,
            reset_angle: RESET_ANGLE,
            track_color: TRACK_COLOR,
            accent_color: ACCENT_COLOR,
            menu_size: Size::new(56.0, 22.0),
            menu_background: gray::OUTER_SPACE,
            menu_text_color: white::ALABASTER,
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        if sensitivity.is_finite() {
            self.sensitivity = sensitivity;
        } else {
            log::warn!("Ignoring non-finite knob sensitivity {}", sensitivity);
        }
        self
    }

    pub fn with_reset_angle(mut self, reset_angle: f64) -> Self {
        if reset_angle.is_finite() {
            self.reset_angle = reset_angle;
        } else {
            log::warn!("Ignoring non-finite knob reset angle {}", reset_angle);
        }
        self
    }

    pub fn with_colors(mut self, track_color: Color, accent_color: Color) -> Self {
        self.track_color = track_color;
        self.accent_color = accent_color;
        self
    }
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self::new()
    }
}
