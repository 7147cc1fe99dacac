use druid::Data;

/// Where a drag started: the pointer's vertical window position and the angle at that
/// moment. Every move is measured against this origin, not the previous move.
#[derive(Clone, Copy, PartialEq, Data, Debug)]
pub struct DragSession {
    pub start_y: f64,
    pub start_angle: f64,
}

impl DragSession {
    pub fn new(start_y: f64, start_angle: f64) -> Self {
        Self {
            start_y,
            start_angle,
        }
    }

    /// Angle for a pointer at `y`. Moving up (smaller `y`) turns the knob clockwise.
    pub fn angle_at(&self, y: f64, sensitivity: f64, max_angle: f64) -> f64 {
        let delta_y = y - self.start_y;
        clamp_angle(self.start_angle - delta_y * sensitivity, max_angle)
    }
}

/// Clamps into `[0, max_angle]`. Tolerates a degenerate `max_angle` instead of panicking
/// like `f64::clamp` would.
pub fn clamp_angle(angle: f64, max_angle: f64) -> f64 {
    let max_angle = max_angle.max(0.0);
    if angle.is_nan() {
        return 0.0;
    }
    angle.max(0.0).min(max_angle)
}
