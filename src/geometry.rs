use std::f64::consts::TAU;

use druid::kurbo::{Arc, Circle};
use druid::{Point, Size, Vec2};

use crate::config::KnobConfig;

/// Sweep of an arc drawn clockwise from `start` to `end` (radians), the way a 2D canvas
/// `arc()` call resolves it: wrapped into one turn, with a full turn or more drawing the
/// whole circle.
pub fn clockwise_sweep(start: f64, end: f64) -> f64 {
    let delta = end - start;
    if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

/// Where the filled arc stops, in degrees. Never past the end of the sweep.
pub fn fill_end(angle: f64, start_angle: f64, max_angle: f64) -> f64 {
    (angle + start_angle).min(start_angle + max_angle)
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// KnobGeometry
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// Shapes of a knob laid out on a surface of a given size.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct KnobGeometry {
    pub center: Point,
    pub ring_radius: f64,
    pub indicator_radius: f64,
    pub dot_radius: f64,
}

impl KnobGeometry {
    pub fn new(size: Size, config: &KnobConfig) -> Self {
        Self {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            ring_radius: config.ring_radius,
            indicator_radius: config.indicator_radius,
            dot_radius: config.dot_radius,
        }
    }

    pub fn track_arc(&self, start_angle: f64, track_end: f64) -> Arc {
        self.ring_arc(start_angle, track_end)
    }

    pub fn fill_arc(&self, angle: f64, start_angle: f64, max_angle: f64) -> Arc {
        self.ring_arc(start_angle, fill_end(angle, start_angle, max_angle))
    }

    pub fn indicator_position(&self, angle: f64, start_angle: f64) -> Point {
        let theta = (angle + start_angle).to_radians();
        self.center + Vec2::from_angle(theta) * self.indicator_radius
    }

    pub fn indicator_dot(&self, angle: f64, start_angle: f64) -> Circle {
        Circle::new(self.indicator_position(angle, start_angle), self.dot_radius)
    }

    fn ring_arc(&self, from: f64, to: f64) -> Arc {
        let start = from.to_radians();
        Arc {
            center: self.center,
            radii: Vec2::new(self.ring_radius, self.ring_radius),
            start_angle: start,
            sweep_angle: clockwise_sweep(start, to.to_radians()),
            x_rotation: 0.0,
        }
    }
}
