use crate::graphics::{Rgb, Surface};
use crate::point::Point;
use std::f64::consts::PI;

pub const STEP_MIN: f64 = PI;
pub const STEP_MAX: f64 = 42.0;
pub const STEP_DEFAULT: f64 = PI;

/// Keyboard ticks across the full range of a continuous slider
const CONTINUOUS_TICKS: f64 = 200.0;
/// Track length in logical units
pub const TRACK_LENGTH: f64 = 130.0;
const TRACK_COLOR: Rgb = Rgb(255, 255, 255);
const KNOB_COLOR: Rgb = Rgb(0, 0, 0);

/// Horizontal slider holding the angular step of the curves
#[derive(Clone, Debug, PartialEq)]
pub struct StepSlider {
    min: f64,
    max: f64,
    default: f64,
    value: f64,
    /// Zero means continuous
    granularity: f64,
    /// Left end of the track
    position: Point,
}

impl StepSlider {
    pub fn new(min: f64, max: f64, value: f64, granularity: f64) -> Self {
        let mut slider = StepSlider {
            min,
            max,
            default: value,
            value: min,
            granularity,
            position: Point::ZERO,
        };
        slider.set_value(value);
        slider.default = slider.value;
        slider
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Stores `value` clamped to the range and snapped to the granularity
    pub fn set_value(&mut self, value: f64) {
        let mut value = value.clamp(self.min, self.max);
        if self.granularity > 0.0 {
            let ticks = ((value - self.min) / self.granularity).round();
            value = (self.min + ticks * self.granularity).min(self.max);
        }
        self.value = value;
    }

    /// Moves the value by `ticks` keyboard steps
    pub fn nudge(&mut self, ticks: f64) {
        self.set_value(self.value + ticks * self.tick());
    }

    pub fn to_min(&mut self) {
        self.set_value(self.min);
    }

    pub fn to_max(&mut self) {
        self.set_value(self.max);
    }

    pub fn reset(&mut self) {
        self.value = self.default;
    }

    fn tick(&self) -> f64 {
        if self.granularity > 0.0 {
            self.granularity
        } else {
            (self.max - self.min) / CONTINUOUS_TICKS
        }
    }

    /// Position of the value along the track, from 0 to 1
    pub fn fraction(&self) -> f64 {
        if self.max > self.min {
            (self.value - self.min) / (self.max - self.min)
        } else {
            0.0
        }
    }

    /// Re-derives the on-screen anchor from the viewport size
    pub fn place(&mut self, width: f64, height: f64) {
        self.position = Point::new(width / 2.0, height / 1.3);
    }

    /// Paints the track and knob in screen space
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        let end = self.position + Point::new(TRACK_LENGTH, 0.0);
        surface.stroke(TRACK_COLOR);
        surface.stroke_weight(2.0);
        surface.line(self.position, end);

        let knob = self.position + Point::new(TRACK_LENGTH * self.fraction(), 0.0);
        surface.stroke(KNOB_COLOR);
        surface.stroke_weight(6.0);
        surface.line(knob + Point::new(0.0, -6.0), knob + Point::new(0.0, 6.0));
    }
}

impl Default for StepSlider {
    fn default() -> Self {
        StepSlider::new(STEP_MIN, STEP_MAX, STEP_DEFAULT, 0.0)
    }
}
