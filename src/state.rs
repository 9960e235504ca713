use crate::math::scale_factor;
use crate::slider::StepSlider;

pub const OUTER_RADIUS: f64 = 100.0;
pub const INITIAL_RADIUS: f64 = 50.0;
pub const INCREMENT: f64 = 0.01;
pub const ANGULAR_RANGE: f64 = 300.0;

/// Numeric parameters of the morphing curve.
///
/// Only the rolling circle's radius changes after construction; it grows by
/// `increment` once per frame and is never reset.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    inner_radius: f64,
    outer_radius: f64,
    initial_radius: f64,
    increment: f64,
    angular_range: f64,
}

impl AnimationState {
    pub fn new(outer_radius: f64, initial_radius: f64, increment: f64, angular_range: f64) -> Self {
        AnimationState {
            inner_radius: initial_radius,
            outer_radius,
            initial_radius,
            increment,
            angular_range,
        }
    }

    /// Moves the rolling circle's radius forward by one frame
    pub fn advance(&mut self) {
        self.inner_radius += self.increment;
    }

    pub fn scale_factor(&self) -> f64 {
        scale_factor(self.initial_radius, self.inner_radius, self.outer_radius)
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn initial_radius(&self) -> f64 {
        self.initial_radius
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn angular_range(&self) -> f64 {
        self.angular_range
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        AnimationState::new(OUTER_RADIUS, INITIAL_RADIUS, INCREMENT, ANGULAR_RANGE)
    }
}

/// Application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// The morphing curve
    pub animation: AnimationState,
    /// Angular step control
    pub slider: StepSlider,
    /// Enable debug mode
    pub debug: bool,
    /// Simulation paused
    pub paused: bool,
}

impl AppState {
    pub fn new(animation: AnimationState, slider: StepSlider, debug: bool) -> Self {
        AppState {
            animation,
            slider,
            debug,
            paused: false,
        }
    }
}
