//! Per-frame curve generation.
//!
//! Each frame samples an epicycloid and a hypocycloid that share the rolling
//! circle's current radius, joins consecutive samples with straight segments and
//! maps them onto the viewport with a [`Transform`] computed fresh from the scale
//! factor. The step label is drawn last, at a fixed screen offset from the slider.

use crate::graphics::{Rgb, Surface};
use crate::math::{epicycloid, hypocycloid, sample_angles, Transform};
use crate::point::Point;
use crate::state::AnimationState;

pub const BACKGROUND: Rgb = Rgb(236, 111, 24);
pub const CURVE_COLOR: Rgb = Rgb(158, 221, 248);
pub const LABEL_COLOR: Rgb = Rgb::BLACK;
/// On-screen stroke weight of the curves
const STROKE_WEIGHT: f64 = 2.0;
/// On-screen size of the step label
const LABEL_SIZE: f64 = 64.0;

/// Straight piece of one curve in model space, y pointing up
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Samples both curves for the current radius.
///
/// Segments alternate epicycloid then hypocycloid for every sampled angle after the
/// first. Returns nothing when `step` is not finite and positive.
pub fn trace(state: &AnimationState, step: f64) -> Vec<Segment> {
    let inner = state.inner_radius();
    let outer = state.outer_radius();
    let mut last_epicycloid = epicycloid(inner, outer, 0.0);
    let mut last_hypocycloid = hypocycloid(inner, outer, 0.0);
    let mut segments = Vec::new();

    for t in sample_angles(state.angular_range(), step) {
        let current_epicycloid = epicycloid(inner, outer, t);
        let current_hypocycloid = hypocycloid(inner, outer, t);
        if t > 0.0 {
            segments.push(Segment {
                from: last_epicycloid.flip_y(),
                to: current_epicycloid.flip_y(),
            });
            segments.push(Segment {
                from: last_hypocycloid.flip_y(),
                to: current_hypocycloid.flip_y(),
            });
        }
        last_epicycloid = current_epicycloid;
        last_hypocycloid = current_hypocycloid;
    }

    segments
}

/// Paints one frame without touching the animation state
pub fn paint<S: Surface>(state: &AnimationState, step: f64, label_anchor: Point, surface: &mut S) {
    let scale = state.scale_factor();

    surface.clear();
    surface.background(BACKGROUND);

    let transform = Transform::for_frame(scale, surface.width(), surface.height());
    surface.stroke(CURVE_COLOR);
    surface.stroke_weight(transform.scale_length(STROKE_WEIGHT / scale));
    for segment in trace(state, step) {
        surface.line(transform.apply(segment.from), transform.apply(segment.to));
    }

    let label = Transform::scaling(scale);
    let at = Point::new(
        label_anchor.x / scale,
        (label_anchor.y - surface.height() / 2.0) / scale,
    );
    surface.fill(LABEL_COLOR);
    surface.text_size(label.scale_length(LABEL_SIZE / scale));
    surface.text(&step.to_string(), label.apply(at));
}

/// Paints one frame, then grows the rolling circle
pub fn render_frame<S: Surface>(
    state: &mut AnimationState,
    step: f64,
    label_anchor: Point,
    surface: &mut S,
) {
    paint(state, step, label_anchor, surface);
    state.advance();
}
