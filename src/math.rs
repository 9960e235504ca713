use crate::point::Point;

/// Ratio that keeps the growing curve inside the viewport.
///
/// Equals `1.0` while the rolling circle still has its initial radius and shrinks
/// towards zero as the rolling circle grows.
pub fn scale_factor(initial_radius: f64, inner_radius: f64, outer_radius: f64) -> f64 {
    (initial_radius + outer_radius) / (inner_radius + outer_radius)
}

/// Point at angle `t` on the curve traced by a circle of radius `inner` rolling
/// outside a fixed circle of radius `outer`
pub fn epicycloid(inner: f64, outer: f64, t: f64) -> Point {
    let sum = inner + outer;
    let ratio = sum / inner;
    Point::new(
        sum * t.cos() - inner * (ratio * t).cos(),
        sum * t.sin() - inner * (ratio * t).sin(),
    )
}

/// Point at angle `t` on the curve traced by a circle of radius `inner` rolling
/// inside a fixed circle of radius `outer`
pub fn hypocycloid(inner: f64, outer: f64, t: f64) -> Point {
    let difference = outer - inner;
    let ratio = difference / inner;
    Point::new(
        difference * t.cos() + inner * (ratio * t).cos(),
        difference * t.sin() - inner * (ratio * t).sin(),
    )
}

/// Angles `0, step, 2 * step, ...` strictly below `range`.
///
/// Angles are accumulated by repeated addition, so a step that does not divide the
/// range leaves the last sample short of it. Yields nothing for a step that is not
/// finite and positive.
pub fn sample_angles(range: f64, step: f64) -> impl Iterator<Item = f64> {
    let usable = step.is_finite() && step > 0.0;
    std::iter::successors(Some(0.0), move |t| Some(t + step))
        .take_while(move |t| usable && *t < range)
}

/// Scale followed by translation, mapping model space onto the screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translation: Point,
}

impl Transform {
    /// Scales by `scale` around an origin moved to the viewport center
    pub fn for_frame(scale: f64, width: f64, height: f64) -> Self {
        Transform {
            scale,
            translation: Point::new(width / 2.0 / scale, height / 2.0 / scale),
        }
    }

    pub fn scaling(scale: f64) -> Self {
        Transform {
            scale,
            translation: Point::ZERO,
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        (point + self.translation) * self.scale
    }

    pub fn scale_length(&self, length: f64) -> f64 {
        length * self.scale
    }
}
