//! Per-sample stroke styling: distance-to-color ramp and dwell-based width.

use crate::math::lerp;
use crate::render::color::Hsl;

/// Distance at or below which a sample counts as fully on-path.
pub const GOOD_DIST: f32 = 20.0;
/// Distance at or beyond which a sample counts as fully off-path.
pub const BAD_DIST: f32 = 70.0;

/// Two-stop hue ramp from green (on path) to red (off path). Constant
/// below [`GOOD_DIST`], constant at/above [`BAD_DIST`], linear between.
pub fn distance_to_color(dist: f32) -> Hsl {
    let t = ((dist - GOOD_DIST) / (BAD_DIST - GOOD_DIST)).clamp(0.0, 1.0);
    Hsl::new(lerp(120.0, 0.0, t), lerp(80.0, 85.0, t), lerp(55.0, 50.0, t))
}

/// Line width from dwell time: slower motion relative to distance traveled
/// yields a thicker stroke, modeling pressure/care. `dt_ms` is the time
/// since the previous pointer sample, `dist_px` the pixel distance moved.
pub fn stroke_width(dt_ms: f64, dist_px: f32) -> f32 {
    let dwell = (dt_ms.max(1.0) as f32) / (dist_px + 0.5);
    lerp(4.0, 18.0, (dwell * 0.25).clamp(0.0, 1.0)).clamp(3.0, 26.0)
}
