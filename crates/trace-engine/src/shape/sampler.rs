//! Arc-length sampling of the target shape's vector outline.
//!
//! The sampled point set is the discrete proxy used for all nearest-point
//! queries while tracing, so it is produced once per shape/orientation and
//! never mutated afterwards.

use glam::Vec2;
use lyon::math::{point, vector, Angle};
use lyon::path::builder::SvgPathBuilder;
use lyon::path::iterator::PathIterator;
use lyon::path::{ArcFlags, Path, PathEvent};
use svgtypes::{PathParser, PathSegment};

use crate::shape::source::ShapeDef;

/// Lower bound on arc-length intervals.
pub const MIN_INTERVALS: usize = 800;
/// Upper bound on arc-length intervals. Bounds the cost of the brute-force
/// nearest-point query on every pointer move.
pub const MAX_INTERVALS: usize = 3000;

/// Curve flattening tolerance in shape units.
const FLATTEN_TOLERANCE: f32 = 0.1;

/// The target path: an ordered, arc-length-uniform sample sequence in
/// shape-space. First and last samples are the designated endpoints the
/// stroke must touch.
#[derive(Debug, Clone)]
pub struct TargetPath {
    samples: Vec<Vec2>,
}

impl TargetPath {
    /// A path with no samples. Every distance query fails, so any attempt
    /// scored against it ends in failure — the degraded mode for bad input.
    pub fn empty() -> Self {
        Self { samples: Vec::new() }
    }

    /// Sample the shape's outline. `flipped` reflects every sample (and
    /// therefore both endpoints) about the view box's vertical center.
    pub fn from_shape(shape: &ShapeDef, flipped: bool) -> Self {
        let Some(path) = parse_path_data(&shape.path) else {
            if !shape.path.trim().is_empty() {
                log::warn!("target shape path data did not parse; using an empty path");
            }
            return Self::empty();
        };

        let polyline = flatten(&path);
        let mut samples = resample_uniform(&polyline);
        if flipped {
            let cy = shape.center_y();
            for p in &mut samples {
                *p = reflect_y(*p, cy);
            }
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[Vec2] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample — the endpoint a stroke should start at.
    pub fn start(&self) -> Option<Vec2> {
        self.samples.first().copied()
    }

    /// Last sample — the endpoint a stroke should finish at.
    pub fn end(&self) -> Option<Vec2> {
        self.samples.last().copied()
    }

    /// Brute-force nearest sample to `p`. Returns `(index, distance)`.
    /// Linear scan is fine at the sample-count bound.
    pub fn nearest(&self, p: Vec2) -> Option<(usize, f32)> {
        let mut best = f32::MAX;
        let mut best_idx = 0;
        if self.samples.is_empty() {
            return None;
        }
        for (i, s) in self.samples.iter().enumerate() {
            let d2 = s.distance_squared(p);
            if d2 < best {
                best = d2;
                best_idx = i;
            }
        }
        Some((best_idx, best.sqrt()))
    }
}

/// Reflect a point about the horizontal line `y = center_y`.
/// Involutive: applying it twice reproduces the original point.
pub fn reflect_y(p: Vec2, center_y: f32) -> Vec2 {
    Vec2::new(p.x, 2.0 * center_y - p.y)
}

/// Parse SVG path data into a lyon path. Returns None for empty or
/// malformed data.
fn parse_path_data(d: &str) -> Option<Path> {
    if d.trim().is_empty() {
        return None;
    }

    let mut builder = Path::builder().with_svg();
    for segment in PathParser::from(d) {
        let segment = segment.ok()?;
        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                if abs {
                    builder.move_to(point(x as f32, y as f32));
                } else {
                    builder.relative_move_to(vector(x as f32, y as f32));
                }
            }
            PathSegment::LineTo { abs, x, y } => {
                if abs {
                    builder.line_to(point(x as f32, y as f32));
                } else {
                    builder.relative_line_to(vector(x as f32, y as f32));
                }
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                if abs {
                    builder.horizontal_line_to(x as f32);
                } else {
                    builder.relative_horizontal_line_to(x as f32);
                }
            }
            PathSegment::VerticalLineTo { abs, y } => {
                if abs {
                    builder.vertical_line_to(y as f32);
                } else {
                    builder.relative_vertical_line_to(y as f32);
                }
            }
            PathSegment::CurveTo { abs, x1, y1, x2, y2, x, y } => {
                if abs {
                    builder.cubic_bezier_to(
                        point(x1 as f32, y1 as f32),
                        point(x2 as f32, y2 as f32),
                        point(x as f32, y as f32),
                    );
                } else {
                    builder.relative_cubic_bezier_to(
                        vector(x1 as f32, y1 as f32),
                        vector(x2 as f32, y2 as f32),
                        vector(x as f32, y as f32),
                    );
                }
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                if abs {
                    builder.smooth_cubic_bezier_to(
                        point(x2 as f32, y2 as f32),
                        point(x as f32, y as f32),
                    );
                } else {
                    builder.smooth_relative_cubic_bezier_to(
                        vector(x2 as f32, y2 as f32),
                        vector(x as f32, y as f32),
                    );
                }
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                if abs {
                    builder.quadratic_bezier_to(
                        point(x1 as f32, y1 as f32),
                        point(x as f32, y as f32),
                    );
                } else {
                    builder.relative_quadratic_bezier_to(
                        vector(x1 as f32, y1 as f32),
                        vector(x as f32, y as f32),
                    );
                }
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                if abs {
                    builder.smooth_quadratic_bezier_to(point(x as f32, y as f32));
                } else {
                    builder.smooth_relative_quadratic_bezier_to(vector(x as f32, y as f32));
                }
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let radii = vector(rx as f32, ry as f32);
                let rotation = Angle::degrees(x_axis_rotation as f32);
                let flags = ArcFlags { large_arc, sweep };
                if abs {
                    builder.arc_to(radii, rotation, flags, point(x as f32, y as f32));
                } else {
                    builder.relative_arc_to(radii, rotation, flags, vector(x as f32, y as f32));
                }
            }
            PathSegment::ClosePath { abs: _ } => {
                builder.close();
            }
        }
    }

    Some(builder.build())
}

/// Flatten the path's curves into a polyline at a fixed tolerance.
fn flatten(path: &Path) -> Vec<Vec2> {
    let mut points = Vec::new();
    for event in path.iter().flattened(FLATTEN_TOLERANCE) {
        match event {
            PathEvent::Begin { at } => points.push(Vec2::new(at.x, at.y)),
            PathEvent::Line { to, .. } => points.push(Vec2::new(to.x, to.y)),
            PathEvent::End { first, close, .. } => {
                if close {
                    points.push(Vec2::new(first.x, first.y));
                }
            }
            _ => {}
        }
    }
    points
}

/// Resample a polyline at uniform arc-length spacing. The interval count
/// is proportional to total length, clamped to [MIN_INTERVALS,
/// MAX_INTERVALS]; output is intervals + 1 points, endpoints inclusive.
fn resample_uniform(polyline: &[Vec2]) -> Vec<Vec2> {
    if polyline.len() < 2 {
        return Vec::new();
    }

    let mut cumulative = Vec::with_capacity(polyline.len());
    cumulative.push(0.0f32);
    let mut total = 0.0f32;
    for w in polyline.windows(2) {
        total += w[0].distance(w[1]);
        cumulative.push(total);
    }
    if total <= 0.0 {
        return Vec::new();
    }

    let intervals = ((total / 2.0).floor() as usize).clamp(MIN_INTERVALS, MAX_INTERVALS);
    let mut out = Vec::with_capacity(intervals + 1);
    let mut seg = 0usize;
    for i in 0..=intervals {
        let target = total * i as f32 / intervals as f32;
        while seg < polyline.len() - 2 && cumulative[seg + 1] < target {
            seg += 1;
        }
        let seg_len = cumulative[seg + 1] - cumulative[seg];
        let t = if seg_len > 0.0 {
            ((target - cumulative[seg]) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(polyline[seg].lerp(polyline[seg + 1], t));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_shape() -> ShapeDef {
        ShapeDef {
            path: "M 0 0 L 100 0".to_string(),
            view_box: [0.0, 0.0, 100.0, 100.0],
        }
    }

    #[test]
    fn short_path_clamps_to_min_intervals() {
        let path = TargetPath::from_shape(&line_shape(), false);
        // length 100 -> floor(100/2) = 50, clamped up to 800 intervals
        assert_eq!(path.len(), MIN_INTERVALS + 1);
    }

    #[test]
    fn endpoints_are_first_and_last_samples() {
        let path = TargetPath::from_shape(&line_shape(), false);
        let start = path.start().unwrap();
        let end = path.end().unwrap();
        assert!(start.distance(Vec2::new(0.0, 0.0)) < 1e-3);
        assert!(end.distance(Vec2::new(100.0, 0.0)) < 1e-3);
    }

    #[test]
    fn samples_are_monotonic_in_arc_length() {
        let path = TargetPath::from_shape(&line_shape(), false);
        // On a straight horizontal line, arc-length order means x order.
        for w in path.samples().windows(2) {
            assert!(w[1].x >= w[0].x);
        }
    }

    #[test]
    fn sampling_is_uniform_in_arc_length_across_corners() {
        let shape = ShapeDef {
            path: "M 0 0 L 100 0 L 100 100".to_string(),
            view_box: [0.0, 0.0, 100.0, 100.0],
        };
        let path = TargetPath::from_shape(&shape, false);
        // Total length 200 over 800 intervals: sample i sits at arc length
        // i * 0.25, i.e. on the first leg until i = 400, then down the second.
        assert_eq!(path.len(), 801);
        let expected = |i: usize| {
            let s = i as f32 * 0.25;
            if s <= 100.0 {
                Vec2::new(s, 0.0)
            } else {
                Vec2::new(100.0, s - 100.0)
            }
        };
        for i in [0, 1, 200, 399, 400, 401, 600, 800] {
            let got = path.samples()[i];
            assert!(
                got.distance(expected(i)) < 1e-2,
                "sample {} at {:?}, expected {:?}",
                i,
                got,
                expected(i)
            );
        }
    }

    #[test]
    fn long_path_clamps_to_max_intervals() {
        let shape = ShapeDef {
            path: "M 0 0 L 10000 0".to_string(),
            view_box: [0.0, 0.0, 10000.0, 100.0],
        };
        let path = TargetPath::from_shape(&shape, false);
        assert_eq!(path.len(), MAX_INTERVALS + 1);
    }

    #[test]
    fn empty_and_malformed_paths_degrade_to_empty() {
        let mut shape = line_shape();
        shape.path = String::new();
        assert!(TargetPath::from_shape(&shape, false).is_empty());

        shape.path = "this is not path data".to_string();
        assert!(TargetPath::from_shape(&shape, false).is_empty());
    }

    #[test]
    fn flip_reflects_about_view_box_center() {
        let shape = ShapeDef {
            path: "M 0 10 L 100 10".to_string(),
            view_box: [0.0, 0.0, 100.0, 100.0],
        };
        let flipped = TargetPath::from_shape(&shape, true);
        // y = 10 reflected about center 50 lands at 90
        assert!((flipped.start().unwrap().y - 90.0).abs() < 1e-3);
    }

    #[test]
    fn reflect_y_is_involutive() {
        let p = Vec2::new(12.5, 77.3);
        let twice = reflect_y(reflect_y(p, 302.5), 302.5);
        assert!(twice.distance(p) < 1e-4);
    }

    #[test]
    fn nearest_returns_index_and_distance() {
        let path = TargetPath::from_shape(&line_shape(), false);
        let (idx, dist) = path.nearest(Vec2::new(50.0, 5.0)).unwrap();
        assert!((dist - 5.0).abs() < 0.1);
        // Near the middle of the sample range.
        assert!(idx > path.len() / 3 && idx < 2 * path.len() / 3);
    }

    #[test]
    fn nearest_on_empty_path_is_none() {
        assert!(TargetPath::empty().nearest(Vec2::ZERO).is_none());
    }
}
