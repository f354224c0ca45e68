//! The attempt state machine.
//!
//! Consumes pointer samples while an attempt is being drawn, accumulating
//! scoring state and the colored segment history the render pass paints.

use glam::Vec2;

use crate::render::color::Hsl;
use crate::shape::sampler::TargetPath;
use crate::shape::view::ViewTransform;
use crate::trace::scoring::ScoringState;
use crate::trace::style::{distance_to_color, stroke_width};

/// Screen-space radius within which a pointer sample touches an endpoint.
pub const ENDPOINT_RADIUS_PX: f32 = 28.0;
/// Minimum pixel travel for a stroke to count as movement.
const MOVEMENT_EPSILON_PX: f32 = 0.5;

/// Attempt lifecycle: `Idle -> Drawing -> Finished -> (restart) -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Waiting for the first pointer-down.
    Idle,
    /// An attempt is underway (the finger may be up between strokes).
    Drawing,
    /// The attempt ended; waiting for a restart tap.
    Finished,
}

/// A pointer sample: screen-space position plus millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub pos: Vec2,
    pub t: f64,
}

/// One rendered line piece of the stroke history. Coordinates stay in
/// screen space so the history remains a valid artifact across resizes.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSegment {
    pub from: StrokePoint,
    pub to: StrokePoint,
    pub width: f32,
    pub color: Hsl,
    pub dist: f32,
}

pub struct StrokeTracker {
    pub state: Attempt,
    pub segments: Vec<StrokeSegment>,
    pub scoring: ScoringState,
    /// Sticky within an attempt: once true, stays true until restart.
    pub hit_start: bool,
    pub hit_end: bool,
    last_point: Option<StrokePoint>,
    /// Finger currently down.
    stroke_active: bool,
    /// The current stroke moved more than the epsilon.
    has_movement: bool,
}

impl StrokeTracker {
    pub fn new(path_len: usize) -> Self {
        StrokeTracker {
            state: Attempt::Idle,
            segments: Vec::with_capacity(256),
            scoring: ScoringState::new(path_len),
            hit_start: false,
            hit_end: false,
            last_point: None,
            stroke_active: false,
            has_movement: false,
        }
    }

    /// Handle pointer down. Restart-from-finished is the game's job and
    /// happens before this is called; a down while finished is ignored.
    pub fn pointer_down(&mut self, p: StrokePoint, path: &TargetPath, view: &ViewTransform) {
        if self.state == Attempt::Finished {
            return;
        }
        if self.state == Attempt::Idle {
            self.state = Attempt::Drawing;
            self.hit_start = false;
            self.hit_end = false;
        }
        self.stroke_active = true;
        self.has_movement = false;
        self.last_point = Some(p);
        self.mark_endpoints(p.pos, path, view);
    }

    /// Handle pointer move. Ignored unless a stroke is active.
    pub fn pointer_move(&mut self, p: StrokePoint, path: &TargetPath, view: &ViewTransform) {
        if !self.stroke_active {
            return;
        }
        let Some(last) = self.last_point else {
            return;
        };

        let dt_ms = p.t - last.t;
        let dist_px = last.pos.distance(p.pos);
        if dist_px > MOVEMENT_EPSILON_PX {
            self.has_movement = true;
        }
        let width = stroke_width(dt_ms, dist_px);

        let shape_p = view.to_shape(p.pos);
        let (nearest_idx, dist) = match path.nearest(shape_p) {
            Some((idx, d)) => (Some(idx), d),
            None => (None, f32::INFINITY),
        };
        let color = distance_to_color(dist);
        self.scoring.record(dist, nearest_idx);

        self.segments.push(StrokeSegment {
            from: last,
            to: p,
            width,
            color,
            dist,
        });
        self.last_point = Some(p);
        self.mark_endpoints(p.pos, path, view);
    }

    /// Handle pointer up. Returns true exactly when the attempt
    /// transitions to Finished (a stroke was in progress and moved).
    pub fn pointer_up(&mut self) -> bool {
        self.stroke_active = false;
        self.last_point = None;
        if self.state == Attempt::Drawing && self.has_movement {
            self.state = Attempt::Finished;
            true
        } else {
            false
        }
    }

    /// Abort the current stroke without finishing. No state transition;
    /// the segment history is retained as-is.
    pub fn pointer_cancel(&mut self) {
        self.stroke_active = false;
        self.last_point = None;
    }

    /// Atomically zero all per-attempt state for a fresh attempt.
    pub fn reset(&mut self, path_len: usize) {
        self.state = Attempt::Idle;
        self.segments.clear();
        self.scoring.reset(path_len);
        self.hit_start = false;
        self.hit_end = false;
        self.last_point = None;
        self.stroke_active = false;
        self.has_movement = false;
    }

    /// Blended accuracy of the attempt so far, in [0, 100].
    pub fn accuracy(&self) -> f32 {
        self.scoring.accuracy()
    }

    /// Both endpoints touched.
    pub fn touched_endpoints(&self) -> bool {
        self.hit_start && self.hit_end
    }

    fn mark_endpoints(&mut self, screen: Vec2, path: &TargetPath, view: &ViewTransform) {
        let (Some(start), Some(end)) = (path.start(), path.end()) else {
            return;
        };
        let p = view.to_shape(screen);
        let r = view.px_to_shape(ENDPOINT_RADIUS_PX);
        let r2 = r * r;
        if p.distance_squared(start) <= r2 {
            self.hit_start = true;
        }
        if p.distance_squared(end) <= r2 {
            self.hit_end = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::source::ShapeDef;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn fixture() -> (TargetPath, ViewTransform) {
        let shape = ShapeDef {
            path: "M 100 300 L 700 300".to_string(),
            view_box: [0.0, 0.0, 800.0, 600.0],
        };
        let path = TargetPath::from_shape(&shape, false);
        let view = ViewTransform::compute(VIEWPORT, shape.view_box);
        (path, view)
    }

    fn at(view: &ViewTransform, x: f32, y: f32, t: f64) -> StrokePoint {
        StrokePoint {
            pos: view.to_screen(Vec2::new(x, y)),
            t,
        }
    }

    #[test]
    fn down_starts_attempt_and_marks_start_endpoint() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        assert_eq!(tracker.state, Attempt::Drawing);
        assert!(tracker.hit_start);
        assert!(!tracker.hit_end);
    }

    #[test]
    fn endpoint_flags_are_sticky() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        assert!(tracker.hit_start);
        // Wander far away — the flag must not clear.
        tracker.pointer_move(at(&view, 400.0, 100.0, 16.0), &path, &view);
        tracker.pointer_move(at(&view, 700.0, 300.0, 32.0), &path, &view);
        assert!(tracker.hit_start);
        assert!(tracker.hit_end);
    }

    #[test]
    fn moves_append_segments_and_score() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        for i in 1..=10 {
            tracker.pointer_move(at(&view, 100.0 + i as f32 * 60.0, 300.0, i as f64 * 16.0), &path, &view);
        }
        assert_eq!(tracker.segments.len(), 10);
        assert_eq!(tracker.scoring.total_samples(), 10);
        // On-path trace: accuracy should be well above zero.
        assert!(tracker.accuracy() > 0.0);
    }

    #[test]
    fn on_path_segments_are_green() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        tracker.pointer_move(at(&view, 300.0, 300.0, 16.0), &path, &view);
        assert_eq!(tracker.segments[0].color.h, 120.0);

        tracker.pointer_move(at(&view, 300.0, 50.0, 32.0), &path, &view);
        // 250 shape units off the path: fully red.
        assert_eq!(tracker.segments[1].color.h, 0.0);
    }

    #[test]
    fn move_before_down_is_ignored() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());
        tracker.pointer_move(at(&view, 400.0, 300.0, 0.0), &path, &view);
        assert!(tracker.segments.is_empty());
        assert_eq!(tracker.scoring.total_samples(), 0);
    }

    #[test]
    fn up_without_movement_discards_the_stroke() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        let finished = tracker.pointer_up();
        assert!(!finished);
        assert_eq!(tracker.state, Attempt::Drawing);
    }

    #[test]
    fn up_with_movement_finishes_once() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        tracker.pointer_move(at(&view, 400.0, 300.0, 16.0), &path, &view);
        assert!(tracker.pointer_up());
        assert_eq!(tracker.state, Attempt::Finished);
        // A second up must not report another transition.
        assert!(!tracker.pointer_up());
    }

    #[test]
    fn cancel_aborts_without_finishing() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        tracker.pointer_move(at(&view, 400.0, 300.0, 16.0), &path, &view);
        tracker.pointer_cancel();
        assert_eq!(tracker.state, Attempt::Drawing);
        // History retained as-is.
        assert_eq!(tracker.segments.len(), 1);
        // Further moves are ignored until the next down.
        tracker.pointer_move(at(&view, 500.0, 300.0, 32.0), &path, &view);
        assert_eq!(tracker.segments.len(), 1);
    }

    #[test]
    fn finished_ignores_further_input() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        tracker.pointer_move(at(&view, 400.0, 300.0, 16.0), &path, &view);
        tracker.pointer_up();

        tracker.pointer_down(at(&view, 700.0, 300.0, 48.0), &path, &view);
        assert_eq!(tracker.state, Attempt::Finished);
        assert!(!tracker.hit_end);
    }

    #[test]
    fn reset_zeroes_everything() {
        let (path, view) = fixture();
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(at(&view, 100.0, 300.0, 0.0), &path, &view);
        tracker.pointer_move(at(&view, 700.0, 300.0, 16.0), &path, &view);
        tracker.pointer_up();

        tracker.reset(path.len());
        assert_eq!(tracker.state, Attempt::Idle);
        assert!(tracker.segments.is_empty());
        assert_eq!(tracker.scoring.total_samples(), 0);
        assert!(!tracker.hit_start);
        assert!(!tracker.hit_end);
    }

    #[test]
    fn empty_path_scores_zero_and_never_hits_endpoints() {
        let path = TargetPath::empty();
        let view = ViewTransform::compute(VIEWPORT, [0.0, 0.0, 800.0, 600.0]);
        let mut tracker = StrokeTracker::new(path.len());

        tracker.pointer_down(StrokePoint { pos: Vec2::new(100.0, 100.0), t: 0.0 }, &path, &view);
        tracker.pointer_move(StrokePoint { pos: Vec2::new(200.0, 100.0), t: 16.0 }, &path, &view);
        assert_eq!(tracker.accuracy(), 0.0);
        assert!(!tracker.touched_endpoints());
        // The stroke itself still renders (fully red).
        assert_eq!(tracker.segments.len(), 1);
        assert_eq!(tracker.segments[0].color.h, 0.0);
    }
}
