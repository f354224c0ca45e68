use glam::Vec2;

/// Fixed horizontal padding excluded from the width fit, in pixels.
pub const H_PAD_PX: f32 = 24.0;
/// Fractional margin the fitted shape is shrunk by.
pub const FIT_MARGIN: f32 = 0.08;

/// Stateless bidirectional transform between screen pixels and shape-space.
///
/// Derived, never stored across resizes: recompute whenever the viewport
/// changes. `to_shape` and `to_screen` are exact inverses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl ViewTransform {
    /// Fit the shape's view box into the viewport: minimum of width fit
    /// (excluding the fixed horizontal padding) and height fit, shrunk by
    /// the margin, centered.
    pub fn compute(viewport: Vec2, view_box: [f32; 4]) -> Self {
        let [min_x, min_y, vb_w, vb_h] = view_box;
        let available_w = (viewport.x - H_PAD_PX * 2.0).max(0.0);
        let raw = (available_w / vb_w).min(viewport.y / vb_h) * (1.0 - FIT_MARGIN);
        // Degenerate viewports (zero/negative size) must not poison the
        // inverse mapping with NaN.
        let scale = if raw.is_finite() && raw > 0.0 { raw } else { 1e-6 };
        let draw = Vec2::new(vb_w, vb_h) * scale;
        let offset = (viewport - draw) * 0.5 - Vec2::new(min_x, min_y) * scale;
        Self { scale, offset }
    }

    pub fn to_shape(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }

    pub fn to_screen(&self, shape: Vec2) -> Vec2 {
        shape * self.scale + self.offset
    }

    /// Convert a pixel length (e.g. the endpoint hit radius) to shape units.
    pub fn px_to_shape(&self, px: f32) -> f32 {
        px / self.scale
    }

    /// Screen-space rectangle of the drawing area: `(origin, size)`.
    pub fn frame_rect(&self, view_box: [f32; 4]) -> (Vec2, Vec2) {
        let [min_x, min_y, vb_w, vb_h] = view_box;
        let origin = self.to_screen(Vec2::new(min_x, min_y));
        (origin, Vec2::new(vb_w, vb_h) * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VB: [f32; 4] = [0.0, 0.0, 1024.0, 605.0];

    #[test]
    fn round_trip_is_exact_inverse() {
        let view = ViewTransform::compute(Vec2::new(900.0, 700.0), VB);
        let p = Vec2::new(123.0, 456.0);
        let back = view.to_shape(view.to_screen(p));
        assert!(back.distance(p) < 1e-3);

        let s = Vec2::new(17.0, 333.0);
        let there = view.to_screen(view.to_shape(s));
        assert!(there.distance(s) < 1e-3);
    }

    #[test]
    fn fitted_shape_is_centered_with_margin() {
        let viewport = Vec2::new(900.0, 700.0);
        let view = ViewTransform::compute(viewport, VB);
        let (origin, size) = view.frame_rect(VB);

        // Fits inside the viewport with the margin applied.
        assert!(size.x <= viewport.x - H_PAD_PX * 2.0);
        assert!(size.y <= viewport.y);
        // Centered: symmetric slack on both axes.
        assert!((origin.x - (viewport.x - size.x) / 2.0).abs() < 1e-3);
        assert!((origin.y - (viewport.y - size.y) / 2.0).abs() < 1e-3);
    }

    #[test]
    fn width_fit_excludes_horizontal_padding() {
        // Tall viewport: width is the limiting dimension.
        let viewport = Vec2::new(500.0, 5000.0);
        let view = ViewTransform::compute(viewport, VB);
        let expected = (500.0 - H_PAD_PX * 2.0) / 1024.0 * (1.0 - FIT_MARGIN);
        assert!((view.scale - expected).abs() < 1e-5);
    }

    #[test]
    fn nonzero_view_box_origin_round_trips() {
        let vb = [-50.0, 20.0, 200.0, 100.0];
        let view = ViewTransform::compute(Vec2::new(800.0, 600.0), vb);
        let p = Vec2::new(-10.0, 60.0);
        assert!(view.to_shape(view.to_screen(p)).distance(p) < 1e-3);
    }

    #[test]
    fn degenerate_viewport_does_not_produce_nan() {
        let view = ViewTransform::compute(Vec2::ZERO, VB);
        let p = view.to_shape(Vec2::new(10.0, 10.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn px_to_shape_scales_by_inverse() {
        let view = ViewTransform::compute(Vec2::new(900.0, 700.0), VB);
        let r = view.px_to_shape(28.0);
        assert!((r * view.scale - 28.0).abs() < 1e-4);
    }
}
