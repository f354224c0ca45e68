//! Paints a frame's draw list onto a 2D canvas context.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use trace_engine::{DrawCmd, DrawList, Rgba, TextAlign, TextCmd};

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

fn css(color: Rgba) -> String {
    format!(
        "rgba({},{},{},{})",
        (color.r * 255.0).round() as u8,
        (color.g * 255.0).round() as u8,
        (color.b * 255.0).round() as u8,
        color.a
    )
}

fn font(weight: u16, size: f32) -> String {
    format!("{weight} {size}px ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell")
}

impl CanvasPainter {
    /// Look up the canvas by element id and grab its 2D context.
    pub fn attach(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Paint one frame. `w`/`h` are the viewport size in CSS pixels (the
    /// host owns device-pixel-ratio scaling).
    pub fn paint(&self, list: &DrawList, w: f32, h: f32) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");

        for cmd in list.iter() {
            match cmd {
                DrawCmd::Background { top, bottom } => {
                    let grd = ctx.create_linear_gradient(0.0, 0.0, 0.0, h as f64);
                    let _ = grd.add_color_stop(0.0, &css(*top));
                    let _ = grd.add_color_stop(1.0, &css(*bottom));
                    ctx.set_fill_style_canvas_gradient(&grd);
                    ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
                }
                DrawCmd::Glow { center, radius, color } => {
                    if *radius <= 0.0 {
                        continue;
                    }
                    ctx.save();
                    let _ = ctx.set_global_composite_operation("lighter");
                    let (cx, cy, r) = (center.x as f64, center.y as f64, *radius as f64);
                    if let Ok(grd) = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, r) {
                        let _ = grd.add_color_stop(0.0, &css(*color));
                        let _ = grd.add_color_stop(1.0, &css(color.with_alpha(0.0)));
                        ctx.set_fill_style_canvas_gradient(&grd);
                        ctx.begin_path();
                        let _ = ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU);
                        ctx.fill();
                    }
                    ctx.restore();
                }
                DrawCmd::Quad { center, size, rotation_deg, color } => {
                    ctx.save();
                    let _ = ctx.translate(center.x as f64, center.y as f64);
                    let _ = ctx.rotate((*rotation_deg as f64).to_radians());
                    ctx.set_global_alpha(color.a as f64);
                    ctx.set_fill_style_str(&css(color.with_alpha(1.0)));
                    let s = *size as f64;
                    ctx.fill_rect(-s / 2.0, -s / 2.0, s, s);
                    ctx.restore();
                }
                DrawCmd::DashedRect { origin, size, line_width, dash, color } => {
                    ctx.save();
                    ctx.set_line_width(*line_width as f64);
                    let segments = js_sys::Array::new();
                    segments.push(&JsValue::from_f64(dash[0] as f64));
                    segments.push(&JsValue::from_f64(dash[1] as f64));
                    let _ = ctx.set_line_dash(&segments);
                    ctx.set_stroke_style_str(&css(*color));
                    // Half-pixel alignment keeps the 2px dashes crisp.
                    ctx.stroke_rect(
                        (origin.x as f64).floor() + 0.5,
                        (origin.y as f64).floor() + 0.5,
                        (size.x as f64).floor(),
                        (size.y as f64).floor(),
                    );
                    ctx.restore();
                }
                DrawCmd::CircleFill { center, radius, color } => {
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.set_fill_style_str(&css(*color));
                    ctx.fill();
                }
                DrawCmd::CircleStroke { center, radius, line_width, color } => {
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.set_line_width(*line_width as f64);
                    ctx.set_stroke_style_str(&css(*color));
                    ctx.stroke();
                }
                DrawCmd::Polyline { points, width, color } => {
                    if points.len() < 2 {
                        continue;
                    }
                    ctx.begin_path();
                    ctx.move_to(points[0].x as f64, points[0].y as f64);
                    for p in &points[1..] {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.set_line_width(*width as f64);
                    ctx.set_stroke_style_str(&css(*color));
                    ctx.stroke();
                }
                DrawCmd::Segment { from, to, width, color } => {
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.set_line_width(*width as f64);
                    ctx.set_stroke_style_str(&css(*color));
                    ctx.stroke();
                }
                DrawCmd::Text(text) => self.paint_text(text),
            }
        }
    }

    fn paint_text(&self, cmd: &TextCmd) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_font(&font(cmd.weight, cmd.size));
        ctx.set_text_align(match cmd.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        if let Some(shadow) = &cmd.shadow {
            ctx.set_shadow_color(&css(shadow.color));
            ctx.set_shadow_blur(shadow.blur as f64);
            ctx.set_shadow_offset_x(shadow.offset.x as f64);
            ctx.set_shadow_offset_y(shadow.offset.y as f64);
        }
        ctx.set_fill_style_str(&css(cmd.color));
        let _ = ctx.fill_text(&cmd.text, cmd.pos.x as f64, cmd.pos.y as f64);
        ctx.restore();
    }
}
