//! The glyph-tracing game: wires the sampler, coordinate mapper, stroke
//! tracker, outcome evaluator and render pass into a [`Game`].

use glam::Vec2;

use crate::api::game::{EngineContext, Game, GameConfig, RenderContext};
use crate::input::{InputEvent, InputQueue};
use crate::outcome::{self, Outcome};
use crate::render::color::Rgba;
use crate::render::draw::{DrawCmd, DrawList, Shadow, TextAlign, TextCmd};
use crate::render::effects::EffectsState;
use crate::render::phase::{self, BlinkPhase};
use crate::session::SessionState;
use crate::shape::sampler::TargetPath;
use crate::shape::source::ShapeDef;
use crate::shape::view::ViewTransform;
use crate::trace::tracker::{Attempt, StrokePoint, StrokeTracker};

const GAME_NAME: &str = "Glyph Trace";

/// Contextual message for a successful attempt, banded by score.
pub fn score_message(score: f32) -> &'static str {
    if outcome::is_easter_egg(score) {
        "\u{1f608}\u{1f608}\u{1f608}"
    } else if score < 50.0 {
        "Um... nope. \u{1f974}"
    } else if score < 65.0 {
        "Not bad! \u{1f44d}"
    } else if score < 75.0 {
        "Good! \u{2728}"
    } else if score < 90.0 {
        "Great! \u{1f60e}"
    } else {
        "Perfect! \u{1f3c6}"
    }
}

/// Share-text template selected by score band.
pub fn share_text(score: f32) -> String {
    let s = format!("{score:.1}");
    if score >= 95.0 {
        format!("\nPerfection! My new record is **{s}%** in {GAME_NAME}. Can anyone beat this? \u{1f3c6}")
    } else if score >= 90.0 {
        format!("\nI'm a master at {GAME_NAME}! Just scored **{s}%**. See if you can top that! \u{1f60e}")
    } else if score >= 75.0 {
        format!("\nGetting good at this! My score: **{s}%** in {GAME_NAME}. \u{2728}")
    } else if score >= 50.0 {
        format!("\nJust played {GAME_NAME} and got **{s}%**. It's addictive! \u{1f44d}")
    } else {
        format!("\nMy attempt at {GAME_NAME}... **{s}%**. I'll get better! \u{1f974}")
    }
}

pub struct GlyphTrace {
    shape: ShapeDef,
    path: TargetPath,
    flipped: bool,
    viewport: Vec2,
    view: ViewTransform,
    tracker: StrokeTracker,
    session: SessionState,
    /// Result of the last finished attempt; None while idle/drawing.
    outcome: Option<Outcome>,
    /// A frame capture was requested; overlays are suppressed until the
    /// host services it at the end of the frame.
    capture_pending: bool,
}

impl GlyphTrace {
    pub fn new(shape: ShapeDef) -> Self {
        let config = GameConfig::default();
        let viewport = Vec2::new(config.initial_width, config.initial_height);
        let view = ViewTransform::compute(viewport, shape.view_box);
        let path = TargetPath::from_shape(&shape, false);
        let tracker = StrokeTracker::new(path.len());
        GlyphTrace {
            shape,
            path,
            flipped: false,
            viewport,
            view,
            tracker,
            session: SessionState::default(),
            outcome: None,
            capture_pending: false,
        }
    }

    /// Build from the shape source's JSON definition. Malformed input
    /// degrades to an empty target path rather than failing.
    pub fn from_json(json: &str) -> Self {
        let shape = match ShapeDef::from_json(json) {
            Ok(shape) => shape,
            Err(err) => {
                log::warn!("bad shape definition ({err}); starting with an empty path");
                ShapeDef::empty()
            }
        };
        Self::new(shape)
    }

    pub fn state(&self) -> Attempt {
        self.tracker.state
    }

    pub fn accuracy(&self) -> f32 {
        self.tracker.accuracy()
    }

    pub fn best_score(&self) -> f32 {
        self.session.best_score
    }

    pub fn tries(&self) -> u32 {
        self.session.tries
    }

    pub fn request_capture(&mut self) {
        self.capture_pending = true;
    }

    pub fn capture_pending(&self) -> bool {
        self.capture_pending
    }

    pub fn clear_capture(&mut self) {
        self.capture_pending = false;
    }

    fn easter_egg_active(&self) -> bool {
        self.tracker.state == Attempt::Finished
            && matches!(self.outcome, Some(out) if out.easter_egg)
    }

    /// Atomic per-attempt reset, run on the tap that leaves the finished
    /// state. The restarting tap itself does not begin a stroke.
    fn restart(&mut self, ctx: &mut EngineContext) {
        self.session.record_try(&mut *ctx.store);
        let flipped = self.session.flipped();
        if flipped != self.flipped {
            self.flipped = flipped;
            self.path = TargetPath::from_shape(&self.shape, flipped);
        }
        self.session.begin_attempt();
        self.tracker.reset(self.path.len());
        self.outcome = None;
        self.capture_pending = false;
        ctx.effects.clear();
    }

    fn handle_event(&mut self, ctx: &mut EngineContext, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y, t } => {
                if self.tracker.state == Attempt::Finished {
                    self.restart(ctx);
                    return;
                }
                let p = StrokePoint { pos: Vec2::new(x, y), t };
                self.tracker.pointer_down(p, &self.path, &self.view);
            }
            InputEvent::PointerMove { x, y, t } => {
                let p = StrokePoint { pos: Vec2::new(x, y), t };
                self.tracker.pointer_move(p, &self.path, &self.view);
            }
            InputEvent::PointerUp { .. } => {
                if self.tracker.pointer_up() {
                    let out = outcome::evaluate(
                        self.tracker.accuracy(),
                        self.tracker.touched_endpoints(),
                        &mut self.session,
                        ctx,
                    );
                    self.outcome = Some(out);
                }
            }
            InputEvent::PointerCancel => self.tracker.pointer_cancel(),
            InputEvent::Resize { width, height } => {
                self.viewport = Vec2::new(width, height);
                self.view = ViewTransform::compute(self.viewport, self.shape.view_box);
            }
        }
    }

    fn draw_idle_hint(&self, list: &mut DrawList) {
        if !self.path.is_empty() {
            let points = self
                .path
                .samples()
                .iter()
                .map(|&p| self.view.to_screen(p))
                .collect();
            list.push(DrawCmd::Polyline {
                points,
                width: 2.0,
                color: Rgba::WHITE.with_alpha(0.08),
            });
        }
        list.text(TextCmd {
            text: "Tap or click to start tracing the glyph".to_string(),
            pos: Vec2::new(self.viewport.x / 2.0, self.viewport.y - 32.0),
            size: 16.0,
            weight: 600,
            color: Rgba::WHITE.with_alpha(0.6),
            align: TextAlign::Center,
            shadow: Some(Shadow::soft(6.0, 2.0)),
        });
    }

    fn draw_endpoint_markers(&self, list: &mut DrawList) {
        let (Some(start), Some(end)) = (self.path.start(), self.path.end()) else {
            return;
        };
        list.push(DrawCmd::CircleFill {
            center: self.view.to_screen(start),
            radius: 16.0,
            color: Rgba::rgb8(156, 163, 175),
        });
        list.push(DrawCmd::CircleStroke {
            center: self.view.to_screen(end),
            radius: 18.0,
            line_width: 4.0,
            color: Rgba::WHITE.with_alpha(0.9),
        });
    }

    fn draw_finished_overlay(&self, list: &mut DrawList, now: f64) {
        let Some(out) = self.outcome else {
            return;
        };
        let (w, h) = (self.viewport.x, self.viewport.y);
        let capture = self.capture_pending;

        let pct = if out.success {
            format!("{:.1}%", out.accuracy)
        } else {
            "XX.X%".to_string()
        };
        let shadow = if out.success && self.session.new_best {
            Shadow::glow(40.0, 3.0)
        } else {
            Shadow {
                color: Rgba::new(0.0, 0.0, 0.0, 0.85),
                blur: 10.0,
                offset: Vec2::new(0.0, 3.0),
            }
        };
        list.text(TextCmd {
            text: pct,
            // Captured frames put the score up top so the drawing stays visible.
            pos: Vec2::new(w / 2.0, if capture { 160.0 } else { h / 2.0 }),
            size: 64.0,
            weight: 800,
            color: if out.success {
                Rgba::WHITE.with_alpha(0.95)
            } else {
                Rgba::rgb8(239, 68, 68)
            },
            align: TextAlign::Center,
            shadow: Some(shadow),
        });

        if !capture {
            list.text(TextCmd {
                text: "Tap to try again".to_string(),
                pos: Vec2::new(w / 2.0, h / 2.0 + 40.0),
                size: 18.0,
                weight: 600,
                color: Rgba::WHITE.with_alpha(0.7),
                align: TextAlign::Center,
                shadow: Some(Shadow::soft(10.0, 2.0)),
            });
        }

        if !out.success {
            if !capture {
                list.text(TextCmd {
                    text: "Trace the full glyph".to_string(),
                    pos: Vec2::new(w / 2.0, h / 2.0 + 70.0),
                    size: 20.0,
                    weight: 700,
                    color: Rgba::rgb8(239, 68, 68),
                    align: TextAlign::Center,
                    shadow: Some(Shadow::soft(8.0, 2.0)),
                });
            }
        } else if self.session.new_best && !capture {
            let blink = phase::blink_phase(now, self.session.new_best_at);
            if blink != BlinkPhase::Off {
                list.text(TextCmd {
                    text: "New best score".to_string(),
                    pos: Vec2::new(w / 2.0, h / 2.0 + 70.0),
                    size: 22.0,
                    weight: 800,
                    color: Rgba::WHITE,
                    align: TextAlign::Center,
                    shadow: Some(Shadow::glow(40.0, 2.0)),
                });
            }
        }

        if out.success {
            list.text(TextCmd {
                text: score_message(out.accuracy).to_string(),
                pos: Vec2::new(w / 2.0, h - 40.0),
                size: 24.0,
                weight: 600,
                color: Rgba::WHITE.with_alpha(0.8),
                align: TextAlign::Center,
                shadow: Some(Shadow::soft(10.0, 2.0)),
            });
        }
    }

    fn draw_frame(&self, list: &mut DrawList, effects: &EffectsState, now: f64) {
        let (w, _h) = (self.viewport.x, self.viewport.y);

        if self.easter_egg_active() {
            for p in &effects.fire {
                list.push(DrawCmd::Glow {
                    center: p.pos,
                    radius: p.radius(),
                    color: p.color().to_rgba_with_alpha(p.alpha()),
                });
            }
        } else {
            list.push(DrawCmd::Background {
                top: Rgba::rgb8(15, 15, 20),
                bottom: Rgba::rgb8(20, 24, 32),
            });
        }

        if phase::confetti_active(now, self.session.confetti_started_at) {
            for p in &effects.confetti {
                list.push(DrawCmd::Quad {
                    center: p.pos,
                    size: p.size,
                    rotation_deg: p.rotation_deg,
                    color: p.color.to_rgba_with_alpha(p.alpha()),
                });
            }
        }

        let (origin, size) = self.view.frame_rect(self.shape.view_box);
        list.push(DrawCmd::DashedRect {
            origin,
            size,
            line_width: 2.0,
            dash: [16.0, 8.0],
            color: Rgba::new(0.5, 0.5, 0.5, 0.4),
        });

        if self.tracker.state == Attempt::Idle {
            self.draw_idle_hint(list);
        }

        self.draw_endpoint_markers(list);

        for seg in &self.tracker.segments {
            list.push(DrawCmd::Segment {
                from: seg.from.pos,
                to: seg.to.pos,
                width: seg.width,
                color: seg.color.to_rgba(),
            });
        }

        if self.tracker.state == Attempt::Drawing {
            list.text(TextCmd {
                text: format!("{:.1}%", self.tracker.accuracy()),
                pos: Vec2::new(16.0, 32.0),
                size: 20.0,
                weight: 700,
                color: Rgba::WHITE.with_alpha(0.9),
                align: TextAlign::Left,
                shadow: Some(Shadow::soft(10.0, 2.0)),
            });
        }

        if self.tracker.state == Attempt::Finished {
            self.draw_finished_overlay(list, now);
        }

        if !self.capture_pending {
            list.text(TextCmd {
                text: format!("Best {:.1}%", self.session.best_score),
                pos: Vec2::new(w - 16.0, 32.0),
                size: 16.0,
                weight: 700,
                color: Rgba::WHITE.with_alpha(0.9),
                align: TextAlign::Right,
                shadow: Some(Shadow::soft(6.0, 2.0)),
            });
        }
    }
}

impl Game for GlyphTrace {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.session = SessionState::load(&*ctx.store);
        self.flipped = self.session.flipped();
        self.path = TargetPath::from_shape(&self.shape, self.flipped);
        self.tracker = StrokeTracker::new(self.path.len());
        log::info!(
            "{GAME_NAME} ready: {} path samples, best {:.1}%",
            self.path.len(),
            self.session.best_score
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        for event in input.iter() {
            self.handle_event(ctx, *event);
        }

        if self.easter_egg_active() {
            ctx.effects.spawn_fire(self.viewport);
        } else if !ctx.effects.fire.is_empty() {
            ctx.effects.clear_fire();
        }
        if phase::confetti_active(ctx.now(), self.session.confetti_started_at) {
            ctx.effects.spawn_confetti(self.viewport);
        }
        ctx.effects.tick(dt);
    }

    fn render(&self, rc: &mut RenderContext) {
        self.draw_frame(rc.list, rc.effects, rc.now);
    }
}
