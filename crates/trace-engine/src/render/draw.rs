//! Typed draw commands.
//!
//! `Game::render` describes each frame as an ordered command list; the
//! host's painter consumes it. Keeping the boundary as data makes the
//! whole render pass assertable in native tests.

use glam::Vec2;

use super::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Drop shadow applied to a text command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f32,
    pub offset: Vec2,
}

impl Shadow {
    pub fn soft(blur: f32, offset_y: f32) -> Self {
        Self {
            color: Rgba::new(0.0, 0.0, 0.0, 0.8),
            blur,
            offset: Vec2::new(0.0, offset_y),
        }
    }

    /// White glow used by the new-best highlight.
    pub fn glow(blur: f32, offset_y: f32) -> Self {
        Self {
            color: Rgba::new(1.0, 1.0, 1.0, 0.9),
            blur,
            offset: Vec2::new(0.0, offset_y),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub pos: Vec2,
    /// Font size in pixels.
    pub size: f32,
    /// CSS font weight (400/600/700/800).
    pub weight: u16,
    pub color: Rgba,
    pub align: TextAlign,
    pub shadow: Option<Shadow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Full-viewport vertical gradient.
    Background { top: Rgba, bottom: Rgba },
    /// Additively-blended radial glow (fire particles).
    Glow { center: Vec2, radius: f32, color: Rgba },
    /// Rotated filled square (confetti particles).
    Quad {
        center: Vec2,
        size: f32,
        rotation_deg: f32,
        color: Rgba,
    },
    /// Dashed rectangle outline (drawing-area border).
    DashedRect {
        origin: Vec2,
        size: Vec2,
        line_width: f32,
        dash: [f32; 2],
        color: Rgba,
    },
    CircleFill { center: Vec2, radius: f32, color: Rgba },
    CircleStroke {
        center: Vec2,
        radius: f32,
        line_width: f32,
        color: Rgba,
    },
    /// Open polyline (ghost hint of the target path).
    Polyline {
        points: Vec<Vec2>,
        width: f32,
        color: Rgba,
    },
    /// One stroke segment, round caps.
    Segment {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    Text(TextCmd),
}

/// Ordered list of draw commands for one frame. Painted front-to-back in
/// push order.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self { cmds: Vec::with_capacity(256) }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn text(&mut self, cmd: TextCmd) {
        self.cmds.push(DrawCmd::Text(cmd));
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Test helper: all text contents in order.
    pub fn texts(&self) -> Vec<&str> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_order_is_paint_order() {
        let mut list = DrawList::new();
        list.push(DrawCmd::Background {
            top: Rgba::rgb(0.0, 0.0, 0.0),
            bottom: Rgba::rgb(0.1, 0.1, 0.1),
        });
        list.push(DrawCmd::CircleFill {
            center: Vec2::ZERO,
            radius: 4.0,
            color: Rgba::WHITE,
        });
        let kinds: Vec<_> = list.iter().collect();
        assert!(matches!(kinds[0], DrawCmd::Background { .. }));
        assert!(matches!(kinds[1], DrawCmd::CircleFill { .. }));
    }

    #[test]
    fn texts_collects_in_order() {
        let mut list = DrawList::new();
        for s in ["a", "b"] {
            list.text(TextCmd {
                text: s.to_string(),
                pos: Vec2::ZERO,
                size: 16.0,
                weight: 600,
                color: Rgba::WHITE,
                align: TextAlign::Left,
                shadow: None,
            });
        }
        assert_eq!(list.texts(), vec!["a", "b"]);
    }
}
