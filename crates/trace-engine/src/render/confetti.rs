//! Confetti particles for the milestone celebration.

use glam::Vec2;

use super::color::Hsl;
use super::rng::Rng;

/// Downward acceleration in px/s^2.
const GRAVITY: f32 = 360.0;

/// A falling, spinning confetti square.
#[derive(Debug, Clone)]
pub struct ConfettiParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Hsl,
    pub rotation_deg: f32,
    pub rotation_speed: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl ConfettiParticle {
    /// Spawn above the top edge of the viewport.
    pub fn spawn(viewport: Vec2, rng: &mut Rng) -> Self {
        let lifetime = rng.range(100.0, 200.0) / 60.0;
        ConfettiParticle {
            pos: Vec2::new(rng.range(0.0, viewport.x), -rng.range(0.0, viewport.y * 0.5)),
            vel: Vec2::new(rng.range(-240.0, 240.0), rng.range(120.0, 420.0)),
            size: rng.range(5.0, 15.0),
            color: Hsl::new(rng.range(0.0, 360.0), 90.0, 65.0),
            rotation_deg: rng.range(0.0, 360.0),
            rotation_speed: rng.range(-300.0, 300.0),
            lifetime,
            max_lifetime: lifetime,
        }
    }

    /// Advance the particle. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }
        self.pos += self.vel * dt;
        self.vel.y += GRAVITY * dt;
        self.rotation_deg += self.rotation_speed * dt;
        true
    }

    pub fn alpha(&self) -> f32 {
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}
