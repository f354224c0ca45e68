//! Fire particle field shown for the easter-egg outcome.

use glam::Vec2;

use super::color::Hsl;
use super::rng::Rng;

/// A single flame: a rising, fading radial glow in warm hues.
#[derive(Debug, Clone)]
pub struct FireParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub hue: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl FireParticle {
    /// Spawn just below the bottom edge of the viewport.
    pub fn spawn(viewport: Vec2, rng: &mut Rng) -> Self {
        let lifetime = rng.range(50.0, 100.0) / 60.0;
        FireParticle {
            pos: Vec2::new(rng.range(0.0, viewport.x), viewport.y + rng.range(0.0, 50.0)),
            vel: Vec2::new(rng.range(-60.0, 60.0), -rng.range(120.0, 360.0)),
            size: rng.range(10.0, 30.0),
            hue: rng.range(0.0, 30.0),
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
        true
    }

    fn life_frac(&self) -> f32 {
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }

    /// Glow radius, shrinking as the particle burns out.
    pub fn radius(&self) -> f32 {
        self.size * self.life_frac()
    }

    pub fn alpha(&self) -> f32 {
        self.life_frac() * 0.8
    }

    pub fn color(&self) -> Hsl {
        Hsl::new(self.hue, 100.0, 50.0)
    }
}
