//! Container for the particle pools.
//!
//! Pool capacities and spawn rates match the visual design: pools top up a
//! few particles per frame until full, and expired particles are dropped
//! on tick.

use glam::Vec2;

use super::confetti::ConfettiParticle;
use super::fire::FireParticle;
use super::rng::Rng;

/// Maximum live fire particles.
pub const MAX_FIRE: usize = 100;
/// Maximum live confetti particles.
pub const MAX_CONFETTI: usize = 200;
/// Particles added per frame while a pool is below its cap.
const SPAWN_PER_TICK: usize = 5;

pub struct EffectsState {
    pub fire: Vec<FireParticle>,
    pub confetti: Vec<ConfettiParticle>,
    rng: Rng,
}

impl EffectsState {
    pub fn new(seed: u64) -> Self {
        EffectsState {
            fire: Vec::new(),
            confetti: Vec::new(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Top up the fire pool. Called each frame while the easter-egg
    /// background is active.
    pub fn spawn_fire(&mut self, viewport: Vec2) {
        if self.fire.len() < MAX_FIRE {
            for _ in 0..SPAWN_PER_TICK {
                self.fire.push(FireParticle::spawn(viewport, &mut self.rng));
            }
        }
    }

    /// Top up the confetti pool. Called each frame while the confetti
    /// window is open.
    pub fn spawn_confetti(&mut self, viewport: Vec2) {
        if self.confetti.len() < MAX_CONFETTI {
            for _ in 0..SPAWN_PER_TICK {
                self.confetti
                    .push(ConfettiParticle::spawn(viewport, &mut self.rng));
            }
        }
    }

    /// Advance both pools, dropping expired particles.
    pub fn tick(&mut self, dt: f32) {
        self.fire.retain_mut(|p| p.tick(dt));
        self.confetti.retain_mut(|p| p.tick(dt));
    }

    pub fn clear_fire(&mut self) {
        self.fire.clear();
    }

    pub fn clear_confetti(&mut self) {
        self.confetti.clear();
    }

    /// Clear all effects (restart).
    pub fn clear(&mut self) {
        self.fire.clear();
        self.confetti.clear();
    }
}
