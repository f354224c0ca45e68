//! Frame description and time-driven visual state.
//!
//! The engine never touches pixels: each frame the game builds a
//! [`draw::DrawList`] of typed commands and the host paints it. Particle
//! pools live here as explicit state (owned by the engine context), so
//! concurrent game instances — tests included — cannot interfere.

pub mod color;
pub mod confetti;
pub mod draw;
pub mod effects;
pub mod fire;
pub mod phase;
pub mod rng;

pub use color::{Hsl, Rgba};
pub use draw::{DrawCmd, DrawList};
pub use effects::EffectsState;
