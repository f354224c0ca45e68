pub mod api;
pub mod input;
pub mod math;
pub mod outcome;
pub mod render;
pub mod session;
pub mod shape;
pub mod trace;

mod game;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig, RenderContext};
pub use api::types::{GameEvent, SoundCue};
pub use game::{score_message, share_text, GlyphTrace};
pub use input::{InputEvent, InputQueue};
pub use render::color::{Hsl, Rgba};
pub use render::draw::{DrawCmd, DrawList, Shadow, TextAlign, TextCmd};
pub use render::effects::EffectsState;
pub use session::{KeyValueStore, MemoryStore, SessionState};
pub use shape::sampler::TargetPath;
pub use shape::source::ShapeDef;
pub use shape::view::ViewTransform;
pub use trace::tracker::{Attempt, StrokePoint, StrokeSegment, StrokeTracker};
