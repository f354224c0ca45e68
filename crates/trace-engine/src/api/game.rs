use crate::api::types::{GameEvent, SoundCue};
use crate::input::InputQueue;
use crate::render::draw::DrawList;
use crate::render::effects::EffectsState;
use crate::session::{KeyValueStore, MemoryStore};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Viewport width in pixels before the first resize event arrives.
    pub initial_width: f32,
    /// Viewport height in pixels before the first resize event arrives.
    pub initial_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_width: 800.0,
            initial_height: 600.0,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: load persisted session data, derive the target path.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Consumes pending input and advances effects.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);

    /// Read-only render pass: describe the frame as draw commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub effects: EffectsState,
    pub sounds: Vec<SoundCue>,
    pub events: Vec<GameEvent>,
    pub store: Box<dyn KeyValueStore>,
    /// Engine clock in seconds, accumulated from frame deltas.
    now: f64,
}

impl EngineContext {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            effects: EffectsState::new(42),
            sounds: Vec::new(),
            events: Vec::new(),
            store,
            now: 0.0,
        }
    }

    /// Current engine time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance the engine clock. Called once per tick by the runner.
    pub fn advance(&mut self, dt: f32) {
        self.now += dt as f64;
    }

    /// Emit a sound cue to be forwarded to the host shell.
    pub fn emit_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    /// Emit a game event to be forwarded to the host shell.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }
}

/// Read-only view of engine state for the render pass, plus the frame's
/// output draw list.
pub struct RenderContext<'a> {
    pub list: &'a mut DrawList,
    pub effects: &'a EffectsState,
    pub now: f64,
}
