use trace_engine::{
    DrawList, EngineContext, Game, InputEvent, InputQueue, KeyValueStore, RenderContext, SoundCue,
};

/// Generic game runner that wires up the engine loop.
///
/// The concrete game lives in a `thread_local!` GameRunner behind free
/// functions exported via `#[wasm_bindgen]`, because wasm-bindgen cannot
/// export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    draw_list: DrawList,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            game,
            ctx: EngineContext::new(store),
            input: InputQueue::new(),
            draw_list: DrawList::new(),
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        let config = self.game.config();
        // Seed the viewport so the first frames are sane even if the host's
        // resize notification lags behind.
        self.input.push(InputEvent::Resize {
            width: config.initial_width,
            height: config.initial_height,
        });
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: update game state from pending input, then
    /// rebuild the frame's draw list. Input is fully consumed before the
    /// render pass reads state.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.advance(dt);

        self.game.update(&mut self.ctx, &self.input, dt);
        self.input.drain();

        self.draw_list.clear();
        let mut rc = RenderContext {
            list: &mut self.draw_list,
            effects: &self.ctx.effects,
            now: self.ctx.now(),
        };
        self.game.render(&mut rc);
    }

    /// The most recent frame's draw commands.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Sound cues emitted by the last tick.
    pub fn sounds(&self) -> &[SoundCue] {
        &self.ctx.sounds
    }

    // ---- Game-event accessors for host reads ----

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }
}
