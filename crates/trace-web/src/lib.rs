pub mod audio;
pub mod painter;
pub mod runner;
pub mod share;
pub mod storage;

pub use runner::GameRunner;

use std::cell::{Cell, RefCell};

use wasm_bindgen::prelude::*;

use trace_engine::{GlyphTrace, InputEvent};

use audio::AudioBank;
use painter::CanvasPainter;
use storage::LocalStore;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<GlyphTrace>>> = RefCell::new(None);
    static PAINTER: RefCell<Option<CanvasPainter>> = RefCell::new(None);
    static AUDIO: RefCell<Option<AudioBank>> = RefCell::new(None);
    static VIEWPORT: Cell<(f32, f32)> = Cell::new((800.0, 600.0));
    static SHARE_URL: RefCell<String> = RefCell::new(String::new());
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner<GlyphTrace>) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Initialize the game from the shape source's JSON definition.
#[wasm_bindgen]
pub fn game_init(shape_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let game = GlyphTrace::from_json(shape_json);
    let runner = GameRunner::new(game, Box::new(LocalStore::new()));

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.init());
    log::info!("glyph-trace: initialized");
}

/// Bind the output canvas by element id.
#[wasm_bindgen]
pub fn game_attach_canvas(canvas_id: &str) -> Result<(), JsValue> {
    let painter = CanvasPainter::attach(canvas_id)?;
    PAINTER.with(|cell| {
        *cell.borrow_mut() = Some(painter);
    });
    Ok(())
}

/// Register the audio assets for the engine's sound cues.
#[wasm_bindgen]
pub fn game_load_sounds(success_url: &str, fail_url: &str, congrats_url: &str, encore_url: &str) {
    let bank = AudioBank::new(success_url, fail_url, congrats_url, encore_url);
    AUDIO.with(|cell| {
        *cell.borrow_mut() = Some(bank);
    });
}

/// URL carried by the share flow (the game's own address).
#[wasm_bindgen]
pub fn game_set_share_url(url: &str) {
    SHARE_URL.with(|cell| {
        *cell.borrow_mut() = url.to_string();
    });
}

/// Run one frame: update, rebuild the draw list, paint it, play sounds,
/// and service a pending frame capture at the very end — so the capture
/// always reflects a fully-painted frame.
#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));

    PAINTER.with(|cell| {
        if let Some(painter) = cell.borrow().as_ref() {
            let (w, h) = VIEWPORT.with(|v| v.get());
            with_runner(|r| painter.paint(r.draw_list(), w, h));
        }
    });

    AUDIO.with(|cell| {
        if let Some(bank) = cell.borrow().as_ref() {
            let cues = with_runner(|r| r.sounds().to_vec());
            for cue in cues {
                bank.play(cue);
            }
        }
    });

    if with_runner(|r| r.game().capture_pending()) {
        let score = with_runner(|r| {
            r.game_mut().clear_capture();
            r.game().accuracy()
        });
        let url = SHARE_URL.with(|cell| cell.borrow().clone());
        PAINTER.with(|cell| {
            if let Some(painter) = cell.borrow().as_ref() {
                share::capture_and_share(painter.canvas(), score, url);
            }
        });
    }
}

// ---- Input handlers ----

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32, t: f64) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, t }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32, t: f64) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y, t }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32, t: f64) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y, t }));
}

#[wasm_bindgen]
pub fn game_pointer_cancel() {
    with_runner(|r| r.push_input(InputEvent::PointerCancel));
}

#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    VIEWPORT.with(|v| v.set((width, height)));
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

/// Request a frame capture + share. Serviced at the end of the next tick.
#[wasm_bindgen]
pub fn game_request_share() {
    with_runner(|r| r.game_mut().request_capture());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}

#[wasm_bindgen]
pub fn get_accuracy() -> f32 {
    with_runner(|r| r.game().accuracy())
}

#[wasm_bindgen]
pub fn get_best_score() -> f32 {
    with_runner(|r| r.game().best_score())
}
