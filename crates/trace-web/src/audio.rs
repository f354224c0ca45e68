//! HTML audio playback for the engine's sound cues.
//!
//! Fire-and-forget: cues restart from position zero if already playing,
//! and failures (e.g. autoplay policy) are logged, never surfaced.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlAudioElement;

use trace_engine::SoundCue;

pub struct AudioBank {
    success: Option<HtmlAudioElement>,
    fail: Option<HtmlAudioElement>,
    congrats: Option<HtmlAudioElement>,
    encore: Option<HtmlAudioElement>,
    /// Keeps the congrats -> encore chain callback alive.
    _chain: Option<Closure<dyn FnMut()>>,
    /// Reusable rejection logger for play() promises.
    on_error: Closure<dyn FnMut(JsValue)>,
}

fn load(url: &str, volume: f64) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(url) {
        Ok(el) => {
            el.set_volume(volume);
            Some(el)
        }
        Err(err) => {
            log::warn!("could not load audio {url}: {err:?}");
            None
        }
    }
}

impl AudioBank {
    pub fn new(success_url: &str, fail_url: &str, congrats_url: &str, encore_url: &str) -> Self {
        let mut bank = AudioBank {
            success: load(success_url, 0.5),
            fail: load(fail_url, 0.5),
            congrats: load(congrats_url, 1.0),
            encore: load(encore_url, 0.5),
            _chain: None,
            on_error: Closure::wrap(Box::new(|err: JsValue| {
                log::warn!("audio playback failed: {err:?}");
            }) as Box<dyn FnMut(JsValue)>),
        };

        // The encore cue follows the congratulations cue the moment it ends.
        if let (Some(congrats), Some(encore)) = (&bank.congrats, &bank.encore) {
            let encore = encore.clone();
            let chain = Closure::wrap(Box::new(move || {
                encore.set_current_time(0.0);
                let _ = encore.play();
            }) as Box<dyn FnMut()>);
            congrats.set_onended(Some(chain.as_ref().unchecked_ref()));
            bank._chain = Some(chain);
        }

        bank
    }

    pub fn play(&self, cue: SoundCue) {
        let element = match cue {
            SoundCue::Success => &self.success,
            SoundCue::Fail => &self.fail,
            SoundCue::Congrats => &self.congrats,
            SoundCue::Encore => &self.encore,
        };
        let Some(el) = element else { return };
        el.set_current_time(0.0);
        match el.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_error);
            }
            Err(err) => log::warn!("audio playback failed: {err:?}"),
        }
    }
}
