//! Frame capture and sharing.
//!
//! The captured frame is encoded to a PNG blob and handed to the Web
//! Share API; when file sharing is unavailable the user gets a one-time
//! notice and a plain share link carrying the same text.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Blob, File, FilePropertyBag, HtmlCanvasElement, ShareData};

use trace_engine::share_text;

/// Capture the (already fully painted) canvas and run the share flow once
/// the blob is ready. The callback fires at most once per request.
pub fn capture_and_share(canvas: &HtmlCanvasElement, score: f32, game_url: String) {
    let text = share_text(score);
    let callback = Closure::wrap(Box::new(move |blob: Option<Blob>| {
        match blob {
            Some(blob) => share_blob(blob, &text, &game_url),
            None => log::warn!("frame capture produced no image"),
        }
    }) as Box<dyn FnMut(Option<Blob>)>);

    if canvas.to_blob(callback.as_ref().unchecked_ref()).is_err() {
        log::warn!("frame capture failed");
    }
    // The closure must outlive this call; it is invoked asynchronously.
    callback.forget();
}

fn share_blob(blob: Blob, text: &str, game_url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();

    let parts = js_sys::Array::new();
    parts.push(&blob);
    let options = FilePropertyBag::new();
    options.set_type("image/png");
    let file = match File::new_with_blob_sequence_and_options(&parts, "drawing.png", &options) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("could not build share file: {err:?}");
            return;
        }
    };

    let files = js_sys::Array::new();
    files.push(&file);
    let data = ShareData::new();
    data.set_title("My Glyph Trace score!");
    data.set_text(text);
    data.set_url(game_url);
    data.set_files(&files);

    if navigator.can_share_with_data(&data) {
        // Fire-and-forget; a rejected promise just means the user closed
        // the share sheet.
        let _ = navigator.share_with_data(&data);
    } else {
        let _ = window.alert_with_message(
            "Image sharing is not supported in this browser. A link to the game will be shared instead.",
        );
        let link = format!(
            "https://t.me/share/url?url={}&text={}",
            js_sys::encode_uri_component(game_url),
            js_sys::encode_uri_component(text),
        );
        let _ = window.open_with_url_and_target(&link, "_blank");
    }
}
