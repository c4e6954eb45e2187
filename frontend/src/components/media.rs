use gloo_console::log;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, HtmlMediaElement};

/// Starts playback; a refused autoplay is only logged.
pub fn play(media: &HtmlMediaElement) {
    match media.play() {
        Ok(promise) => spawn_local(async move {
            if JsFuture::from(promise).await.is_err() {
                log!("Autoplay prevented");
            }
        }),
        Err(_) => log!("Video could not start"),
    }
}

pub fn pause_and_rewind(media: &HtmlMediaElement) {
    let _ = media.pause();
    media.set_current_time(0.0);
}

/// Pauses every `<video>` matched by `selector`.
pub fn pause_all(selector: &str) {
    let Some(nodes) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all(selector).ok())
    else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(media) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlMediaElement>().ok()) {
            let _ = media.pause();
        }
    }
}
