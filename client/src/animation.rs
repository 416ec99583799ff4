use leptos::prelude::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};

/// Mount fade-out before the page content is swapped.
pub const PAGE_FADE_MS: u32 = 200;

/// How long a toast stays on screen.
pub const TOAST_MS: u32 = 1_500;

/// Resolves on the next `requestAnimationFrame` tick (immediately when no
/// window is available).
pub async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .map(|window| window.request_animation_frame(&resolve).is_ok())
            .unwrap_or(false);
        if !scheduled {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Flag that flips to `true` one frame after the caller mounts, so CSS
/// transitions keyed on it play as an entrance animation.
pub fn entrance() -> RwSignal<bool> {
    let entered = RwSignal::new(false);
    spawn_local(async move {
        next_frame().await;
        entered.set(true);
    });
    entered
}
