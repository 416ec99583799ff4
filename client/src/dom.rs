use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use rollcall_shared::user::DEFAULT_PROFILE_IMG;

/// Attribute naming the user a box belongs to; clicking anywhere inside
/// the box opens that user's detail card.
pub const NICKNAME_ATTR: &str = "data-nickname";
/// Text copied when an element carrying it is clicked.
pub const COPY_ATTR: &str = "data-copy";
/// Toast shown after a successful copy.
pub const COPY_TOAST_ATTR: &str = "data-copy-toast";

/// Walk up from the event target to the nearest element carrying `attr`
/// and return the attribute value.
pub fn closest_attr(event: &web_sys::Event, attr: &str) -> Option<String> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let holder = target.closest(&format!("[{attr}]")).ok()??;
    holder.get_attribute(attr)
}

/// Swap a broken profile image for the default one.
pub fn fallback_avatar(event: &web_sys::Event) {
    let Some(image) = event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlImageElement>().ok())
    else {
        return;
    };
    if !image.src().ends_with(DEFAULT_PROFILE_IMG) {
        image.set_src(DEFAULT_PROFILE_IMG);
    }
}

pub fn location_hash() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default()
}

pub fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|window| window.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(800.0)
}

pub fn scroll_into_view(element: &web_sys::Element) {
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("clipboard error: {e:?}"))
}
