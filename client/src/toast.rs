use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::Generation;

use crate::animation::TOAST_MS;
use crate::dom;

pub const TITLE_COPIED: &str = "제목이 복사되었습니다.";
pub const URL_COPIED: &str = "URL이 복사되었습니다.";

#[derive(Clone, Copy)]
pub(crate) struct ToastStore {
    message: RwSignal<Option<String>>,
    generation: StoredValue<Generation>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            generation: StoredValue::new(Generation::default()),
        }
    }

    /// Show `text`; a newer toast restarts the timer.
    pub fn show(&self, text: impl Into<String>) {
        let Some(ticket) = self.generation.try_update_value(|g| g.advance()) else {
            return;
        };
        self.message.set(Some(text.into()));
        let store = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            let current = store
                .generation
                .try_with_value(|g| g.is_current(ticket))
                .unwrap_or(false);
            if current {
                store.message.set(None);
            }
        });
    }

    pub fn copy(&self, text: String, confirmation: String) {
        let store = *self;
        spawn_local(async move {
            match dom::copy_text(&text).await {
                Ok(()) => store.show(confirmation),
                Err(e) => web_sys::console::warn_1(&format!("[copy] {e}").into()),
            }
        });
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let store: ToastStore = expect_context();
    let message = store.message;

    view! {
        <div class="toast" class:visible=move || message.with(Option::is_some)>
            {move || message.get().unwrap_or_default()}
        </div>
    }
}
