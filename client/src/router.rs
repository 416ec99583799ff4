use std::cell::RefCell;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::{Route, Ticket};

use crate::animation::{PAGE_FADE_MS, next_frame};
use crate::dom;
use crate::pages;
use crate::session::{NavGeneration, PageSession};

struct HashChangeBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn(web_sys::Event)>,
}

thread_local! {
    static HASHCHANGE_BINDING: RefCell<Option<HashChangeBinding>> = const { RefCell::new(None) };
}

fn unbind_hashchange() {
    HASHCHANGE_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old.window.remove_event_listener_with_callback(
                "hashchange",
                old._handler.as_ref().unchecked_ref(),
            );
        }
    });
}

/// Owns the mount element. Every navigation fades the current page out,
/// swaps in the page for the new fragment and fades it in on the next
/// frame. A navigation overtaken by a newer one is abandoned wherever it
/// is in that sequence.
#[component]
pub fn Router() -> impl IntoView {
    let nav: NavGeneration = expect_context();
    let active: RwSignal<Option<(Route, Ticket)>> = RwSignal::new(None);
    let visible = RwSignal::new(false);

    let navigate = move || {
        let route = Route::from_hash(&dom::location_hash());
        let Some(ticket) = nav.advance() else {
            return;
        };
        spawn_local(async move {
            let had_page = active.with_untracked(Option::is_some);
            visible.set(false);
            if had_page {
                TimeoutFuture::new(PAGE_FADE_MS).await;
            }
            if !nav.is_current(ticket) {
                return;
            }
            active.set(Some((route, ticket)));
            next_frame().await;
            if nav.is_current(ticket) {
                visible.set(true);
            }
        });
    };

    Effect::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        unbind_hashchange();

        let handler = Closure::<dyn Fn(web_sys::Event)>::new(move |_: web_sys::Event| navigate());
        if window
            .add_event_listener_with_callback("hashchange", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            HASHCHANGE_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(HashChangeBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
        navigate();
    });
    on_cleanup(unbind_hashchange);

    let page = move || {
        let Some((route, ticket)) = active.get() else {
            return ().into_any();
        };
        match pages::render(route, PageSession::new(nav, ticket)) {
            Ok(view) => view,
            Err(e) => {
                web_sys::console::error_1(&format!("[router] {e}").into());
                view! { <p class="page-error">{pages::load_failure_message(&e)}</p> }.into_any()
            }
        }
    };

    view! {
        <div id="app-mount" class="page-mount" class:visible=move || visible.get()>
            {page}
        </div>
    }
}
