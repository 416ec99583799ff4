use std::cell::RefCell;

use gloo_storage::Storage;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use rollcall_shared::Theme;
use rollcall_shared::theme::THEME_STORAGE_KEY;

use crate::charts;

/// Process-wide dark/light flag. Only the header toggle writes it.
#[derive(Clone, Copy)]
pub(crate) struct ThemeStore(pub RwSignal<Theme>);

thread_local! {
    static PENDING_REDRAW: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

/// Stored choice first, then `prefers-color-scheme`.
pub fn initial() -> Theme {
    let stored = gloo_storage::LocalStorage::raw()
        .get_item(THEME_STORAGE_KEY)
        .ok()
        .flatten();
    Theme::resolve(stored.as_deref(), prefers_dark())
}

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Mirror the flag onto the `dark` class of `<html>`.
pub fn apply(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    let _ = root.class_list().toggle_with_force("dark", theme.is_dark());
}

pub fn persist(theme: Theme) {
    if gloo_storage::LocalStorage::raw()
        .set_item(THEME_STORAGE_KEY, theme.as_str())
        .is_err()
    {
        web_sys::console::warn_1(&"[theme] localStorage write failed".into());
    }
}

/// Repaint every live chart with the new palette once toggling settles.
pub fn schedule_chart_redraw(theme: Theme, delay_ms: u32) {
    let timeout = Timeout::new(delay_ms, move || charts::redraw_all(theme));
    PENDING_REDRAW.with(|slot| {
        // Dropping the previous handle cancels it.
        slot.borrow_mut().replace(timeout);
    });
}

/// Keeps `<html>`, storage and charts in step with the store.
pub fn install(store: ThemeStore, redraw_debounce_ms: u32) {
    let ThemeStore(theme) = store;
    Effect::new(move |previous: Option<Theme>| {
        let current = theme.get();
        apply(current);
        if previous.is_some_and(|previous| previous != current) {
            persist(current);
            schedule_chart_redraw(current, redraw_debounce_ms);
        }
        current
    });
}
