use leptos::prelude::*;

use rollcall_shared::Route;

use crate::config::{self, Settings};
use crate::router::Router;
use crate::session::NavGeneration;
use crate::theme::{self, ThemeStore};
use crate::toast::{Toast, ToastStore};

#[component]
pub fn App() -> impl IntoView {
    let settings = config::load();
    let redraw_debounce_ms = settings.redraw_debounce_ms;
    let theme_store = ThemeStore(RwSignal::new(theme::initial()));

    provide_context(Settings(settings));
    provide_context(theme_store);
    provide_context(NavGeneration::new());
    provide_context(ToastStore::new());

    theme::install(theme_store, redraw_debounce_ms);

    view! {
        <Header />
        <Router />
        <Toast />
    }
}

#[component]
fn Header() -> impl IntoView {
    let ThemeStore(theme) = expect_context();

    let links = Route::NAV
        .into_iter()
        .map(|route| view! { <a class="nav-link" href=route.href()>{route.nav_label()}</a> })
        .collect_view();

    view! {
        <header class="app-header">
            <nav class="nav">{links}</nav>
            <button class="theme-toggle" on:click=move |_| theme.update(|t| *t = t.toggled())>
                <span class="theme-icon">{move || theme.get().toggle_icon()}</span>
                <span class="theme-text">{move || theme.get().toggle_text()}</span>
            </button>
        </header>
    }
}
