use leptos::prelude::*;

use super::calendar::CalendarSection;
use super::popular_music::PopularMusic;
use super::ranking::RankingSection;
use super::search::{SearchSection, SearchStore};
use crate::animation::entrance;
use crate::dom::{self, COPY_ATTR, COPY_TOAST_ATTR, NICKNAME_ATTR};
use crate::session::PageSession;
use crate::toast::{TITLE_COPIED, ToastStore};

#[component]
pub fn MainPage(session: PageSession) -> impl IntoView {
    let toast: ToastStore = expect_context();
    let search = SearchStore::new(session);
    let entered = entrance();

    // One listener for the whole page: copy buttons first, then any user box.
    let on_click = move |e: web_sys::MouseEvent| {
        if let Some(text) = dom::closest_attr(&e, COPY_ATTR) {
            let confirmation =
                dom::closest_attr(&e, COPY_TOAST_ATTR).unwrap_or_else(|| TITLE_COPIED.to_string());
            toast.copy(text, confirmation);
            return;
        }
        if let Some(nickname) = dom::closest_attr(&e, NICKNAME_ATTR) {
            search.open(&nickname);
        }
    };

    view! {
        <div class="page main-page" class:entered=move || entered.get() on:click=on_click>
            <RankingSection session />
            <PopularMusic session />
            <SearchSection store=search />
            <CalendarSection session />
        </div>
    }
}
