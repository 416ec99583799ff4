use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::UserDetails;
use rollcall_shared::api::{USER_DETAILS, user_details_query};

use super::LOADING_TEXT;
use crate::api::{self, FetchError};
use crate::components::{CardLayout, UserDetailCard};
use crate::dom;
use crate::session::{PageSession, SectionGuard};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Idle,
    Loading,
    Found(Box<UserDetails>),
    Failed(String),
}

pub fn error_text(err: &FetchError) -> String {
    match err {
        FetchError::NotFound => "[오류] 유저를 찾을 수 없습니다".to_string(),
        other => format!("[오류] {other}"),
    }
}

/// Query box and result card of the main page.
#[derive(Clone, Copy)]
pub(crate) struct SearchStore {
    query: RwSignal<String>,
    result: RwSignal<SearchResult>,
    anchor: NodeRef<leptos::html::Section>,
    guard: SectionGuard,
}

impl SearchStore {
    pub fn new(session: PageSession) -> Self {
        Self {
            query: RwSignal::new(String::new()),
            result: RwSignal::new(SearchResult::Idle),
            anchor: NodeRef::new(),
            guard: SectionGuard::new(session),
        }
    }

    /// Look up `nickname`; the newest lookup wins.
    pub fn submit(&self, nickname: &str) {
        let nickname = nickname.trim().to_string();
        if nickname.is_empty() {
            self.result.set(SearchResult::Idle);
            return;
        }
        let Some(ticket) = self.guard.begin() else {
            return;
        };
        self.query.set(nickname.clone());
        self.result.set(SearchResult::Loading);

        let store = *self;
        spawn_local(async move {
            let result =
                api::get_json::<UserDetails>(USER_DETAILS, &user_details_query(&nickname)).await;
            if !store.guard.accepts(ticket) {
                return;
            }
            store.result.set(match result {
                Ok(details) => SearchResult::Found(Box::new(details)),
                Err(e) => {
                    api::log_failure("search", &e);
                    SearchResult::Failed(error_text(&e))
                }
            });
        });
    }

    /// Search for a clicked user and bring the card into view.
    pub fn open(&self, nickname: &str) {
        self.submit(nickname);
        if let Some(section) = self.anchor.get_untracked() {
            dom::scroll_into_view(&section);
        }
    }
}

#[component]
pub fn SearchSection(store: SearchStore) -> impl IntoView {
    let SearchStore {
        query,
        result,
        anchor,
        ..
    } = store;

    let on_keydown = move |e: web_sys::KeyboardEvent| {
        if e.key() == "Enter" {
            store.submit(&query.get_untracked());
        }
    };

    let body = move || match result.get() {
        SearchResult::Idle => ().into_any(),
        SearchResult::Loading => view! { <p class="status">{LOADING_TEXT}</p> }.into_any(),
        SearchResult::Failed(message) => view! { <p class="status error">{message}</p> }.into_any(),
        SearchResult::Found(details) => {
            view! { <UserDetailCard details=*details chart_id="search-chart" layout=CardLayout::Wide /> }
                .into_any()
        }
    };

    view! {
        <section class="search" node_ref=anchor>
            <h2>"유저 검색"</h2>
            <div class="search-bar">
                <input
                    type="text"
                    placeholder="닉네임"
                    prop:value=move || query.get()
                    on:input=move |e| query.set(event_target_value(&e))
                    on:keydown=on_keydown
                />
                <button on:click=move |_| store.submit(&query.get_untracked())>"검색"</button>
            </div>
            <div class="search-result">{body}</div>
        </section>
    }
}
