use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::api::{RANDOM_USERS, random_users_query};
use rollcall_shared::{HiddenStarOutcome, HiddenStarState, RankingMode, UserSummary};

use super::{LOADING_TEXT, status_line};
use crate::api;
use crate::components::UserBox;
use crate::session::{PageSession, SectionGuard};

const HIDDEN_FAILED: &str = "히든 스타를 불러오지 못했습니다.";
const HIDDEN_EMPTY: &str = "표시할 유저가 없습니다.";
const HIDDEN_MAX_BADGES: usize = 2;

/// Random users outside the current ranking. Owned by the ranking section,
/// which restarts it whenever its window changes.
#[derive(Clone, Copy)]
pub(crate) struct HiddenStar {
    state: RwSignal<HiddenStarState>,
    mode: RwSignal<RankingMode>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<&'static str>>,
    guard: SectionGuard,
}

impl HiddenStar {
    pub fn new(session: PageSession) -> Self {
        Self {
            state: RwSignal::new(HiddenStarState::default()),
            mode: RwSignal::new(RankingMode::default()),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            guard: SectionGuard::new(session),
        }
    }

    /// Drop the list and any request in flight; the ranking is reloading.
    pub fn clear(&self) {
        self.guard.begin();
        self.state.set(HiddenStarState::default());
        self.loading.set(true);
        self.error.set(None);
    }

    /// Fresh state for a loaded ranking, then the first sample.
    pub fn start(&self, mode: RankingMode, ranking_ids: Vec<i64>) {
        self.state.set(HiddenStarState::for_ranking(ranking_ids));
        self.mode.set(mode);
        self.refresh();
    }

    pub fn refresh(&self) {
        let exhausted = self
            .state
            .try_with_untracked(HiddenStarState::is_exhausted)
            .unwrap_or(true);
        if exhausted {
            return;
        }
        let Some(ticket) = self.guard.begin() else {
            return;
        };
        let excluded = self.state.with_untracked(HiddenStarState::exclusion);
        let mode = self.mode.get_untracked();
        self.loading.set(true);

        let store = *self;
        spawn_local(async move {
            let result =
                api::get_json::<Vec<UserSummary>>(RANDOM_USERS, &random_users_query(mode, &excluded)).await;
            if !store.guard.accepts(ticket) {
                return;
            }
            store.loading.set(false);
            match result {
                Ok(users) => {
                    store.error.set(None);
                    let mut outcome = HiddenStarOutcome::Replaced;
                    store.state.update(|state| outcome = state.apply(users));
                    if outcome == HiddenStarOutcome::Exhausted {
                        web_sys::console::info_1(&"[hidden-star] no users left".into());
                    }
                }
                Err(e) => {
                    api::log_failure("hidden-star", &e);
                    store.error.set(Some(HIDDEN_FAILED));
                }
            }
        });
    }
}

#[component]
pub fn HiddenStarPanel(store: HiddenStar) -> impl IntoView {
    let HiddenStar {
        state,
        mode,
        loading,
        error,
        ..
    } = store;

    let body = move || {
        if let Some(message) = error.get() {
            return status_line(message, true);
        }
        let users = state.with(|state| state.displayed().to_vec());
        if users.is_empty() {
            let message = if loading.get() { LOADING_TEXT } else { HIDDEN_EMPTY };
            return status_line(message, false);
        }
        let label = mode.get().attendance_label();
        view! {
            <div class="user-list">
                {users
                    .into_iter()
                    .map(|user| view! { <UserBox user rank=None attendance_label=label max_badges=HIDDEN_MAX_BADGES /> })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <section class="hidden-star">
            <div class="section-head">
                <h2>"히든 스타"</h2>
                <button
                    class="refresh"
                    disabled=move || state.with(HiddenStarState::is_exhausted) || loading.get()
                    on:click=move |_| store.refresh()
                >
                    {move || state.with(|state| state.refresh_label())}
                </button>
            </div>
            {body}
        </section>
    }
}
