use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::api::{RANKING_USERS, ranking_query};
use rollcall_shared::{RankingPage, RankingWindow};

use super::hidden_star::{HiddenStar, HiddenStarPanel};
use super::{LOADING_TEXT, Loadable, status_line};
use crate::api;
use crate::components::UserBox;
use crate::session::{PageSession, SectionGuard};

const RANKING_FAILED: &str = "랭킹 정보를 불러오지 못했습니다.";
const RANKING_EMPTY: &str = "현재 기간에 기록된 출석 정보가 없습니다.";
const RANKING_MAX_BADGES: usize = 3;

/// Load the ranking for `window`, then seed the hidden-star list with its
/// ids. Anything still in flight for an older window is dropped.
fn load_window(
    window: RankingWindow,
    guard: SectionGuard,
    ranking: RwSignal<Loadable<RankingPage>>,
    hidden: HiddenStar,
) {
    let Some(ticket) = guard.begin() else {
        return;
    };
    ranking.set(Loadable::Loading);
    hidden.clear();

    spawn_local(async move {
        let result = api::get_json::<RankingPage>(RANKING_USERS, &ranking_query(window)).await;
        if !guard.accepts(ticket) {
            return;
        }
        let ids: Vec<i64> = match &result {
            Ok(page) => page.user_ids().collect(),
            Err(e) => {
                api::log_failure("ranking", e);
                Vec::new()
            }
        };
        ranking.set(Loadable::from_result(result, RANKING_FAILED, |page| page));
        hidden.start(window.mode, ids);
    });
}

#[component]
pub fn RankingSection(session: PageSession) -> impl IntoView {
    let window = RwSignal::new(RankingWindow::default());
    let ranking: RwSignal<Loadable<RankingPage>> = RwSignal::new(Loadable::Loading);
    let hidden = HiddenStar::new(session);
    let guard = SectionGuard::new(session);

    Effect::new(move || {
        let current = window.get();
        load_window(current, guard, ranking, hidden);
    });

    let step_older = move |_| {
        if let Some(older) = window.get_untracked().older() {
            window.set(older);
        }
    };
    let step_newer = move |_| {
        if let Some(newer) = window.get_untracked().newer() {
            window.set(newer);
        }
    };

    let list = move || {
        let label = window.with(|w| w.mode.attendance_label());
        match ranking.get() {
            Loadable::Loading => status_line(LOADING_TEXT, false),
            Loadable::Failed(message) => status_line(message, true),
            Loadable::Ready(page) if page.users.is_empty() => status_line(RANKING_EMPTY, false),
            Loadable::Ready(page) => {
                let boxes = page
                    .ranked()
                    .map(|(rank, user)| {
                        view! {
                            <UserBox
                                user=user.clone()
                                rank=Some(rank)
                                attendance_label=label
                                max_badges=RANKING_MAX_BADGES
                            />
                        }
                    })
                    .collect_view();
                view! { <div class="user-list">{boxes}</div> }.into_any()
            }
        }
    };

    let period = move || {
        ranking
            .with(|r| r.ready().and_then(RankingPage::period_label))
            .unwrap_or_default()
    };

    view! {
        <div class="ranking-pair">
            <section class="ranking">
                <div class="section-head">
                    <button class="mode" on:click=move |_| window.update(|w| *w = w.cycle_mode())>
                        {move || window.get().mode.button_label()}
                    </button>
                    <div class="offset-controls">
                        <button disabled=move || !window.get().can_step_older() on:click=step_older>
                            "◀"
                        </button>
                        <span class="offset">{move || window.get().offset_label()}</span>
                        <button disabled=move || !window.get().can_step_newer() on:click=step_newer>
                            "▶"
                        </button>
                    </div>
                </div>
                <p class="period">{period}</p>
                {list}
            </section>
            <HiddenStarPanel store=hidden />
        </div>
    }
}
