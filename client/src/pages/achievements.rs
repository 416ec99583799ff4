use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::Achievement;
use rollcall_shared::api::ACHIEVEMENTS;

use super::{LOADING_TEXT, Loadable, status_line};
use crate::animation::entrance;
use crate::api;
use crate::components::DescriptionView;
use crate::session::{PageSession, SectionGuard};

const ACHIEVEMENTS_FAILED: &str = "도전과제를 불러오지 못했습니다.";

fn achievement_card(achievement: Achievement) -> impl IntoView {
    let icon = achievement.icon_url();
    let summary = achievement.achieved_summary();
    view! {
        <div class="achievement-card">
            <img class="achievement-icon" src=icon alt="" />
            <h3>{achievement.name}</h3>
            <DescriptionView description=achievement.description />
            <p class="achieved">{summary}</p>
        </div>
    }
}

#[component]
pub fn AchievementsPage(session: PageSession) -> impl IntoView {
    let achievements: RwSignal<Loadable<Vec<Achievement>>> = RwSignal::new(Loadable::Loading);
    let guard = SectionGuard::new(session);
    let entered = entrance();

    if let Some(ticket) = guard.begin() {
        spawn_local(async move {
            let result = api::get::<Vec<Achievement>>(ACHIEVEMENTS).await;
            if !guard.accepts(ticket) {
                return;
            }
            if let Err(e) = &result {
                api::log_failure("achievements", e);
            }
            achievements.set(Loadable::from_result(result, ACHIEVEMENTS_FAILED, |list| list));
        });
    }

    let grid = move || match achievements.get() {
        Loadable::Loading => status_line(LOADING_TEXT, false),
        Loadable::Failed(message) => status_line(message, true),
        Loadable::Ready(list) => view! {
            <div class="achievement-grid">
                {list.into_iter().map(achievement_card).collect_view()}
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="page achievements-page" class:entered=move || entered.get()>
            <h2>"도전과제"</h2>
            {grid}
        </div>
    }
}
