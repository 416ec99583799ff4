use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::PopularTrack;
use rollcall_shared::api::POPULAR_MUSIC;

use super::{LOADING_TEXT, Loadable, status_line};
use crate::api;
use crate::session::{PageSession, SectionGuard};
use crate::toast::TITLE_COPIED;

const MUSIC_FAILED: &str = "인기곡을 불러오지 못했습니다.";
const MUSIC_EMPTY: &str = "최근 7일간 재생된 곡이 없습니다.";

#[component]
pub fn PopularMusic(session: PageSession) -> impl IntoView {
    let tracks: RwSignal<Loadable<Vec<PopularTrack>>> = RwSignal::new(Loadable::Loading);
    let guard = SectionGuard::new(session);

    if let Some(ticket) = guard.begin() {
        spawn_local(async move {
            let result = api::get::<Vec<PopularTrack>>(POPULAR_MUSIC).await;
            if !guard.accepts(ticket) {
                return;
            }
            if let Err(e) = &result {
                api::log_failure("popular-music", e);
            }
            tracks.set(Loadable::from_result(result, MUSIC_FAILED, |tracks| tracks));
        });
    }

    // Clicks are handled by the page's delegated listener via `data-copy`.
    let body = move || match tracks.get() {
        Loadable::Loading => status_line(LOADING_TEXT, false),
        Loadable::Failed(message) => status_line(message, true),
        Loadable::Ready(list) if list.is_empty() => status_line(MUSIC_EMPTY, false),
        Loadable::Ready(list) => view! {
            <div class="track-grid">
                {list
                    .into_iter()
                    .enumerate()
                    .map(|(i, track)| {
                        let copy = track.title.clone();
                        view! {
                            <div
                                class="track-card"
                                data-copy=copy
                                data-copy-toast=TITLE_COPIED
                                title="클릭하여 제목 복사"
                            >
                                <span class="track-rank">{i + 1}</span>
                                <span class="track-title">{track.title}</span>
                                <span class="track-count">{format!("{}회 재생", track.count)}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
    };

    view! {
        <section class="popular-music">
            <h2>"최근 인기곡"</h2>
            {body}
        </section>
    }
}
