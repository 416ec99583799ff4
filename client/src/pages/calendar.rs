use chrono::Local;
use futures::future::join;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::api::{DATE_MUSIC, DATE_PARTICIPANTS, date_query};
use rollcall_shared::day::{NO_MUSIC, NO_PARTICIPANTS};
use rollcall_shared::format::{is_iso_date, previous_day_iso};
use rollcall_shared::user::DEFAULT_PROFILE_IMG;
use rollcall_shared::{DayMusic, DayParticipant, ParticipantRoster};

use super::{LOADING_TEXT, Loadable, status_line};
use crate::api;
use crate::config::Settings;
use crate::dom;
use crate::session::{PageSession, SectionGuard};
use crate::toast::{TITLE_COPIED, URL_COPIED};

const PARTICIPANTS_FAILED: &str = "참여자 정보를 불러오지 못했습니다.";
const MUSIC_FAILED: &str = "음악 기록을 불러오지 못했습니다.";

fn participant_box(participant: DayParticipant) -> impl IntoView {
    let img = if participant.img.is_empty() {
        DEFAULT_PROFILE_IMG.to_string()
    } else {
        participant.img.clone()
    };
    let comment = participant.comment_or_default().to_string();
    let stats = format!(
        "누적 {}회 / 체류 {}분",
        participant.total_count, participant.duration
    );
    let nickname = participant.nickname;
    let data_nickname = nickname.clone();

    view! {
        <div class="participant" data-nickname=data_nickname>
            <img class="avatar" src=img alt="" on:error=|e| dom::fallback_avatar(&e) />
            <div class="user-meta">
                <div class="nickname">{nickname}</div>
                <div class="comment">{comment}</div>
                <div class="count">{stats}</div>
            </div>
        </div>
    }
}

fn music_row(play: DayMusic) -> impl IntoView {
    let title = play.title.clone();
    view! {
        <div class="music-row">
            <span class="played-at">{play.played_at}</span>
            <span class="music-title">{play.title}</span>
            <span class="music-user">{play.user}</span>
            <span class="music-actions">
                <button data-copy=title data-copy-toast=TITLE_COPIED>"제목 복사"</button>
                {play.url.map(|url| view! {
                    <button data-copy=url data-copy-toast=URL_COPIED>"URL 복사"</button>
                })}
            </span>
        </div>
    }
}

#[component]
pub fn CalendarSection(session: PageSession) -> impl IntoView {
    let Settings(settings) = expect_context();
    let host = settings.host().map(str::to_string);
    let date = RwSignal::new(previous_day_iso(Local::now().date_naive()));
    let participants: RwSignal<Loadable<ParticipantRoster>> = RwSignal::new(Loadable::Loading);
    let music: RwSignal<Loadable<Vec<DayMusic>>> = RwSignal::new(Loadable::Loading);
    let guard = SectionGuard::new(session);

    Effect::new(move || {
        let day = date.get();
        if !is_iso_date(&day) {
            return;
        }
        let Some(ticket) = guard.begin() else {
            return;
        };
        participants.set(Loadable::Loading);
        music.set(Loadable::Loading);

        let host = host.clone();
        spawn_local(async move {
            let query = date_query(&day);
            let (people, plays) = join(
                api::get_json::<Vec<DayParticipant>>(DATE_PARTICIPANTS, &query),
                api::get_json::<Vec<DayMusic>>(DATE_MUSIC, &query),
            )
            .await;
            if !guard.accepts(ticket) {
                return;
            }
            for err in [people.as_ref().err(), plays.as_ref().err()].into_iter().flatten() {
                api::log_failure("calendar", err);
            }
            participants.set(Loadable::from_result(people, PARTICIPANTS_FAILED, |list| {
                ParticipantRoster::new(list, host.as_deref())
            }));
            music.set(Loadable::from_result(plays, MUSIC_FAILED, |list| list));
        });
    });

    let participant_column = move || match participants.get() {
        Loadable::Loading => status_line(LOADING_TEXT, false),
        Loadable::Failed(message) => status_line(message, true),
        Loadable::Ready(roster) => {
            let total = roster.total_label();
            let body = if roster.visible.is_empty() {
                status_line(NO_PARTICIPANTS, false)
            } else {
                roster
                    .visible
                    .into_iter()
                    .map(participant_box)
                    .collect_view()
                    .into_any()
            };
            view! {
                <p class="total">{total}</p>
                <div class="participant-list">{body}</div>
            }
            .into_any()
        }
    };

    let music_column = move || match music.get() {
        Loadable::Loading => status_line(LOADING_TEXT, false),
        Loadable::Failed(message) => status_line(message, true),
        Loadable::Ready(list) if list.is_empty() => status_line(NO_MUSIC, false),
        Loadable::Ready(list) => view! {
            <div class="music-list">{list.into_iter().map(music_row).collect_view()}</div>
        }
        .into_any(),
    };

    view! {
        <section class="calendar">
            <div class="section-head">
                <h2>"날짜별 참여자 및 재생 음악 보기"</h2>
                <input
                    type="date"
                    prop:value=move || date.get()
                    on:change=move |e| date.set(event_target_value(&e))
                />
            </div>
            <div class="calendar-columns">
                <div class="calendar-column">
                    <h3>"참여자"</h3>
                    {participant_column}
                </div>
                <div class="calendar-column">
                    <h3>"재생 음악"</h3>
                    {music_column}
                </div>
            </div>
        </section>
    }
}
