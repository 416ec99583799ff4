use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rollcall_shared::api::{ALL_USERS, USER_DETAILS, user_details_query};
use rollcall_shared::user::DEFAULT_PROFILE_IMG;
use rollcall_shared::{UserDetails, UserTile};

use super::{LOADING_TEXT, Loadable, status_line};
use crate::animation::{entrance, next_frame};
use crate::api;
use crate::components::{CardLayout, UserDetailCard};
use crate::dom::{self, NICKNAME_ATTR};
use crate::session::{PageSession, SectionGuard};

const USERS_FAILED: &str = "유저 목록을 불러오지 못했습니다.";
const CURSOR_OFFSET: f64 = 16.0;

/// Top-left corner of the hover card: below-right of the pointer, or above
/// it when the card would run past the bottom of the viewport.
pub fn hover_card_position(
    client_x: f64,
    client_y: f64,
    card_height: f64,
    viewport_height: f64,
) -> (f64, f64) {
    let left = client_x + CURSOR_OFFSET;
    let top = if client_y + CURSOR_OFFSET + card_height > viewport_height {
        (client_y - CURSOR_OFFSET - card_height).max(0.0)
    } else {
        client_y + CURSOR_OFFSET
    };
    (left, top)
}

#[derive(Debug, Clone, PartialEq)]
enum HoverCard {
    Hidden,
    Loading,
    Ready(Box<UserDetails>),
    Failed(String),
}

#[derive(Clone, Copy)]
struct HoverStore {
    hovered: RwSignal<Option<String>>,
    card: RwSignal<HoverCard>,
    pointer: RwSignal<(f64, f64)>,
    guard: SectionGuard,
}

impl HoverStore {
    fn new(session: PageSession) -> Self {
        Self {
            hovered: RwSignal::new(None),
            card: RwSignal::new(HoverCard::Hidden),
            pointer: RwSignal::new((0.0, 0.0)),
            guard: SectionGuard::new(session),
        }
    }

    fn enter(&self, nickname: String) {
        let Some(ticket) = self.guard.begin() else {
            return;
        };
        self.hovered.set(Some(nickname.clone()));
        self.card.set(HoverCard::Loading);

        let store = *self;
        spawn_local(async move {
            let result =
                api::get_json::<UserDetails>(USER_DETAILS, &user_details_query(&nickname)).await;
            // The pointer may have left this card (or moved to another)
            // while the request was in flight.
            if !store.guard.accepts(ticket) {
                return;
            }
            store.card.set(match result {
                Ok(details) => HoverCard::Ready(Box::new(details)),
                Err(e) => {
                    api::log_failure("hover", &e);
                    HoverCard::Failed(e.to_string())
                }
            });
        });
    }

    fn leave(&self) {
        self.guard.begin();
        self.hovered.set(None);
        self.card.set(HoverCard::Hidden);
    }
}

fn user_tile(tile: UserTile) -> impl IntoView {
    let img = if tile.img.is_empty() {
        DEFAULT_PROFILE_IMG.to_string()
    } else {
        tile.img
    };
    let nickname = tile.nickname;
    let data_nickname = nickname.clone();
    view! {
        <div class="user-tile" data-nickname=data_nickname>
            <img class="avatar" src=img alt="" on:error=|e| dom::fallback_avatar(&e) />
            <span class="nickname">{nickname}</span>
        </div>
    }
}

#[component]
pub fn AllUsersPage(session: PageSession) -> impl IntoView {
    let users: RwSignal<Loadable<Vec<UserTile>>> = RwSignal::new(Loadable::Loading);
    let hover = HoverStore::new(session);
    let list_guard = SectionGuard::new(session);
    let card_ref = NodeRef::<leptos::html::Div>::new();
    let entered = entrance();

    if let Some(ticket) = list_guard.begin() {
        spawn_local(async move {
            let result = api::get::<Vec<UserTile>>(ALL_USERS).await;
            if !list_guard.accepts(ticket) {
                return;
            }
            if let Err(e) = &result {
                api::log_failure("all-users", e);
            }
            users.set(Loadable::from_result(result, USERS_FAILED, |list| list));
        });
    }

    let on_move = move |e: web_sys::MouseEvent| {
        hover.pointer.set((e.client_x() as f64, e.client_y() as f64));
        let under = dom::closest_attr(&e, NICKNAME_ATTR);
        let current = hover.hovered.get_untracked();
        match under {
            Some(nickname) if current.as_deref() != Some(nickname.as_str()) => hover.enter(nickname),
            Some(_) => {}
            None if current.is_some() => hover.leave(),
            None => {}
        }
    };

    // Measured one frame after each content swap, once layout has settled.
    let card_height = RwSignal::new(0.0);
    Effect::new(move |_| {
        hover.card.track();
        spawn_local(async move {
            next_frame().await;
            let height = card_ref
                .get_untracked()
                .map(|card| card.offset_height() as f64)
                .unwrap_or(0.0);
            card_height.try_set(height);
        });
    });

    let position = move || {
        let (x, y) = hover.pointer.get();
        hover_card_position(x, y, card_height.get(), dom::viewport_height())
    };

    let card_body = move || match hover.card.get() {
        HoverCard::Hidden => ().into_any(),
        HoverCard::Loading => view! { <p class="status">{LOADING_TEXT}</p> }.into_any(),
        HoverCard::Failed(message) => view! { <p class="status error">{message}</p> }.into_any(),
        HoverCard::Ready(details) => {
            view! { <UserDetailCard details=*details chart_id="hover-chart" layout=CardLayout::Compact /> }
                .into_any()
        }
    };

    let grid = move || match users.get() {
        Loadable::Loading => status_line(LOADING_TEXT, false),
        Loadable::Failed(message) => status_line(message, true),
        Loadable::Ready(list) => view! {
            <div class="user-grid" on:mousemove=on_move on:mouseleave=move |_| hover.leave()>
                {list.into_iter().map(user_tile).collect_view()}
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="page all-users-page" class:entered=move || entered.get()>
            <h2>"모든 유저"</h2>
            {grid}
            <div
                class="hover-card"
                node_ref=card_ref
                class:visible=move || hover.card.with(|card| *card != HoverCard::Hidden)
                style:left=move || format!("{}px", position().0)
                style:top=move || format!("{}px", position().1)
            >
                {card_body}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::hover_card_position;

    #[test]
    fn card_sits_below_right_of_pointer() {
        assert_eq!(hover_card_position(100.0, 100.0, 300.0, 800.0), (116.0, 116.0));
    }

    #[test]
    fn card_flips_above_near_the_bottom() {
        assert_eq!(hover_card_position(100.0, 600.0, 300.0, 800.0), (116.0, 284.0));
    }

    #[test]
    fn growing_card_flips_at_the_same_pointer() {
        let loading = hover_card_position(100.0, 500.0, 40.0, 800.0);
        let loaded = hover_card_position(100.0, 500.0, 420.0, 800.0);
        assert_eq!(loading, (116.0, 516.0));
        assert_eq!(loaded, (116.0, 64.0));
    }

    #[test]
    fn flipped_card_never_leaves_the_top() {
        assert_eq!(hover_card_position(0.0, 100.0, 700.0, 500.0), (16.0, 0.0));
    }
}
