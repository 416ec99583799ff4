use leptos::prelude::*;

use rollcall_shared::UserSummary;
use rollcall_shared::user::DEFAULT_PROFILE_IMG;

use super::badges::AchievementBadges;
use crate::dom;

/// Clickable user tile. Carries [`dom::NICKNAME_ATTR`], so the page-level click
/// handler can open the detail card without a per-box listener.
#[component]
pub fn UserBox(
    user: UserSummary,
    rank: Option<usize>,
    attendance_label: &'static str,
    max_badges: usize,
) -> impl IntoView {
    let img = if user.img.is_empty() {
        DEFAULT_PROFILE_IMG.to_string()
    } else {
        user.img.clone()
    };
    let comment = user.comment_or_default().to_string();
    let count = format!("{attendance_label} {}회", user.total_count);
    let nickname = user.nickname;
    let alt = nickname.clone();
    let data_nickname = nickname.clone();

    view! {
        <div class="user-box" data-nickname=data_nickname>
            {rank.map(|rank| view! { <span class="rank">{rank}</span> })}
            <img class="avatar" src=img alt=alt on:error=|e| dom::fallback_avatar(&e) />
            <div class="user-meta">
                <div class="nickname">{nickname}</div>
                <div class="comment">{comment}</div>
                <div class="count">{count}</div>
                <AchievementBadges achievements=user.achievements max=max_badges />
            </div>
        </div>
    }
}
