use leptos::prelude::*;

use rollcall_shared::user::split_overflow;
use rollcall_shared::{Achievement, Delimiter, Description};

/// Description with the headline styled apart from the detail lines.
#[component]
pub fn DescriptionView(
    description: Description,
    #[prop(optional)] delimiter: Delimiter,
) -> impl IntoView {
    let lines = description.lines(delimiter);
    if lines.is_empty() {
        return ().into_any();
    }
    let headline = lines.headline().map(str::to_string);
    let details = lines.details().to_vec();

    view! {
        <div class="desc">
            {headline.map(|line| view! { <div class="desc-headline">{line}</div> })}
            {details
                .into_iter()
                .map(|line| view! { <div class="desc-line">{line}</div> })
                .collect_view()}
        </div>
    }
    .into_any()
}

/// Icon with a hover tooltip carrying the title and description.
#[component]
pub fn AchievementBadge(
    achievement: Achievement,
    #[prop(optional)] delimiter: Delimiter,
) -> impl IntoView {
    let icon = achievement.icon_url();
    let alt = format!("{} 아이콘", achievement.name);
    let title = achievement.title();

    view! {
        <span class="badge">
            <img class="badge-icon" src=icon alt=alt />
            <span class="badge-tooltip">
                <span class="badge-title">{title}</span>
                <DescriptionView description=achievement.description delimiter />
            </span>
        </span>
    }
}

/// At most `max` badges, then a `+N` chip listing the rest on hover.
#[component]
pub fn AchievementBadges(
    achievements: Vec<Achievement>,
    max: usize,
    #[prop(optional)] delimiter: Delimiter,
) -> impl IntoView {
    let (shown, hidden) = split_overflow(&achievements, max);
    let shown = shown.to_vec();
    let rest: Vec<String> = achievements[shown.len()..]
        .iter()
        .map(|a| a.name.clone())
        .collect();

    view! {
        <div class="badges">
            {shown
                .into_iter()
                .map(|achievement| view! { <AchievementBadge achievement delimiter /> })
                .collect_view()}
            {(hidden > 0).then(|| view! {
                <span class="badge badge-more">
                    {format!("+{hidden}")}
                    <span class="badge-tooltip">{rest.join(", ")}</span>
                </span>
            })}
        </div>
    }
}
