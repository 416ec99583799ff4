use leptos::prelude::*;

use rollcall_shared::{Achievement, Delimiter, Series, UserDetails};

use super::badges::{AchievementBadge, AchievementBadges};
use crate::charts::{ChartCanvas, ChartSpec, LineChart};
use crate::dom;

/// Minutes per day never exceed this on the activity chart.
const ACTIVITY_Y_MAX: f64 = 80.0;
const WIDE_MAX_BADGES: usize = 16;
const COMPACT_MAX_BADGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    /// Search result: achievements flank the profile in two columns.
    Wide,
    /// Hover card on the all-users grid.
    Compact,
}

impl CardLayout {
    /// Description separator used by the badges on this card.
    pub fn delimiter(self) -> Delimiter {
        match self {
            CardLayout::Wide => Delimiter::Comma,
            CardLayout::Compact => Delimiter::Triple,
        }
    }
}

/// Left and right badge columns (left gets the odd one) plus the count
/// left for the `+N` chip.
pub fn achievement_columns<T: Clone>(items: &[T], max_shown: usize) -> (Vec<T>, Vec<T>, usize) {
    let shown = items.len().min(max_shown);
    let half = shown.div_ceil(2);
    (
        items[..half].to_vec(),
        items[half..shown].to_vec(),
        items.len() - shown,
    )
}

fn badge_column(
    achievements: Vec<Achievement>,
    delimiter: Delimiter,
    class: &'static str,
) -> impl IntoView {
    view! {
        <div class=class>
            {achievements
                .into_iter()
                .map(|achievement| view! { <AchievementBadge achievement delimiter /> })
                .collect_view()}
        </div>
    }
}

fn activity_chart(details: &UserDetails) -> Option<ChartSpec> {
    let (labels, values) = details.recent_series();
    if values.is_empty() {
        return None;
    }
    Some(
        LineChart::new(Series::new(labels, values))
            .filled()
            .y_max(ACTIVITY_Y_MAX)
            .into(),
    )
}

#[component]
pub fn UserDetailCard(details: UserDetails, chart_id: &'static str, layout: CardLayout) -> impl IntoView {
    let chart = activity_chart(&details);
    let img = details.img_or_default().to_string();
    let comment = details.comment_or_default().to_string();
    let last_attended = details
        .last_attended
        .clone()
        .unwrap_or_else(|| "기록 없음".to_string());
    let stats = vec![
        ("누적 출석", format!("{}회", details.total_count)),
        ("총 플레이", details.play_time()),
        ("최근 접속", last_attended),
        ("곡 선택", format!("{}회", details.song_play_count)),
    ];
    let mut extra = Vec::new();
    if let Some(n) = details.topn_weekly_count_excl_current {
        extra.push(("주간 랭킹 진입", format!("{n}회")));
    }
    if let Some(n) = details.topn_monthly_count_excl_current {
        extra.push(("월간 랭킹 진입", format!("{n}회")));
    }

    let stat_rows = stats
        .into_iter()
        .chain(extra)
        .map(|(label, value)| {
            view! {
                <p class="stat">
                    <strong>{label} ":"</strong>
                    " "
                    {value}
                </p>
            }
        })
        .collect_view();

    let profile = view! {
        <div class="detail-profile">
            <img class="detail-avatar" src=img alt=details.nickname.clone() on:error=|e| dom::fallback_avatar(&e) />
            <h3 class="detail-name">{details.nickname.clone()}</h3>
            <p class="detail-comment">{comment}</p>
            <div class="detail-stats">{stat_rows}</div>
        </div>
    };

    let achievements = details.achievements;
    let delimiter = layout.delimiter();
    let body = match layout {
        CardLayout::Wide => {
            let (left, right, hidden) = achievement_columns(&achievements, WIDE_MAX_BADGES);
            view! {
                <div class="detail-layout">
                    {badge_column(left, delimiter, "detail-badges left")}
                    {profile}
                    <div class="detail-badges right">
                        {badge_column(right, delimiter, "badge-column")}
                        {(hidden > 0).then(|| view! { <span class="badge badge-more">{format!("+{hidden}")}</span> })}
                    </div>
                </div>
            }
            .into_any()
        }
        CardLayout::Compact => view! {
            <div class="detail-layout compact">
                {profile}
                <AchievementBadges achievements max=COMPACT_MAX_BADGES delimiter />
            </div>
        }
        .into_any(),
    };
    let chart_height = match layout {
        CardLayout::Wide => 160,
        CardLayout::Compact => 100,
    };

    view! {
        <div class="detail-card">
            {body}
            {chart.map(|spec| view! {
                <div class="detail-chart">
                    <ChartCanvas id=chart_id height=chart_height spec=Signal::stored(Some(spec)) />
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{CardLayout, achievement_columns};
    use rollcall_shared::{Delimiter, Description};

    #[test]
    fn odd_counts_put_the_extra_badge_left() {
        let (left, right, hidden) = achievement_columns(&[1, 2, 3, 4, 5], 16);
        assert_eq!(left, vec![1, 2, 3]);
        assert_eq!(right, vec![4, 5]);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn overflow_is_counted_after_the_cap() {
        let items: Vec<u32> = (0..20).collect();
        let (left, right, hidden) = achievement_columns(&items, 16);
        assert_eq!(left.len(), 8);
        assert_eq!(right.len(), 8);
        assert_eq!(right[0], 8);
        assert_eq!(hidden, 4);
    }

    #[test]
    fn empty_list() {
        let (left, right, hidden) = achievement_columns::<u8>(&[], 16);
        assert!(left.is_empty() && right.is_empty());
        assert_eq!(hidden, 0);
    }

    #[test]
    fn hover_card_keeps_single_comma_sentences_whole() {
        let description = Description::Text("첫 출석, 환영합니다".into());
        let compact = description.lines(CardLayout::Compact.delimiter());
        assert_eq!(compact.headline(), Some("첫 출석, 환영합니다"));
        assert!(compact.details().is_empty());

        let wide = description.lines(CardLayout::Wide.delimiter());
        assert_eq!(wide.headline(), Some("첫 출석"));
        assert_eq!(wide.details(), ["환영합니다".to_string()]);
    }

    #[test]
    fn list_descriptions_ignore_the_layout() {
        let description = Description::Lines(vec!["A, B".into(), "C".into()]);
        assert_eq!(
            description.lines(Delimiter::Triple),
            description.lines(Delimiter::Comma)
        );
    }
}
