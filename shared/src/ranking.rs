use serde::{Deserialize, Serialize};

use crate::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    #[default]
    Weekly,
    Monthly,
    Total,
}

impl RankingMode {
    pub const ALL: [RankingMode; 3] = [RankingMode::Weekly, RankingMode::Monthly, RankingMode::Total];

    /// weekly → monthly → total → weekly.
    pub fn next(self) -> Self {
        match self {
            RankingMode::Weekly => RankingMode::Monthly,
            RankingMode::Monthly => RankingMode::Total,
            RankingMode::Total => RankingMode::Weekly,
        }
    }

    pub fn as_query(self) -> &'static str {
        match self {
            RankingMode::Weekly => "weekly",
            RankingMode::Monthly => "monthly",
            RankingMode::Total => "total",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            RankingMode::Weekly => "🗓️ 주간 랭킹",
            RankingMode::Monthly => "📅 월간 랭킹",
            RankingMode::Total => "🏆 누적 랭킹",
        }
    }

    pub fn attendance_label(self) -> &'static str {
        match self {
            RankingMode::Weekly => "주간 출석",
            RankingMode::Monthly => "월간 출석",
            RankingMode::Total => "누적 출석",
        }
    }

    /// Only periodic rankings can be paged back in time.
    pub fn supports_offset(self) -> bool {
        matches!(self, RankingMode::Weekly | RankingMode::Monthly)
    }
}

/// Mode plus relative period offset (0 = current period, n = n periods back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RankingWindow {
    pub mode: RankingMode,
    pub offset: u32,
}

impl RankingWindow {
    pub fn new(mode: RankingMode, offset: u32) -> Self {
        let offset = if mode.supports_offset() { offset } else { 0 };
        Self { mode, offset }
    }

    /// Advance to the next mode; the offset restarts at the current period.
    pub fn cycle_mode(self) -> Self {
        Self::new(self.mode.next(), 0)
    }

    pub fn can_step_older(self) -> bool {
        self.mode.supports_offset()
    }

    pub fn can_step_newer(self) -> bool {
        self.mode.supports_offset() && self.offset > 0
    }

    pub fn older(self) -> Option<Self> {
        self.can_step_older()
            .then(|| Self::new(self.mode, self.offset.saturating_add(1)))
    }

    pub fn newer(self) -> Option<Self> {
        self.can_step_newer()
            .then(|| Self::new(self.mode, self.offset - 1))
    }

    pub fn offset_label(self) -> String {
        match (self.mode, self.offset) {
            (RankingMode::Total, _) => String::new(),
            (_, 0) => "이번 기간".to_string(),
            (_, n) => format!("{n}기간 전"),
        }
    }
}

/// Ranking response. Newer backends wrap the list with its period bounds;
/// older ones return a bare array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RankingResponse")]
pub struct RankingPage {
    pub users: Vec<UserSummary>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RankingResponse {
    Paged {
        users: Vec<UserSummary>,
        #[serde(default)]
        start_date: Option<String>,
        #[serde(default)]
        end_date: Option<String>,
    },
    Bare(Vec<UserSummary>),
}

impl From<RankingResponse> for RankingPage {
    fn from(raw: RankingResponse) -> Self {
        match raw {
            RankingResponse::Paged {
                users,
                start_date,
                end_date,
            } => Self {
                users,
                start_date,
                end_date,
            },
            RankingResponse::Bare(users) => Self {
                users,
                start_date: None,
                end_date: None,
            },
        }
    }
}

impl RankingPage {
    /// Users paired with their 1-based display rank. Order is the server's.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &UserSummary)> {
        self.users.iter().enumerate().map(|(i, user)| (i + 1, user))
    }

    pub fn user_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.users.iter().map(|user| user.user_id)
    }

    pub fn period_label(&self) -> Option<String> {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) => Some(format!("{start} ~ {end}")),
            (Some(start), None) => Some(format!("{start} ~")),
            (None, Some(end)) => Some(format!("~ {end}")),
            (None, None) => None,
        }
    }
}

/// Insertion-ordered set of user ids, each present once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ids: Vec<i64>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: i64) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }
}

impl Extend<i64> for ExclusionSet {
    fn extend<T: IntoIterator<Item = i64>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<i64> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

pub const REFRESH_LABEL: &str = "🔄";
pub const EXHAUSTED_LABEL: &str = "😴 더 없음";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenStarOutcome {
    /// The list was replaced by a fresh sample.
    Replaced,
    /// The server had nobody left to show; refresh is now disabled.
    Exhausted,
}

/// Hidden-star bookkeeping for one ranking window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HiddenStarState {
    ranking: ExclusionSet,
    displayed: Vec<UserSummary>,
    exhausted: bool,
}

impl HiddenStarState {
    pub fn for_ranking<I: IntoIterator<Item = i64>>(ranking_ids: I) -> Self {
        Self {
            ranking: ranking_ids.into_iter().collect(),
            displayed: Vec::new(),
            exhausted: false,
        }
    }

    /// Ids to pass as `excluded_ids`: everyone in the ranking plus everyone
    /// currently shown in the hidden-star list.
    pub fn exclusion(&self) -> ExclusionSet {
        let mut set = self.ranking.clone();
        set.extend(self.displayed.iter().map(|user| user.user_id));
        set
    }

    pub fn apply(&mut self, users: Vec<UserSummary>) -> HiddenStarOutcome {
        if users.is_empty() {
            self.exhausted = true;
            return HiddenStarOutcome::Exhausted;
        }
        self.displayed = users;
        HiddenStarOutcome::Replaced
    }

    pub fn displayed(&self) -> &[UserSummary] {
        &self.displayed
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn refresh_label(&self) -> &'static str {
        if self.exhausted {
            EXHAUSTED_LABEL
        } else {
            REFRESH_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> UserSummary {
        UserSummary {
            user_id: id,
            nickname: format!("user{id}"),
            img: String::new(),
            comment: None,
            total_count: 0,
            last_attended: None,
            achievements: Vec::new(),
        }
    }

    #[test]
    fn mode_cycle_wraps() {
        let mut mode = RankingMode::Weekly;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(
            seen,
            vec![
                RankingMode::Weekly,
                RankingMode::Monthly,
                RankingMode::Total,
                RankingMode::Weekly
            ]
        );
    }

    #[test]
    fn label_tracks_mode_through_cycle() {
        let mut window = RankingWindow::default();
        for expected in ["🗓️ 주간 랭킹", "📅 월간 랭킹", "🏆 누적 랭킹", "🗓️ 주간 랭킹"] {
            assert_eq!(window.mode.button_label(), expected);
            window = window.cycle_mode();
        }
    }

    #[test]
    fn offset_controls_only_for_periodic_modes() {
        let weekly = RankingWindow::new(RankingMode::Weekly, 0);
        assert!(weekly.can_step_older());
        assert!(!weekly.can_step_newer());

        let monthly_back = RankingWindow::new(RankingMode::Monthly, 2);
        assert!(monthly_back.can_step_newer());
        assert_eq!(monthly_back.newer().map(|w| w.offset), Some(1));

        let total = RankingWindow::new(RankingMode::Total, 5);
        assert_eq!(total.offset, 0);
        assert!(!total.can_step_older());
        assert!(!total.can_step_newer());
        assert_eq!(total.older(), None);
    }

    #[test]
    fn cycling_resets_offset() {
        let window = RankingWindow::new(RankingMode::Weekly, 3).cycle_mode();
        assert_eq!(window, RankingWindow::new(RankingMode::Monthly, 0));
    }

    #[test]
    fn ranking_page_accepts_wrapped_and_bare() {
        let wrapped: RankingPage = serde_json::from_str(
            r#"{"users":[{"user_id":7,"nickname":"a"}],"start_date":"2024-05-06","end_date":"2024-05-12"}"#,
        )
        .unwrap();
        assert_eq!(wrapped.users.len(), 1);
        assert_eq!(wrapped.period_label().as_deref(), Some("2024-05-06 ~ 2024-05-12"));

        let bare: RankingPage =
            serde_json::from_str(r#"[{"user_id":1,"nickname":"a"},{"user_id":2,"nickname":"b"}]"#)
                .unwrap();
        assert_eq!(bare.user_ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(bare.period_label(), None);
    }

    #[test]
    fn display_rank_is_one_based_position() {
        let page = RankingPage {
            users: vec![user(30), user(10), user(20)],
            start_date: None,
            end_date: None,
        };
        let ranks: Vec<(usize, i64)> = page.ranked().map(|(r, u)| (r, u.user_id)).collect();
        assert_eq!(ranks, vec![(1, 30), (2, 10), (3, 20)]);
    }

    #[test]
    fn exclusion_set_deduplicates_in_order() {
        let mut set: ExclusionSet = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.ids(), &[3, 1, 2]);
        assert!(!set.insert(2));
        assert!(set.insert(9));
        set.extend([9, 4]);
        assert_eq!(set.ids(), &[3, 1, 2, 9, 4]);
    }

    #[test]
    fn hidden_star_exclusion_is_ranking_union_displayed() {
        let mut state = HiddenStarState::for_ranking([1, 2, 3]);
        assert_eq!(state.exclusion().ids(), &[1, 2, 3]);

        state.apply(vec![user(4), user(5)]);
        assert_eq!(state.exclusion().ids(), &[1, 2, 3, 4, 5]);

        // A refresh replaces the displayed batch; only what is on screen stays excluded.
        state.apply(vec![user(6), user(3)]);
        let ids = state.exclusion();
        assert_eq!(ids.ids(), &[1, 2, 3, 6]);
        let mut sorted = ids.ids().to_vec();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.ids().len());
    }

    #[test]
    fn empty_sample_exhausts_until_new_window() {
        let mut state = HiddenStarState::for_ranking([1]);
        assert_eq!(state.refresh_label(), REFRESH_LABEL);
        state.apply(vec![user(2)]);

        assert_eq!(state.apply(Vec::new()), HiddenStarOutcome::Exhausted);
        assert!(state.is_exhausted());
        assert_eq!(state.refresh_label(), EXHAUSTED_LABEL);
        // The last sample stays visible.
        assert_eq!(state.displayed().len(), 1);

        let fresh = HiddenStarState::for_ranking([1]);
        assert!(!fresh.is_exhausted());
    }

    #[test]
    fn new_window_re_enables_an_exhausted_refresh() {
        let mut state = HiddenStarState::for_ranking([1, 2]);
        state.apply(vec![user(3)]);
        state.apply(Vec::new());
        assert_eq!(state.refresh_label(), EXHAUSTED_LABEL);

        // A mode or offset change rebuilds the state from the new ranking.
        state = HiddenStarState::for_ranking([4, 5]);
        assert!(!state.is_exhausted());
        assert_eq!(state.refresh_label(), REFRESH_LABEL);
        assert!(state.displayed().is_empty());
        assert_eq!(state.exclusion().ids(), &[4, 5]);
    }
}

