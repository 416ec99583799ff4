//! Endpoint paths and query parameters of the dashboard backend.

use crate::ranking::{ExclusionSet, RankingMode, RankingWindow};

pub const ACHIEVEMENTS: &str = "/api/achievements";
pub const ALL_USERS: &str = "/api/all-users";
pub const USER_DETAILS: &str = "/api/user-details";
pub const RANKING_USERS: &str = "/api/ranking-users";
pub const RANDOM_USERS: &str = "/api/random-users";
pub const POPULAR_MUSIC: &str = "/api/popular-music";
pub const DATE_PARTICIPANTS: &str = "/api/date/participants";
pub const DATE_MUSIC: &str = "/api/date/music";
pub const ATTENDANCE_DAILY_COUNT: &str = "/api/attendance-daily-count";
pub const ATTENDANCE_INTERVAL_SUMMARY: &str = "/api/attendance-interval-summary";
pub const WEEKDAY_ATTENDANCE_SUMMARY: &str = "/api/weekday-attendance-summary";
pub const LOVE_GRAPH: &str = "/api/love-graph";
pub const ATTENDANCE_CORRELATION: &str = "/api/attendance_correlation";

pub type QueryParams = Vec<(&'static str, String)>;

pub fn ranking_query(window: RankingWindow) -> QueryParams {
    vec![
        ("mode", window.mode.as_query().to_string()),
        ("offset", window.offset.to_string()),
    ]
}

/// `mode` followed by one repeated `excluded_ids` pair per id.
pub fn random_users_query(mode: RankingMode, excluded: &ExclusionSet) -> QueryParams {
    let mut params = Vec::with_capacity(excluded.ids().len() + 1);
    params.push(("mode", mode.as_query().to_string()));
    params.extend(excluded.ids().iter().map(|id| ("excluded_ids", id.to_string())));
    params
}

pub fn user_details_query(nickname: &str) -> QueryParams {
    vec![("nickname", nickname.to_string())]
}

pub fn date_query(date: &str) -> QueryParams {
    vec![("date", date.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_query_carries_mode_and_offset() {
        let params = ranking_query(RankingWindow::new(RankingMode::Monthly, 2));
        assert_eq!(
            params,
            vec![("mode", "monthly".to_string()), ("offset", "2".to_string())]
        );
    }

    #[test]
    fn random_users_repeats_excluded_ids_once_each() {
        let excluded: ExclusionSet = [5, 8, 5, 13].into_iter().collect();
        let params = random_users_query(RankingMode::Weekly, &excluded);
        assert_eq!(params[0], ("mode", "weekly".to_string()));
        let ids: Vec<&str> = params[1..]
            .iter()
            .map(|(key, value)| {
                assert_eq!(*key, "excluded_ids");
                value.as_str()
            })
            .collect();
        assert_eq!(ids, vec!["5", "8", "13"]);
    }

    #[test]
    fn empty_exclusion_sends_only_mode() {
        let params = random_users_query(RankingMode::Total, &ExclusionSet::new());
        assert_eq!(params, vec![("mode", "total".to_string())]);
    }
}
