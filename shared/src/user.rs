use serde::{Deserialize, Deserializer, Serialize};

use crate::format;

pub const NO_COMMENT: &str = "한줄 소개 없음";
pub const DEFAULT_PROFILE_IMG: &str = "/static/profiles/default.png";

/// Separator between description lines. The all-users hover card splits on
/// `,,,`; every other view splits on a single comma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Triple,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Triple => ",,,",
        }
    }
}

/// Achievement description as shipped: one delimited string or a list of
/// lines. The string form is split only once the view picks its
/// [`Delimiter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Description {
    #[default]
    Empty,
    Text(String),
    Lines(Vec<String>),
}

impl Description {
    pub fn lines(&self, delimiter: Delimiter) -> DescriptionLines {
        match self {
            Description::Empty => DescriptionLines::default(),
            Description::Text(text) => DescriptionLines::parse(text, delimiter),
            Description::Lines(lines) => DescriptionLines::from_lines(lines),
        }
    }
}

impl<'de> Deserialize<'de> for Description {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Lines(Vec<String>),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(text)) => Description::Text(text),
            Some(Raw::Lines(lines)) => Description::Lines(lines),
            None => Description::Empty,
        })
    }
}

/// Display lines of a description. Line 0 is the headline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionLines(Vec<String>);

impl DescriptionLines {
    pub fn parse(raw: &str, delimiter: Delimiter) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }
        Self::from_lines(raw.split(delimiter.as_str()))
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            lines
                .into_iter()
                .map(|line| line.as_ref().trim().to_string())
                .collect(),
        )
    }

    pub fn headline(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Lines after the headline.
    pub fn details(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub achieved_at: Option<String>,
    #[serde(default)]
    pub achieved_count: Option<u32>,
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl Achievement {
    pub fn icon_url(&self) -> String {
        format!("/static/achievements/a_{}.png", self.name)
    }

    /// Tooltip title, e.g. `개근 (2024-05-01)`.
    pub fn title(&self) -> String {
        match self.achieved_at.as_deref() {
            Some(at) => format!("{} ({at})", self.name),
            None => self.name.clone(),
        }
    }

    /// Aggregate line for the achievements page, e.g. `12명 달성 (4.5%)`.
    pub fn achieved_summary(&self) -> String {
        let count = self.achieved_count.unwrap_or(0);
        let pct = self.percentage.unwrap_or(0.0);
        format!("{count}명 달성 ({pct}%)")
    }
}

/// A user row as returned by the ranking and random-user endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: i64,
    pub nickname: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub last_attended: Option<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl UserSummary {
    pub fn comment_or_default(&self) -> &str {
        comment_or_default(self.comment.as_deref())
    }
}

/// Entry of the all-users grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTile {
    pub nickname: String,
    #[serde(default)]
    pub img: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDuration {
    pub date: String,
    #[serde(default)]
    pub duration_sec: i64,
}

/// Profile record from `/api/user-details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    pub nickname: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub play_duration_sec: i64,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub last_attended: Option<String>,
    #[serde(default)]
    pub recent_30days: Vec<DailyDuration>,
    #[serde(default)]
    pub song_play_count: u32,
    #[serde(default)]
    pub topn_weekly_count_excl_current: Option<u32>,
    #[serde(default)]
    pub topn_monthly_count_excl_current: Option<u32>,
}

impl UserDetails {
    pub fn comment_or_default(&self) -> &str {
        comment_or_default(self.comment.as_deref())
    }

    pub fn play_time(&self) -> String {
        format::play_time(self.play_duration_sec)
    }

    pub fn img_or_default(&self) -> &str {
        if self.img.is_empty() {
            DEFAULT_PROFILE_IMG
        } else {
            &self.img
        }
    }

    /// `MM-DD` labels and minutes-per-day values for the activity chart.
    pub fn recent_series(&self) -> (Vec<String>, Vec<f64>) {
        self.recent_30days
            .iter()
            .map(|day| {
                let label =
                    format::month_day_label(&day.date, '-').unwrap_or_else(|| day.date.clone());
                (label, format::minutes_one_decimal(day.duration_sec))
            })
            .unzip()
    }
}

fn comment_or_default(comment: Option<&str>) -> &str {
    match comment {
        Some(text) if !text.trim().is_empty() => text,
        _ => NO_COMMENT,
    }
}

/// Split a badge list into the visible prefix and the hidden remainder
/// count rendered as `+N`.
pub fn split_overflow<T>(items: &[T], max_shown: usize) -> (&[T], usize) {
    let shown = items.len().min(max_shown);
    (&items[..shown], items.len() - shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> DescriptionLines {
        DescriptionLines::from_lines(items)
    }

    #[test]
    fn comma_description_yields_three_lines() {
        let parsed = DescriptionLines::parse("A,B,C", Delimiter::Comma);
        assert_eq!(parsed.headline(), Some("A"));
        assert_eq!(parsed.details(), ["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn comma_convention_splits_a_plain_sentence() {
        let parsed = DescriptionLines::parse("첫 출석, 환영합니다", Delimiter::Comma);
        assert_eq!(parsed, lines(&["첫 출석", "환영합니다"]));
    }

    #[test]
    fn triple_convention_keeps_single_commas() {
        let parsed = DescriptionLines::parse("첫 출석, 환영합니다", Delimiter::Triple);
        assert_eq!(parsed, lines(&["첫 출석, 환영합니다"]));

        let parsed = DescriptionLines::parse("첫 출석, 환영합니다,,,다음 목표: 10회", Delimiter::Triple);
        assert_eq!(parsed, lines(&["첫 출석, 환영합니다", "다음 목표: 10회"]));
    }

    #[test]
    fn description_pieces_are_trimmed() {
        let parsed = DescriptionLines::parse("  one ,  two  ", Delimiter::Comma);
        assert_eq!(parsed, lines(&["one", "two"]));
    }

    #[test]
    fn empty_description_has_no_lines() {
        assert!(DescriptionLines::parse("   ", Delimiter::Triple).is_empty());
        assert!(DescriptionLines::default().details().is_empty());
        assert!(Description::Empty.lines(Delimiter::Comma).is_empty());
    }

    #[test]
    fn description_accepts_string_list_and_null() {
        let from_text: Achievement =
            serde_json::from_str(r#"{"name":"x","description":"A,B"}"#).unwrap();
        assert_eq!(from_text.description, Description::Text("A,B".into()));
        assert_eq!(from_text.description.lines(Delimiter::Comma), lines(&["A", "B"]));
        assert_eq!(from_text.description.lines(Delimiter::Triple), lines(&["A,B"]));

        let from_list: Achievement =
            serde_json::from_str(r#"{"name":"x","description":["A, still A","B"]}"#).unwrap();
        assert_eq!(from_list.description.lines(Delimiter::Comma).headline(), Some("A, still A"));

        let from_null: Achievement =
            serde_json::from_str(r#"{"name":"x","description":null}"#).unwrap();
        assert_eq!(from_null.description, Description::Empty);

        let missing: Achievement = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(missing.description, Description::Empty);
    }

    #[test]
    fn achievement_labels() {
        let ach = Achievement {
            name: "개근".into(),
            description: Description::default(),
            achieved_at: Some("2024-05-01".into()),
            achieved_count: Some(12),
            percentage: Some(4.5),
        };
        assert_eq!(ach.icon_url(), "/static/achievements/a_개근.png");
        assert_eq!(ach.title(), "개근 (2024-05-01)");
        assert_eq!(ach.achieved_summary(), "12명 달성 (4.5%)");
    }

    #[test]
    fn overflow_split() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(split_overflow(&items, 3), (&items[..3], 2));
        assert_eq!(split_overflow(&items, 5), (&items[..], 0));
        assert_eq!(split_overflow(&items, 9), (&items[..], 0));
        let empty: [u8; 0] = [];
        assert_eq!(split_overflow(&empty, 2).1, 0);
    }

    #[test]
    fn blank_comment_falls_back() {
        let user: UserSummary = serde_json::from_str(
            r#"{"user_id":1,"nickname":"a","comment":"  ","total_count":3}"#,
        )
        .unwrap();
        assert_eq!(user.comment_or_default(), NO_COMMENT);
        assert!(user.achievements.is_empty());
    }

    #[test]
    fn details_series_uses_month_day_and_minutes() {
        let details: UserDetails = serde_json::from_str(
            r#"{
                "nickname":"a",
                "play_duration_sec":5400,
                "recent_30days":[
                    {"date":"2024-05-01","duration_sec":90},
                    {"date":"2024-05-02","duration_sec":3600}
                ]
            }"#,
        )
        .unwrap();
        let (labels, values) = details.recent_series();
        assert_eq!(labels, vec!["05-01", "05-02"]);
        assert_eq!(values, vec![1.5, 60.0]);
        assert_eq!(details.play_time(), "1시간 30분");
        assert_eq!(details.img_or_default(), DEFAULT_PROFILE_IMG);
        assert_eq!(details.topn_weekly_count_excl_current, None);
    }
}
