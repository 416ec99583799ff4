use serde::{Deserialize, Serialize};

use crate::user::NO_COMMENT;

pub const NO_PARTICIPANTS: &str = "참여자가 없습니다.";
pub const NO_MUSIC: &str = "재생된 음악이 없습니다.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayParticipant {
    pub nickname: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub total_count: u32,
    /// Minutes between first entry and last exit on that day.
    #[serde(default)]
    pub duration: i64,
}

impl DayParticipant {
    pub fn comment_or_default(&self) -> &str {
        match self.comment.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_COMMENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMusic {
    pub played_at: String,
    pub title: String,
    pub user: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularTrack {
    pub title: String,
    pub count: u32,
}

/// Participants of a day with the host identity filtered out of the
/// visible list but still counted in the total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantRoster {
    pub visible: Vec<DayParticipant>,
    pub total: usize,
}

impl ParticipantRoster {
    pub fn new(participants: Vec<DayParticipant>, host: Option<&str>) -> Self {
        let total = participants.len();
        let visible = match host.map(str::trim).filter(|h| !h.is_empty()) {
            Some(host) => participants
                .into_iter()
                .filter(|p| !p.nickname.trim().eq_ignore_ascii_case(host))
                .collect(),
            None => participants,
        };
        Self { visible, total }
    }

    pub fn total_label(&self) -> String {
        format!("총 {}명", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(nickname: &str) -> DayParticipant {
        DayParticipant {
            nickname: nickname.to_string(),
            img: String::new(),
            comment: None,
            total_count: 1,
            duration: 10,
        }
    }

    #[test]
    fn host_hidden_but_counted() {
        let roster = ParticipantRoster::new(
            vec![participant("Host"), participant("a"), participant("b")],
            Some("host"),
        );
        assert_eq!(roster.total, 3);
        assert_eq!(roster.total_label(), "총 3명");
        let names: Vec<_> = roster.visible.iter().map(|p| p.nickname.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn no_host_keeps_everyone() {
        let roster = ParticipantRoster::new(vec![participant("a")], None);
        assert_eq!(roster.visible.len(), 1);
        let blank = ParticipantRoster::new(vec![participant("a")], Some("  "));
        assert_eq!(blank.visible.len(), 1);
    }

    #[test]
    fn music_url_is_optional() {
        let rows: Vec<DayMusic> = serde_json::from_str(
            r#"[{"played_at":"21:04","title":"t","user":"u"},{"played_at":"21:09","title":"t2","user":"u","url":"https://x"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].url, None);
        assert_eq!(rows[1].url.as_deref(), Some("https://x"));
    }
}
