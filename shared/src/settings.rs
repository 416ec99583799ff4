use serde::{Deserialize, Serialize};

/// `localStorage` key holding [`DashboardSettings`] as JSON.
pub const SETTINGS_STORAGE_KEY: &str = "rollcall_settings";

pub const DEFAULT_REDRAW_DEBOUNCE_MS: u32 = 120;

/// Operator-tunable dashboard settings. Unknown or missing keys fall back
/// to the defaults so older stored blobs keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Nickname of the session host, hidden from per-day participant lists.
    pub host_nickname: Option<String>,
    /// Delay before charts repaint after a theme switch.
    pub redraw_debounce_ms: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            host_nickname: None,
            redraw_debounce_ms: DEFAULT_REDRAW_DEBOUNCE_MS,
        }
    }
}

impl DashboardSettings {
    pub fn host(&self) -> Option<&str> {
        self.host_nickname
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_blob_fills_defaults() {
        let settings: DashboardSettings =
            serde_json::from_str(r#"{"host_nickname":" 하츠네 "}"#).unwrap();
        assert_eq!(settings.host(), Some("하츠네"));
        assert_eq!(settings.redraw_debounce_ms, DEFAULT_REDRAW_DEBOUNCE_MS);
    }

    #[test]
    fn empty_host_is_none() {
        let settings = DashboardSettings {
            host_nickname: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(settings.host(), None);
        assert_eq!(DashboardSettings::default().host(), None);
    }
}
