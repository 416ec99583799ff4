use serde::{Deserialize, Serialize};

/// `localStorage` key holding `"dark"` or `"light"`.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// A stored choice wins; otherwise follow the system preference.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored {
            Some("dark") => Theme::Dark,
            Some("light") => Theme::Light,
            _ if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Icon of the toggle button (shows the mode it switches to).
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    pub fn toggle_text(self) -> &'static str {
        match self {
            Theme::Dark => "라이트모드 전환",
            Theme::Light => "다크모드 전환",
        }
    }
}

/// Colours used by every chart draw for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub line: &'static str,
    pub point: &'static str,
    pub fill: &'static str,
    pub grid: &'static str,
    pub font: &'static str,
}

impl ChartPalette {
    pub const AVERAGE_LINE: &'static str = "orange";

    /// Default blue series.
    pub fn primary(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                line: "rgba(96,165,250,1)",
                point: "rgba(147,197,253,1)",
                fill: "rgba(96,165,250,0.2)",
                grid: "#444",
                font: "#ddd",
            },
            Theme::Light => Self {
                line: "rgba(54,162,235,1)",
                point: "rgba(54,162,235,0.6)",
                fill: "rgba(54,162,235,0.2)",
                grid: "#ccc",
                font: "#333",
            },
        }
    }

    /// Green series used for ratio charts.
    pub fn secondary(theme: Theme) -> Self {
        let base = Self::primary(theme);
        match theme {
            Theme::Dark => Self {
                line: "rgba(34,197,94,1)",
                point: "rgba(34,197,94,0.2)",
                fill: "rgba(34,197,94,0.2)",
                ..base
            },
            Theme::Light => Self {
                line: "rgba(16,185,129,1)",
                point: "rgba(16,185,129,0.2)",
                fill: "rgba(16,185,129,0.2)",
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_choice_beats_system_preference() {
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
    }

    #[test]
    fn missing_or_garbage_follows_system() {
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(Some("sepia"), false), Theme::Light);
    }

    #[test]
    fn toggle_round_trip_and_labels() {
        let theme = Theme::Light.toggled();
        assert!(theme.is_dark());
        assert_eq!(theme.toggle_icon(), "☀️");
        assert_eq!(theme.toggle_text(), "라이트모드 전환");
        assert_eq!(theme.toggled(), Theme::Light);
        assert_eq!(theme.as_str(), "dark");
    }

    #[test]
    fn palette_follows_theme() {
        assert_eq!(ChartPalette::primary(Theme::Dark).grid, "#444");
        assert_eq!(ChartPalette::primary(Theme::Light).font, "#333");
        assert_eq!(ChartPalette::secondary(Theme::Light).grid, "#ccc");
        assert_ne!(
            ChartPalette::secondary(Theme::Dark).line,
            ChartPalette::primary(Theme::Dark).line
        );
    }
}
