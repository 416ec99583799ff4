pub mod analytics;
pub mod api;
pub mod colors;
pub mod day;
pub mod format;
pub mod generation;
pub mod ranking;
pub mod route;
pub mod settings;
pub mod theme;
pub mod user;

pub use analytics::Series;
pub use colors::{rgba_css, themed_user_color, user_color};
pub use day::{DayMusic, DayParticipant, ParticipantRoster, PopularTrack};
pub use generation::{Generation, Ticket};
pub use ranking::{
    ExclusionSet, HiddenStarOutcome, HiddenStarState, RankingMode, RankingPage, RankingWindow,
};
pub use route::Route;
pub use settings::DashboardSettings;
pub use theme::{ChartPalette, Theme};
pub use user::{Achievement, Delimiter, Description, DescriptionLines, UserDetails, UserSummary, UserTile};
