mod achievements;
mod all_users;
mod analysis;
mod calendar;
mod hidden_star;
mod main_page;
mod popular_music;
mod ranking;
mod search;

use std::fmt;

use leptos::prelude::*;

use rollcall_shared::Route;
use rollcall_shared::route::NOT_FOUND_MESSAGE;

use crate::api::FetchError;
use crate::session::PageSession;
use achievements::AchievementsPage;
use all_users::AllUsersPage;
use analysis::AnalysisPage;
use main_page::MainPage;

/// A page could not be built at all; the router shows it in place of the
/// page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    NoWindow,
    NoDocument,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NoWindow => f.write_str("window unavailable"),
            PageError::NoDocument => f.write_str("document unavailable"),
        }
    }
}

impl std::error::Error for PageError {}

pub fn load_failure_message(err: &PageError) -> String {
    format!("페이지 로딩 실패: {err}")
}

/// State of one independently fetched region.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    /// Localized message shown in place of the region.
    Failed(&'static str),
}

impl<T> Loadable<T> {
    pub fn from_result<U>(
        result: Result<U, FetchError>,
        failure: &'static str,
        build: impl FnOnce(U) -> T,
    ) -> Self {
        match result {
            Ok(value) => Loadable::Ready(build(value)),
            Err(_) => Loadable::Failed(failure),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

pub const LOADING_TEXT: &str = "불러오는 중...";

/// Inline placeholder for a region that is loading or failed.
pub fn status_line(message: &'static str, failed: bool) -> AnyView {
    view! { <p class="status" class:error=failed>{message}</p> }.into_any()
}

/// Build the page for `route`.
pub fn render(route: Route, session: PageSession) -> Result<AnyView, PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    window.document().ok_or(PageError::NoDocument)?;

    Ok(match route {
        Route::Main => view! { <MainPage session /> }.into_any(),
        Route::AllUsers => view! { <AllUsersPage session /> }.into_any(),
        Route::Achievements => view! { <AchievementsPage session /> }.into_any(),
        Route::Analysis => view! { <AnalysisPage session /> }.into_any(),
        Route::NotFound => view! { <p class="not-found">{NOT_FOUND_MESSAGE}</p> }.into_any(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_names_the_error() {
        assert_eq!(
            load_failure_message(&PageError::NoDocument),
            "페이지 로딩 실패: document unavailable"
        );
    }

    #[test]
    fn loadable_keeps_only_its_own_failure() {
        let ok: Loadable<usize> = Loadable::from_result(Ok::<_, FetchError>(vec![1, 2]), "x", |v| v.len());
        assert_eq!(ok, Loadable::Ready(2));
        assert_eq!(ok.ready(), Some(&2));

        let failed: Loadable<usize> =
            Loadable::from_result(Err::<Vec<u8>, _>(FetchError::Status(500)), "실패", |v| v.len());
        assert_eq!(failed, Loadable::Failed("실패"));
        assert_eq!(failed.ready(), None);
    }
}
