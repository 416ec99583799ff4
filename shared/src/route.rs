/// Pages reachable through the location fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Main,
    AllUsers,
    Achievements,
    Analysis,
    NotFound,
}

pub const NOT_FOUND_MESSAGE: &str = "존재하지 않는 페이지입니다.";

const ROUTE_TABLE: &[(&str, Route)] = &[
    ("#/", Route::Main),
    ("#/main", Route::Main),
    ("#/allusers", Route::AllUsers),
    ("#/achievements", Route::Achievements),
    ("#/analysis", Route::Analysis),
];

impl Route {
    /// Navigation entries, in menu order.
    pub const NAV: [Route; 4] = [
        Route::Main,
        Route::AllUsers,
        Route::Achievements,
        Route::Analysis,
    ];

    /// Resolve `location.hash`; an empty fragment is the main page.
    pub fn from_hash(hash: &str) -> Self {
        let hash = if hash.is_empty() { "#/" } else { hash };
        ROUTE_TABLE
            .iter()
            .find(|(key, _)| *key == hash)
            .map(|(_, route)| *route)
            .unwrap_or(Route::NotFound)
    }

    pub fn href(self) -> &'static str {
        match self {
            Route::Main => "#/main",
            Route::AllUsers => "#/allusers",
            Route::Achievements => "#/achievements",
            Route::Analysis => "#/analysis",
            Route::NotFound => "#/",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Route::Main => "메인",
            Route::AllUsers => "모든 유저",
            Route::Achievements => "도전과제",
            Route::Analysis => "분석",
            Route::NotFound => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_fragments_resolve() {
        assert_eq!(Route::from_hash(""), Route::Main);
        assert_eq!(Route::from_hash("#/"), Route::Main);
        assert_eq!(Route::from_hash("#/main"), Route::Main);
        assert_eq!(Route::from_hash("#/allusers"), Route::AllUsers);
        assert_eq!(Route::from_hash("#/achievements"), Route::Achievements);
        assert_eq!(Route::from_hash("#/analysis"), Route::Analysis);
    }

    #[test]
    fn unsupported_fragments_are_not_found() {
        for hash in ["#/nope", "#/main/", "#main", "#/Analysis", "#"] {
            assert_eq!(Route::from_hash(hash), Route::NotFound, "{hash}");
        }
    }

    #[test]
    fn nav_hrefs_round_trip() {
        for route in Route::NAV {
            assert_eq!(Route::from_hash(route.href()), route);
        }
    }
}
