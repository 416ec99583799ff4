use leptos::prelude::*;

use rollcall_shared::{Generation, Ticket};

/// App-wide navigation counter; advanced once per `hashchange`.
#[derive(Clone, Copy)]
pub(crate) struct NavGeneration(pub StoredValue<Generation>);

impl NavGeneration {
    pub fn new() -> Self {
        Self(StoredValue::new(Generation::default()))
    }

    pub fn advance(&self) -> Option<Ticket> {
        self.0.try_update_value(|generation| generation.advance())
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0
            .try_with_value(|generation| generation.is_current(ticket))
            .unwrap_or(false)
    }
}

/// State scoped to one rendered page. Handed to every page component and
/// captured by its async loaders; results arriving after the user navigated
/// away are dropped.
#[derive(Clone, Copy)]
pub(crate) struct PageSession {
    nav: NavGeneration,
    ticket: Ticket,
}

impl PageSession {
    pub fn new(nav: NavGeneration, ticket: Ticket) -> Self {
        Self { nav, ticket }
    }

    pub fn is_live(&self) -> bool {
        self.nav.is_current(self.ticket)
    }
}

/// Generation for one region of a page (ranking window, hidden-star
/// refresh, search, hover lookup). A ticket is accepted only while both the
/// page and the region are still on the generation it was issued under.
#[derive(Clone, Copy)]
pub(crate) struct SectionGuard {
    session: PageSession,
    generation: StoredValue<Generation>,
}

impl SectionGuard {
    pub fn new(session: PageSession) -> Self {
        Self {
            session,
            generation: StoredValue::new(Generation::default()),
        }
    }

    /// Supersede any outstanding request of this region.
    pub fn begin(&self) -> Option<Ticket> {
        if !self.session.is_live() {
            return None;
        }
        self.generation.try_update_value(|generation| generation.advance())
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.session.is_live()
            && self
                .generation
                .try_with_value(|generation| generation.is_current(ticket))
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_page(nav: NavGeneration) -> PageSession {
        let ticket = nav.advance().unwrap();
        PageSession::new(nav, ticket)
    }

    #[test]
    fn navigating_away_kills_the_page_and_its_regions() {
        Owner::new().with(|| {
            let nav = NavGeneration::new();
            let session = live_page(nav);
            let guard = SectionGuard::new(session);
            let ticket = guard.begin().unwrap();
            assert!(session.is_live());
            assert!(guard.accepts(ticket));

            nav.advance();
            assert!(!session.is_live());
            assert!(!guard.accepts(ticket));
            assert_eq!(guard.begin(), None);
        });
    }

    #[test]
    fn restarting_a_region_rejects_the_older_ticket() {
        Owner::new().with(|| {
            let guard = SectionGuard::new(live_page(NavGeneration::new()));
            let first = guard.begin().unwrap();
            let second = guard.begin().unwrap();
            assert!(!guard.accepts(first));
            assert!(guard.accepts(second));
        });
    }

    #[test]
    fn regions_on_one_page_do_not_supersede_each_other() {
        Owner::new().with(|| {
            let session = live_page(NavGeneration::new());
            let ranking = SectionGuard::new(session);
            let search = SectionGuard::new(session);
            let ranking_ticket = ranking.begin().unwrap();
            let search_ticket = search.begin().unwrap();
            search.begin();
            assert!(ranking.accepts(ranking_ticket));
            assert!(!search.accepts(search_ticket));
        });
    }

    #[test]
    fn only_the_newest_navigation_is_current() {
        Owner::new().with(|| {
            let nav = NavGeneration::new();
            let first = nav.advance().unwrap();
            let second = nav.advance().unwrap();
            assert!(!nav.is_current(first));
            assert!(nav.is_current(second));
        });
    }
}
