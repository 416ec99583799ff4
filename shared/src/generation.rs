/// Token captured when async work starts; the result is applied only if
/// the issuing counter has not advanced since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Monotonic counter used to discard superseded async results
/// (navigation, ranking window changes, hover lookups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation(u64);

impl Generation {
    /// Supersede all outstanding tickets and issue a new one.
    pub fn advance(&mut self) -> Ticket {
        self.0 = self.0.wrapping_add(1);
        Ticket(self.0)
    }

    /// Ticket for the current generation without superseding anything.
    pub fn current(&self) -> Ticket {
        Ticket(self.0)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0 == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::Generation;

    #[test]
    fn newest_ticket_wins() {
        let mut generation = Generation::default();
        let first = generation.advance();
        assert!(generation.is_current(first));

        let second = generation.advance();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_eq!(generation.current(), second);
    }

    #[test]
    fn wraps_without_panicking() {
        let mut generation = Generation(u64::MAX);
        let ticket = generation.advance();
        assert!(generation.is_current(ticket));
    }
}
