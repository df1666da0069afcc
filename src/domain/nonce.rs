//! Transaction sequence bookkeeping.

/// In-memory nonce cache for a single sending account.
///
/// Empty until the first broadcast is confirmed; callers must then look the
/// nonce up on-chain. After a confirmed broadcast the next nonce is
/// `last + 1`. A nonce is recorded only via [`NonceCounter::commit`], so a
/// failed submission never advances the counter.
#[derive(Debug, Clone, Default)]
pub struct NonceCounter {
    last_used: Option<u64>,
}

impl NonceCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nonce to use next, if known without asking the chain.
    #[must_use]
    pub fn next_cached(&self) -> Option<u64> {
        self.last_used.map(|n| n + 1)
    }

    /// Record that `nonce` was used by a confirmed broadcast.
    ///
    /// Older nonces are ignored so the counter never moves backwards.
    pub fn commit(&mut self, nonce: u64) {
        match self.last_used {
            Some(last) if last >= nonce => {}
            _ => self.last_used = Some(nonce),
        }
    }

    #[must_use]
    pub fn last_used(&self) -> Option<u64> {
        self.last_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_counter_has_no_cached_nonce() {
        assert_eq!(NonceCounter::new().next_cached(), None);
    }

    #[test]
    fn commit_advances_to_next() {
        let mut counter = NonceCounter::new();
        counter.commit(7);
        assert_eq!(counter.next_cached(), Some(8));
        counter.commit(8);
        assert_eq!(counter.next_cached(), Some(9));
    }

    #[test]
    fn commit_never_moves_backwards() {
        let mut counter = NonceCounter::new();
        counter.commit(10);
        counter.commit(4);
        assert_eq!(counter.last_used(), Some(10));
    }

    #[test]
    fn uncommitted_nonce_is_reused() {
        let mut counter = NonceCounter::new();
        counter.commit(3);
        let attempt = counter.next_cached();
        // broadcast failed: nothing committed
        assert_eq!(counter.next_cached(), attempt);
    }
}
