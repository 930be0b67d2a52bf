use std::collections::HashMap;
use tokio::time::{Duration, Instant};

/// Transient "just updated" markers, keyed by entity id.
///
/// Purely cosmetic state for the presentation layer; it never affects
/// ranking. Each mark carries a deadline rather than owning a timer, so
/// nothing to cancel on teardown: expired marks are pruned whenever the
/// state is read or written.
#[derive(Debug, Default)]
pub struct FlashState {
    deadlines: HashMap<String, Instant>,
}

impl FlashState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as freshly updated for `duration` from now. Re-marking an
    /// already-flashing id extends its deadline.
    pub fn mark(&mut self, id: impl Into<String>, duration: Duration) {
        self.prune(Instant::now());
        self.deadlines.insert(id.into(), Instant::now() + duration);
    }

    /// Ids whose flash window is still open.
    pub fn active_ids(&mut self) -> Vec<String> {
        self.prune(Instant::now());
        self.deadlines.keys().cloned().collect()
    }

    pub fn is_flashing(&mut self, id: &str) -> bool {
        self.prune(Instant::now());
        self.deadlines.contains_key(id)
    }

    fn prune(&mut self, now: Instant) {
        self.deadlines.retain(|_, deadline| *deadline > now);
    }
}
