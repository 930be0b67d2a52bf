// ============================================
// Ranked Set (pure leaderboard core)
// ============================================
//
// Holds the authoritative ordered collection of scored entities and applies
// replacement updates while preserving two invariants:
// 1. Entities are sorted by score descending after every operation
// 2. Each id appears at most once
//
// Every mutation is a pure old-state + update -> new-state transform, so the
// session layer can swap snapshots atomically and readers never observe a
// half-applied update. At the expected scale (tens of entries) a full
// re-sort per update is fine.

use crate::models::ScoredEntity;

/// The always-sorted leaderboard state. Cheap to clone at this scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedSet {
    entities: Vec<ScoredEntity>,
}

impl RankedSet {
    /// Build the initial set from a batch of entities.
    ///
    /// Deduplicates by id (last occurrence wins) and sorts by score
    /// descending. Source batches are assumed pre-deduplicated, but a
    /// duplicate in the input must not break the uniqueness invariant.
    pub fn from_entities(entities: Vec<ScoredEntity>) -> Self {
        let mut deduped: Vec<ScoredEntity> = Vec::with_capacity(entities.len());
        for entity in entities {
            match deduped.iter_mut().find(|e| e.id == entity.id) {
                Some(existing) => *existing = entity,
                None => deduped.push(entity),
            }
        }

        let mut set = Self { entities: deduped };
        set.resort();
        set
    }

    /// Apply one replacement snapshot, returning the new state.
    ///
    /// A known id has its full record replaced (label included); an unknown
    /// id is inserted. Ties keep prior relative order: the sort is stable
    /// and new entities enter at the tail before sorting.
    pub fn apply_update(&self, updated: ScoredEntity) -> Self {
        let mut next = self.clone();
        match next.entities.iter_mut().find(|e| e.id == updated.id) {
            Some(existing) => *existing = updated,
            None => next.entities.push(updated),
        }
        next.resort();
        next
    }

    /// First `min(n, len)` entities; always a prefix of the sorted sequence.
    pub fn top_n(&self, n: usize) -> &[ScoredEntity] {
        &self.entities[..n.min(self.entities.len())]
    }

    /// The full sorted sequence.
    pub fn entities(&self) -> &[ScoredEntity] {
        &self.entities
    }

    pub fn get(&self, id: &str) -> Option<&ScoredEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn resort(&mut self) {
        // Scores are validated finite at the boundary; Equal is only a
        // fallback so a stray NaN cannot panic the sort.
        self.entities.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, score: f64) -> ScoredEntity {
        ScoredEntity::new(id, id.to_uppercase(), score)
    }

    fn ids(set: &RankedSet) -> Vec<&str> {
        set.entities().iter().map(|e| e.id.as_str()).collect()
    }

    fn assert_sorted_unique(set: &RankedSet) {
        for pair in set.entities().windows(2) {
            assert!(pair[0].score >= pair[1].score, "set not sorted descending");
        }
        let mut seen: Vec<&str> = set.entities().iter().map(|e| e.id.as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), set.len(), "duplicate id in set");
    }

    #[test]
    fn test_from_entities_sorts_descending() {
        let set = RankedSet::from_entities(vec![
            entity("b", 5.0),
            entity("a", 10.0),
            entity("c", 7.5),
        ]);
        assert_eq!(ids(&set), vec!["a", "c", "b"]);
        assert_sorted_unique(&set);
    }

    #[test]
    fn test_from_entities_dedup_last_wins() {
        let set = RankedSet::from_entities(vec![
            entity("a", 10.0),
            entity("b", 5.0),
            ScoredEntity::new("a", "Alice Again", 3.0),
        ]);
        assert_eq!(set.len(), 2);
        let a = set.get("a").unwrap();
        assert_eq!(a.label, "Alice Again");
        assert_eq!(a.score, 3.0);
        assert_eq!(ids(&set), vec!["b", "a"]);
    }

    #[test]
    fn test_apply_update_known_id_replaces_full_record() {
        let set = RankedSet::from_entities(vec![entity("a", 10.0), entity("b", 5.0)]);
        let next = set.apply_update(ScoredEntity::new("b", "Bobby", 20.0));

        assert_eq!(next.len(), set.len());
        assert_eq!(ids(&next), vec!["b", "a"]);
        assert_eq!(next.get("b").unwrap().label, "Bobby");
        // Prior state untouched
        assert_eq!(ids(&set), vec!["a", "b"]);
    }

    #[test]
    fn test_apply_update_unknown_id_inserts() {
        let set = RankedSet::from_entities(vec![entity("a", 10.0), entity("b", 5.0)]);
        let next = set.apply_update(entity("c", 7.0));
        assert_eq!(next.len(), set.len() + 1);
        assert_eq!(ids(&next), vec!["a", "c", "b"]);
        assert_sorted_unique(&next);
    }

    #[test]
    fn test_apply_update_is_idempotent() {
        let set = RankedSet::from_entities(vec![entity("a", 10.0), entity("b", 5.0)]);
        let update = entity("b", 20.0);
        let once = set.apply_update(update.clone());
        let twice = once.apply_update(update);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_overtake_then_new_entrant_sequence() {
        // init [a:10, b:5] -> apply b:20 -> apply c:15
        let set = RankedSet::from_entities(vec![entity("a", 10.0), entity("b", 5.0)]);
        assert_eq!(ids(&set), vec!["a", "b"]);
        assert_eq!(set.top_n(2).len(), 2);

        let set = set.apply_update(entity("b", 20.0));
        assert_eq!(ids(&set), vec!["b", "a"]);

        let set = set.apply_update(entity("c", 15.0));
        assert_eq!(ids(&set), vec!["b", "c", "a"]);
        assert_sorted_unique(&set);
    }

    #[test]
    fn test_ties_keep_prior_relative_order() {
        let set = RankedSet::from_entities(vec![entity("a", 10.0), entity("b", 10.0)]);
        assert_eq!(ids(&set), vec!["a", "b"]);

        // New entity tying an existing score lands after it
        let set = set.apply_update(entity("c", 10.0));
        assert_eq!(ids(&set), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_top_n_is_a_prefix_and_bounded() {
        let set = RankedSet::from_entities(vec![
            entity("a", 10.0),
            entity("b", 5.0),
            entity("c", 1.0),
        ]);
        assert_eq!(set.top_n(0).len(), 0);
        assert_eq!(set.top_n(2), &set.entities()[..2]);
        assert_eq!(set.top_n(100).len(), 3);
    }

    #[test]
    fn test_random_update_sequence_holds_invariants() {
        let mut set = RankedSet::from_entities(vec![entity("a", 10.0), entity("b", 5.0)]);
        let updates = [
            ("a", 3.0),
            ("c", 8.0),
            ("b", 8.0),
            ("d", -2.0),
            ("c", 0.5),
            ("a", 3.0),
        ];
        for (id, score) in updates {
            set = set.apply_update(entity(id, score));
            assert_sorted_unique(&set);
        }
        assert_eq!(set.len(), 4);
    }
}
