// Category compatibility store: the three binary relations of the grammar.
//
// A word is prefix + stem + suffix, and each of the three pairings has its
// own table (`tableab`, `tablebc`, `tableac` in the BAMA data). Each relation
// maps a left category to the set of right categories it permits.
//
// The store is write-once, read-many: rows are inserted while the catalog is
// built and only queried afterwards. Duplicate rows collapse, insertion order
// is irrelevant, and a left category with no rows simply allows nothing.

use crate::types::CategoryId;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Which of the three compatibility tables a query refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Prefix category → stem categories (`tableab`).
    PrefixStem,
    /// Stem category → suffix categories (`tablebc`).
    StemSuffix,
    /// Prefix category → suffix categories (`tableac`).
    PrefixSuffix,
}

impl Relation {
    pub const ALL: [Relation; 3] = [
        Relation::PrefixStem,
        Relation::StemSuffix,
        Relation::PrefixSuffix,
    ];

    fn index(self) -> usize {
        match self {
            Relation::PrefixStem => 0,
            Relation::StemSuffix => 1,
            Relation::PrefixSuffix => 2,
        }
    }
}

/// The three compatibility relations over interned categories.
#[derive(Clone, Debug, Default)]
pub struct CompatibilityStore {
    relations: [FxHashMap<CategoryId, FxHashSet<CategoryId>>; 3],
}

impl CompatibilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `left` permits `right` under `relation`. Idempotent.
    pub fn insert(&mut self, relation: Relation, left: CategoryId, right: CategoryId) {
        self.relations[relation.index()]
            .entry(left)
            .or_default()
            .insert(right);
    }

    /// Whether `left` permits `right` under `relation`. Unknown `left`
    /// categories permit nothing.
    pub fn allows(&self, relation: Relation, left: CategoryId, right: CategoryId) -> bool {
        self.relations[relation.index()]
            .get(&left)
            .is_some_and(|rights| rights.contains(&right))
    }

    /// Every category mentioned on either side of any relation.
    pub fn mentioned_categories(&self) -> FxHashSet<CategoryId> {
        let mut out = FxHashSet::default();
        for relation in &self.relations {
            for (left, rights) in relation {
                out.insert(*left);
                out.extend(rights.iter().copied());
            }
        }
        out
    }

    /// Number of distinct (left, right) rows in one relation.
    pub fn len(&self, relation: Relation) -> usize {
        self.relations[relation.index()]
            .values()
            .map(FxHashSet::len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: CategoryId = CategoryId(0);
    const B: CategoryId = CategoryId(1);
    const C: CategoryId = CategoryId(2);

    #[test]
    fn allows_only_inserted_pairs() {
        let mut store = CompatibilityStore::new();
        store.insert(Relation::PrefixStem, A, B);

        assert!(store.allows(Relation::PrefixStem, A, B));
        assert!(!store.allows(Relation::PrefixStem, B, A));
        assert!(!store.allows(Relation::PrefixStem, A, C));
        // Relations are independent tables.
        assert!(!store.allows(Relation::StemSuffix, A, B));
        assert!(!store.allows(Relation::PrefixSuffix, A, B));
    }

    #[test]
    fn unknown_left_category_allows_nothing() {
        let store = CompatibilityStore::new();
        for relation in Relation::ALL {
            assert!(!store.allows(relation, CategoryId(99), A));
        }
    }

    #[test]
    fn construction_is_idempotent_and_order_independent() {
        let rows = [(A, B), (B, C), (A, C), (A, B), (A, B)];

        let mut forward = CompatibilityStore::new();
        for &(l, r) in &rows {
            forward.insert(Relation::StemSuffix, l, r);
        }
        let mut backward = CompatibilityStore::new();
        for &(l, r) in rows.iter().rev() {
            backward.insert(Relation::StemSuffix, l, r);
        }

        assert_eq!(forward.len(Relation::StemSuffix), 3);
        for l in [A, B, C] {
            for r in [A, B, C] {
                let inserted = rows.contains(&(l, r));
                assert_eq!(forward.allows(Relation::StemSuffix, l, r), inserted);
                assert_eq!(backward.allows(Relation::StemSuffix, l, r), inserted);
            }
        }
    }

    #[test]
    fn mentioned_categories_cover_both_sides() {
        let mut store = CompatibilityStore::new();
        store.insert(Relation::PrefixStem, A, B);
        store.insert(Relation::PrefixSuffix, A, C);
        let mentioned = store.mentioned_categories();
        assert_eq!(mentioned.len(), 3);
        assert!(mentioned.contains(&C));
    }
}
