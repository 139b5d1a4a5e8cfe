// Morpheme catalog: the prefix, stem, and suffix inventories.
//
// `CatalogBuilder` receives already-parsed table rows (`MorphemeRecord`s and
// relation rows) in file order and produces an immutable `Catalog` plus the
// `CompatibilityStore`. Categories from both the morpheme tables and the
// relation tables are interned through one shared `CategoryInterner`, so a
// category that only appears in a rule still gets an id (it just never
// matches anything).
//
// Stems arrive grouped by lemma: consecutive rows with the same lemma id form
// one `LemmaGroup`, whose root is the first stem's root. A lemma id that
// reappears after another lemma is folded back into its first group.
//
// See also: `context.rs`, which validates the catalog and precomputes pairs.

use crate::compat::{CompatibilityStore, Relation};
use crate::error::MorphError;
use crate::types::{CategoryId, CategoryInterner, LemmaGroup, Morpheme, MorphemeRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Immutable morpheme inventories, in table order.
#[derive(Clone, Debug)]
pub struct Catalog {
    categories: CategoryInterner,
    prefixes: Vec<Morpheme>,
    suffixes: Vec<Morpheme>,
    lemmas: Vec<LemmaGroup>,
    orphan_stems: usize,
}

impl Catalog {
    pub fn categories(&self) -> &CategoryInterner {
        &self.categories
    }

    pub fn prefixes(&self) -> &[Morpheme] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[Morpheme] {
        &self.suffixes
    }

    pub fn lemmas(&self) -> &[LemmaGroup] {
        &self.lemmas
    }

    pub fn prefix(&self, index: u32) -> &Morpheme {
        &self.prefixes[index as usize]
    }

    pub fn suffix(&self, index: u32) -> &Morpheme {
        &self.suffixes[index as usize]
    }

    pub fn stem_count(&self) -> usize {
        self.lemmas.iter().map(|l| l.stems().len()).sum()
    }

    /// Stem rows dropped at load time for lacking a lemma id.
    pub fn orphan_stems(&self) -> usize {
        self.orphan_stems
    }

    /// Distinct stem categories in first-appearance order.
    pub fn stem_categories(&self) -> Vec<CategoryId> {
        let mut seen = FxHashSet::default();
        self.lemmas
            .iter()
            .flat_map(|l| l.stems())
            .map(|s| s.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Categories that the morpheme tables and the rule tables disagree on.
    ///
    /// Neither case is an error: an unruled category just never combines.
    pub fn diagnostics(&self, compat: &CompatibilityStore) -> CatalogDiagnostics {
        let mentioned = compat.mentioned_categories();
        let used: FxHashSet<CategoryId> = self
            .prefixes
            .iter()
            .chain(self.suffixes.iter())
            .chain(self.lemmas.iter().flat_map(|l| l.stems()))
            .map(|m| m.category)
            .collect();

        let mut unruled: Vec<String> = used
            .difference(&mentioned)
            .map(|&c| self.categories.name(c).to_string())
            .collect();
        let mut unused: Vec<String> = mentioned
            .difference(&used)
            .map(|&c| self.categories.name(c).to_string())
            .collect();
        unruled.sort();
        unused.sort();

        CatalogDiagnostics {
            unruled_categories: unruled,
            unused_rule_categories: unused,
        }
    }
}

/// Mismatches between morpheme categories and rule categories.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CatalogDiagnostics {
    /// Categories carried by some morpheme but named by no rule.
    pub unruled_categories: Vec<String>,
    /// Categories named by some rule but carried by no morpheme.
    pub unused_rule_categories: Vec<String>,
}

impl CatalogDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.unruled_categories.is_empty() && self.unused_rule_categories.is_empty()
    }

    pub fn count(&self) -> usize {
        self.unruled_categories.len() + self.unused_rule_categories.len()
    }
}

/// Pending lemma group while stems are still arriving.
struct PendingLemma {
    id: String,
    root: String,
    stems: Vec<Morpheme>,
}

/// Accumulates table rows, then freezes them into a `Catalog`.
#[derive(Default)]
pub struct CatalogBuilder {
    categories: CategoryInterner,
    prefixes: Vec<Morpheme>,
    suffixes: Vec<Morpheme>,
    lemmas: Vec<PendingLemma>,
    lemma_index: FxHashMap<String, usize>,
    orphan_stems: usize,
    compat: CompatibilityStore,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_prefix(&mut self, record: MorphemeRecord) -> &mut Self {
        let m = Morpheme::from_record(record, &mut self.categories);
        self.prefixes.push(m);
        self
    }

    pub fn add_suffix(&mut self, record: MorphemeRecord) -> &mut Self {
        let m = Morpheme::from_record(record, &mut self.categories);
        self.suffixes.push(m);
        self
    }

    /// Add a stem row. Rows without a lemma id cannot be grouped and are
    /// dropped (counted in `orphan_stems`).
    pub fn add_stem(&mut self, record: MorphemeRecord) -> &mut Self {
        if record.lemma.is_empty() {
            self.orphan_stems += 1;
            return self;
        }
        let m = Morpheme::from_record(record, &mut self.categories);

        let current = self.lemmas.last().filter(|l| l.id == m.lemma).is_some();
        if current {
            if let Some(last) = self.lemmas.last_mut() {
                last.stems.push(m);
            }
        } else if let Some(&idx) = self.lemma_index.get(&m.lemma) {
            tracing::debug!(lemma = %m.lemma, "lemma reappears out of sequence; merging stems");
            self.lemmas[idx].stems.push(m);
        } else {
            self.lemma_index.insert(m.lemma.clone(), self.lemmas.len());
            self.lemmas.push(PendingLemma {
                id: m.lemma.clone(),
                root: m.root.clone(),
                stems: vec![m],
            });
        }
        self
    }

    /// Add one row of a compatibility table.
    pub fn add_rule(&mut self, relation: Relation, left: &str, right: &str) -> &mut Self {
        let l = self.categories.intern(left);
        let r = self.categories.intern(right);
        self.compat.insert(relation, l, r);
        self
    }

    /// Stem rows dropped so far for lacking a lemma id.
    pub fn orphan_stems(&self) -> usize {
        self.orphan_stems
    }

    /// Freeze into a catalog and its compatibility store.
    pub fn build(self) -> Result<(Catalog, CompatibilityStore), MorphError> {
        if self.orphan_stems > 0 {
            tracing::warn!(count = self.orphan_stems, "dropped stems without a lemma id");
        }
        let lemmas = self
            .lemmas
            .into_iter()
            .map(|p| LemmaGroup::new(p.id, p.root, p.stems))
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Catalog {
            categories: self.categories,
            prefixes: self.prefixes,
            suffixes: self.suffixes,
            lemmas,
            orphan_stems: self.orphan_stems,
        };
        Ok((catalog, self.compat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(unvowelled: &str, category: &str, lemma: &str, root: &str) -> MorphemeRecord {
        MorphemeRecord {
            unvowelled: unvowelled.into(),
            vowelled: unvowelled.into(),
            category: category.into(),
            pos: "noun".into(),
            gloss: unvowelled.into(),
            root: root.into(),
            lemma: lemma.into(),
        }
    }

    #[test]
    fn consecutive_stems_group_by_lemma() {
        let mut b = CatalogBuilder::new();
        b.add_stem(rec("ktb", "PV", "katab-u_1", "ktb"))
            .add_stem(rec("ktb", "IV", "katab-u_1", "ktb"))
            .add_stem(rec("ktAb", "N", "kitAb_1", "ktb"));
        let (catalog, _) = b.build().unwrap();

        assert_eq!(catalog.lemmas().len(), 2);
        assert_eq!(catalog.lemmas()[0].id(), "katab-u_1");
        assert_eq!(catalog.lemmas()[0].stems().len(), 2);
        assert_eq!(catalog.lemmas()[1].root(), "ktb");
        assert_eq!(catalog.stem_count(), 3);
    }

    #[test]
    fn out_of_sequence_lemma_folds_into_first_group() {
        let mut b = CatalogBuilder::new();
        b.add_stem(rec("a", "N", "x_1", ""))
            .add_stem(rec("b", "N", "y_1", ""))
            .add_stem(rec("c", "N", "x_1", ""));
        let (catalog, _) = b.build().unwrap();
        assert_eq!(catalog.lemmas().len(), 2);
        assert_eq!(catalog.lemmas()[0].stems().len(), 2);
    }

    #[test]
    fn stems_without_lemma_are_dropped() {
        let mut b = CatalogBuilder::new();
        b.add_stem(rec("a", "N", "", ""));
        assert_eq!(b.orphan_stems(), 1);
        let (catalog, _) = b.build().unwrap();
        assert!(catalog.lemmas().is_empty());
        assert_eq!(catalog.orphan_stems(), 1);
    }

    #[test]
    fn rules_and_morphemes_share_category_ids() {
        let mut b = CatalogBuilder::new();
        b.add_prefix(rec("Al", "Pref-Al", "", ""))
            .add_stem(rec("ktAb", "N", "kitAb_1", "ktb"))
            .add_rule(Relation::PrefixStem, "Pref-Al", "N");
        let (catalog, compat) = b.build().unwrap();

        let pref = catalog.prefixes()[0].category;
        let stem = catalog.lemmas()[0].stems()[0].category;
        assert!(compat.allows(Relation::PrefixStem, pref, stem));
    }

    #[test]
    fn stem_categories_are_distinct_in_first_seen_order() {
        let mut b = CatalogBuilder::new();
        b.add_stem(rec("a", "N", "x_1", ""))
            .add_stem(rec("b", "PV", "y_1", ""))
            .add_stem(rec("c", "N", "z_1", ""));
        let (catalog, _) = b.build().unwrap();
        let names: Vec<&str> = catalog
            .stem_categories()
            .into_iter()
            .map(|c| catalog.categories().name(c))
            .collect();
        assert_eq!(names, vec!["N", "PV"]);
    }

    #[test]
    fn diagnostics_report_both_directions() {
        let mut b = CatalogBuilder::new();
        b.add_prefix(rec("Al", "Pref-Al", "", ""))
            .add_suffix(rec("p", "NSuff-p", "", ""))
            .add_stem(rec("ktAb", "N", "kitAb_1", "ktb"))
            .add_rule(Relation::PrefixStem, "Pref-Al", "N")
            .add_rule(Relation::StemSuffix, "N", "NSuff-ap");
        let (catalog, compat) = b.build().unwrap();
        let diag = catalog.diagnostics(&compat);

        assert_eq!(diag.unruled_categories, vec!["NSuff-p".to_string()]);
        assert_eq!(diag.unused_rule_categories, vec!["NSuff-ap".to_string()]);
        assert_eq!(diag.count(), 2);
        assert!(!diag.is_clean());
    }
}
