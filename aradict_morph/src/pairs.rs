// Legal (prefix, suffix) pairs per stem category.
//
// For a stem of category C, a prefix p and suffix s may surround it iff
//   prefix-stem(p.cat, C) ∧ stem-suffix(C, s.cat) ∧ prefix-suffix(p.cat, s.cat).
// Categories number in the tens and morphemes in the low hundreds, so each
// distinct stem category gets the full prefix × suffix cross product, once.
// Categories are independent, so the table is built in parallel with rayon.
//
// Pair order is a contract: prefix catalog order, then suffix catalog order.
// The form generator renders one gloss line per stem from the *first* pair,
// so this order decides which vowelled form appears in the description.

use crate::catalog::Catalog;
use crate::compat::{CompatibilityStore, Relation};
use crate::types::{CategoryId, Morpheme};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Indices of a prefix and a suffix in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MorphemePair {
    pub prefix: u32,
    pub suffix: u32,
}

/// Stem category → ordered legal pairs.
#[derive(Clone, Debug, Default)]
pub struct PairTable {
    by_category: FxHashMap<CategoryId, Vec<MorphemePair>>,
}

impl PairTable {
    /// Precompute pairs for every stem category in the catalog.
    pub fn build(catalog: &Catalog, compat: &CompatibilityStore) -> Self {
        let categories = catalog.stem_categories();
        let by_category = categories
            .into_par_iter()
            .map(|cat| (cat, legal_pairs(catalog, compat, cat)))
            .collect();
        PairTable { by_category }
    }

    /// The legal pairs for `stem_category`; empty for categories that never
    /// combine (or that no stem carries).
    pub fn pairs_for(&self, stem_category: CategoryId) -> &[MorphemePair] {
        self.by_category
            .get(&stem_category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolved pairs for `stem_category`, in contract order.
    pub fn resolved<'a>(
        &'a self,
        catalog: &'a Catalog,
        stem_category: CategoryId,
    ) -> impl Iterator<Item = (&'a Morpheme, &'a Morpheme)> + 'a {
        self.pairs_for(stem_category)
            .iter()
            .map(move |p| (catalog.prefix(p.prefix), catalog.suffix(p.suffix)))
    }

    /// Total pairs across all categories.
    pub fn total_pairs(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn category_count(&self) -> usize {
        self.by_category.len()
    }
}

/// Cross product for one stem category, filtered by all three relations.
fn legal_pairs(
    catalog: &Catalog,
    compat: &CompatibilityStore,
    stem_cat: CategoryId,
) -> Vec<MorphemePair> {
    let mut out = Vec::new();
    for (pi, prefix) in catalog.prefixes().iter().enumerate() {
        if !compat.allows(Relation::PrefixStem, prefix.category, stem_cat) {
            continue;
        }
        for (si, suffix) in catalog.suffixes().iter().enumerate() {
            if compat.allows(Relation::StemSuffix, stem_cat, suffix.category)
                && compat.allows(Relation::PrefixSuffix, prefix.category, suffix.category)
            {
                out.push(MorphemePair {
                    prefix: pi as u32,
                    suffix: si as u32,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use crate::types::MorphemeRecord;

    fn rec(text: &str, category: &str, lemma: &str) -> MorphemeRecord {
        MorphemeRecord {
            unvowelled: text.into(),
            vowelled: text.into(),
            category: category.into(),
            lemma: lemma.into(),
            ..Default::default()
        }
    }

    /// Two prefixes, two suffixes, two stem categories, with a partial grammar.
    fn grammar() -> (Catalog, CompatibilityStore) {
        let mut b = CatalogBuilder::new();
        b.add_prefix(rec("", "Pref-0", ""))
            .add_prefix(rec("Al", "Pref-Al", ""))
            .add_suffix(rec("", "Suff-0", ""))
            .add_suffix(rec("p", "NSuff-p", ""))
            .add_stem(rec("ktAb", "N", "kitAb_1"))
            .add_stem(rec("ktb", "PV", "katab_1"))
            .add_rule(Relation::PrefixStem, "Pref-0", "N")
            .add_rule(Relation::PrefixStem, "Pref-Al", "N")
            .add_rule(Relation::PrefixStem, "Pref-0", "PV")
            .add_rule(Relation::StemSuffix, "N", "Suff-0")
            .add_rule(Relation::StemSuffix, "N", "NSuff-p")
            .add_rule(Relation::StemSuffix, "PV", "Suff-0")
            .add_rule(Relation::PrefixSuffix, "Pref-0", "Suff-0")
            .add_rule(Relation::PrefixSuffix, "Pref-0", "NSuff-p")
            .add_rule(Relation::PrefixSuffix, "Pref-Al", "NSuff-p");
        b.build().unwrap()
    }

    #[test]
    fn pairs_satisfy_all_three_relations_and_are_exhaustive() {
        let (catalog, compat) = grammar();
        let table = PairTable::build(&catalog, &compat);

        for cat in catalog.stem_categories() {
            let pairs = table.pairs_for(cat);
            for (pi, p) in catalog.prefixes().iter().enumerate() {
                for (si, s) in catalog.suffixes().iter().enumerate() {
                    let legal = compat.allows(Relation::PrefixStem, p.category, cat)
                        && compat.allows(Relation::StemSuffix, cat, s.category)
                        && compat.allows(Relation::PrefixSuffix, p.category, s.category);
                    let present = pairs.contains(&MorphemePair {
                        prefix: pi as u32,
                        suffix: si as u32,
                    });
                    assert_eq!(legal, present, "prefix {pi}, suffix {si}");
                }
            }
        }
    }

    #[test]
    fn pair_order_follows_prefix_then_suffix_catalog_order() {
        let (catalog, compat) = grammar();
        let table = PairTable::build(&catalog, &compat);
        let noun = catalog.categories().get("N").unwrap();

        let pairs = table.pairs_for(noun);
        assert_eq!(
            pairs,
            &[
                MorphemePair { prefix: 0, suffix: 0 },
                MorphemePair { prefix: 0, suffix: 1 },
                MorphemePair { prefix: 1, suffix: 1 },
            ]
        );

        let texts: Vec<(String, String)> = table
            .resolved(&catalog, noun)
            .map(|(p, s)| (p.unvowelled.clone(), s.unvowelled.clone()))
            .collect();
        assert_eq!(texts[2], ("Al".to_string(), "p".to_string()));
    }

    #[test]
    fn unknown_category_has_no_pairs() {
        let (catalog, compat) = grammar();
        let table = PairTable::build(&catalog, &compat);
        assert!(table.pairs_for(CategoryId(1000)).is_empty());
        assert_eq!(table.category_count(), 2);
        assert_eq!(table.total_pairs(), 4);
    }
}
