// The immutable generation context shared by every phase of a run.
//
// `MorphContext` owns the catalog, the compatibility store, and the pair
// table. It is built once (phase 1 + phase 2) and then only borrowed, so the
// generator can read it from any number of rayon workers without locking.
// Building it is where empty catalogs are rejected: with no prefixes,
// suffixes, or lemmas every later phase would be vacuous.

use crate::catalog::{Catalog, CatalogDiagnostics};
use crate::compat::{CompatibilityStore, Relation};
use crate::error::MorphError;
use crate::pairs::PairTable;
use crate::types::MorphemeKind;

/// Catalog, rules, and precomputed pairs for one generation run.
#[derive(Debug)]
pub struct MorphContext {
    catalog: Catalog,
    compat: CompatibilityStore,
    pairs: PairTable,
    diagnostics: CatalogDiagnostics,
}

impl MorphContext {
    /// Validate the catalog and precompute the pair table.
    pub fn build(catalog: Catalog, compat: CompatibilityStore) -> Result<Self, MorphError> {
        if catalog.prefixes().is_empty() {
            return Err(MorphError::EmptyCatalog {
                kind: MorphemeKind::Prefix,
            });
        }
        if catalog.suffixes().is_empty() {
            return Err(MorphError::EmptyCatalog {
                kind: MorphemeKind::Suffix,
            });
        }
        if catalog.lemmas().is_empty() {
            return Err(MorphError::EmptyCatalog {
                kind: MorphemeKind::Stem,
            });
        }

        tracing::info!(
            prefixes = catalog.prefixes().len(),
            suffixes = catalog.suffixes().len(),
            lemmas = catalog.lemmas().len(),
            stems = catalog.stem_count(),
            categories = catalog.categories().len(),
            "catalog loaded"
        );
        for relation in Relation::ALL {
            tracing::debug!(?relation, rows = compat.len(relation), "compatibility rules");
        }

        let diagnostics = catalog.diagnostics(&compat);
        if !diagnostics.is_clean() {
            tracing::warn!(
                unruled = diagnostics.unruled_categories.len(),
                unused = diagnostics.unused_rule_categories.len(),
                "categories without a counterpart; they will not combine"
            );
            tracing::debug!(
                unruled = ?diagnostics.unruled_categories,
                unused = ?diagnostics.unused_rule_categories,
                "category mismatches"
            );
        }

        let pairs = PairTable::build(&catalog, &compat);
        tracing::info!(
            stem_categories = pairs.category_count(),
            pairs = pairs.total_pairs(),
            "prefix/suffix pairs precomputed"
        );

        Ok(MorphContext {
            catalog,
            compat,
            pairs,
            diagnostics,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn compat(&self) -> &CompatibilityStore {
        &self.compat
    }

    pub fn pairs(&self) -> &PairTable {
        &self.pairs
    }

    pub fn diagnostics(&self) -> &CatalogDiagnostics {
        &self.diagnostics
    }
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

    fn build(b: CatalogBuilder) -> Result<MorphContext, MorphError> {
        let (catalog, compat) = b.build()?;
        MorphContext::build(catalog, compat)
    }

    #[test]
    fn empty_prefix_catalog_is_fatal() {
        let mut b = CatalogBuilder::new();
        b.add_suffix(rec("", "Suff-0", "")).add_stem(rec("ktb", "PV", "katab_1"));
        assert_eq!(
            build(b).unwrap_err(),
            MorphError::EmptyCatalog {
                kind: MorphemeKind::Prefix
            }
        );
    }

    #[test]
    fn empty_suffix_catalog_is_fatal() {
        let mut b = CatalogBuilder::new();
        b.add_prefix(rec("", "Pref-0", "")).add_stem(rec("ktb", "PV", "katab_1"));
        assert_eq!(
            build(b).unwrap_err(),
            MorphError::EmptyCatalog {
                kind: MorphemeKind::Suffix
            }
        );
    }

    #[test]
    fn empty_lemma_catalog_is_fatal() {
        let mut b = CatalogBuilder::new();
        b.add_prefix(rec("", "Pref-0", "")).add_suffix(rec("", "Suff-0", ""));
        assert_eq!(
            build(b).unwrap_err(),
            MorphError::EmptyCatalog {
                kind: MorphemeKind::Stem
            }
        );
    }

    #[test]
    fn missing_rules_are_not_errors() {
        let mut b = CatalogBuilder::new();
        b.add_prefix(rec("", "Pref-0", ""))
            .add_suffix(rec("", "Suff-0", ""))
            .add_stem(rec("ktb", "PV", "katab_1"));
        let ctx = build(b).unwrap();
        assert_eq!(ctx.pairs().total_pairs(), 0);
        assert_eq!(ctx.diagnostics().unruled_categories.len(), 3);
    }

    #[test]
    fn rules_stay_available_after_build() {
        let mut b = CatalogBuilder::new();
        b.add_prefix(rec("", "Pref-0", ""))
            .add_suffix(rec("", "Suff-0", ""))
            .add_stem(rec("ktb", "PV", "katab_1"))
            .add_rule(Relation::PrefixStem, "Pref-0", "PV")
            .add_rule(Relation::StemSuffix, "PV", "Suff-0")
            .add_rule(Relation::PrefixSuffix, "Pref-0", "Suff-0")
            .add_rule(Relation::PrefixStem, "Pref-0", "IV");
        let ctx = build(b).unwrap();

        let categories = ctx.catalog().categories();
        let id = |name: &str| categories.get(name).unwrap();
        assert!(ctx.compat().allows(Relation::PrefixStem, id("Pref-0"), id("PV")));
        assert!(ctx.compat().allows(Relation::PrefixStem, id("Pref-0"), id("IV")));
        assert!(!ctx.compat().allows(Relation::StemSuffix, id("IV"), id("Suff-0")));
        assert_eq!(ctx.compat().len(Relation::PrefixStem), 2);

        // "IV" is named by a rule but carried by no morpheme.
        assert_eq!(
            ctx.diagnostics().unused_rule_categories,
            vec!["IV".to_string()]
        );
        assert!(ctx.diagnostics().unruled_categories.is_empty());
        assert_eq!(ctx.pairs().pairs_for(id("PV")).len(), 1);
    }
}
