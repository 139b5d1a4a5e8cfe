// Typed failures of a generation run.
//
// Only structural problems escalate: an empty catalog (every downstream
// computation would be vacuous) and broken lemma invariants (a defect in
// whatever assembled the catalog). Compatibility misses and filter misses
// are ordinary "no match" outcomes and never appear here; categories that
// no rule mentions are reported through `CatalogDiagnostics` instead.

use crate::types::MorphemeKind;

/// Errors raised while building the generation context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MorphError {
    /// The prefix, suffix, or stem catalog has no entries after load.
    #[error("{kind} catalog is empty")]
    EmptyCatalog { kind: MorphemeKind },

    /// A stem's lemma field disagrees with the group that owns it.
    #[error("stem {stem_index} of lemma '{lemma}' belongs to lemma '{found}'")]
    InvariantViolation {
        lemma: String,
        stem_index: usize,
        found: String,
    },

    /// A lemma group was assembled with no stems.
    #[error("lemma '{lemma}' has no stems")]
    EmptyLemma { lemma: String },
}
