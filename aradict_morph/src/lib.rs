// aradict_morph — morphological form generation for the Arabic-English
// Kindle dictionary.
//
// This crate turns a Buckwalter-style morpheme catalog (prefixes, stems
// grouped by lemma, suffixes, and three pairwise compatibility relations)
// into consolidated dictionary entries: every legal prefix+stem+suffix
// surface form of each lemma, in Arabic script, grouped so that lemmas
// indistinguishable by their forms share one entry. It does no file I/O;
// table parsing and Kindle output live in `aradict_kindle`.
//
// Module overview:
// - `types.rs`:       Category interning, Morpheme, LemmaGroup.
// - `compat.rs`:      CompatibilityStore — the three category relations.
// - `catalog.rs`:     Catalog + CatalogBuilder (groups stems by lemma), diagnostics.
// - `pairs.rs`:       PairTable — legal (prefix, suffix) pairs per stem category.
// - `context.rs`:     MorphContext — validated catalog + rules + pairs, shared read-only.
// - `translit.rs`:    Buckwalter ↔ Unicode, vowel stripping, optional-vowel spellings, ALA-LC.
// - `filter.rs`:      AcceptFilter — accepted words from frequency lists.
// - `generator.rs`:   FormGenerator — per-lemma forms and entry markup (parallel).
// - `consolidate.rs`: Inverse index + merging of lemmas with identical form sets.
// - `run.rs`:         run() — lemma selection, batching, RunReport.
// - `error.rs`:       MorphError.
//
// Phases: catalog build (sequential), pair precomputation (parallel across
// stem categories), generation (parallel across lemmas, order-preserving),
// consolidation (single-threaded).

pub mod catalog;
pub mod compat;
pub mod consolidate;
pub mod context;
pub mod error;
pub mod filter;
pub mod generator;
pub mod pairs;
pub mod run;
pub mod translit;
pub mod types;

pub use catalog::{Catalog, CatalogBuilder, CatalogDiagnostics};
pub use compat::{CompatibilityStore, Relation};
pub use consolidate::{ConsolidatedEntry, Consolidation, ConsolidationStats, consolidate};
pub use context::MorphContext;
pub use error::MorphError;
pub use filter::AcceptFilter;
pub use generator::{FormGenerator, GenerateOptions, LemmaRecord};
pub use run::{DictionaryOutput, RunOptions, RunReport, run};
pub use types::{CategoryId, LemmaGroup, Morpheme, MorphemeKind, MorphemeRecord};
