// Index consolidation: merge lemmas that are indistinguishable by their forms.
//
// Homographs often generate exactly the same inflections. Rather than
// emitting the same index forms under several entries, the consolidator
// inverts the form → lemma relation and groups forms by the exact list of
// lemmas that generated them. Each group becomes one entry: its index forms
// are the group's forms, and its description is the first lemma's
// description followed by headword + description of every further lemma.
//
// Lemma lists are built in input order, so the merged description order is
// the input order. Groups are emitted in ascending order of their lemma
// index lists, which is deterministic for a given input. Lemmas with no
// forms never reach the inverse map; they are only counted.
//
// Runs single-threaded after generation: building the inverse map is the
// only shared-write step of a run.

use crate::generator::LemmaRecord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Indices into the record slice; most forms belong to one or two lemmas.
type LemmaList = SmallVec<[u32; 2]>;

/// One dictionary entry, ready for the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedEntry {
    /// Headword markup of the first merged lemma.
    pub headword: String,
    /// Index forms, in the caller's order (lexicographic by default).
    pub forms: Vec<String>,
    /// Merged description markup.
    pub description: String,
    /// Ids of the merged lemmas, in input order.
    pub lemmas: Vec<String>,
}

/// Counters describing a consolidation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationStats {
    /// Lemma records with at least one form.
    pub original_entries: usize,
    /// Entries after merging.
    pub merged_entries: usize,
    /// Lemma records with no forms (excluded from the entries).
    pub empty_entries: usize,
    /// Total index forms across all entries.
    pub index_size: usize,
}

impl std::ops::AddAssign for ConsolidationStats {
    fn add_assign(&mut self, other: Self) {
        self.original_entries += other.original_entries;
        self.merged_entries += other.merged_entries;
        self.empty_entries += other.empty_entries;
        self.index_size += other.index_size;
    }
}

/// Entries plus counters.
#[derive(Clone, Debug, Default)]
pub struct Consolidation {
    pub entries: Vec<ConsolidatedEntry>,
    pub stats: ConsolidationStats,
}

/// Consolidate with lexicographically ordered index forms.
pub fn consolidate(records: &[LemmaRecord]) -> Consolidation {
    consolidate_by(records, |a, b| a.cmp(b))
}

/// Consolidate, ordering each entry's index forms with `order`.
pub fn consolidate_by<F>(records: &[LemmaRecord], order: F) -> Consolidation
where
    F: Fn(&str, &str) -> Ordering,
{
    let mut stats = ConsolidationStats::default();

    let mut inverse: FxHashMap<&str, LemmaList> = FxHashMap::default();
    for (i, record) in records.iter().enumerate() {
        if record.is_empty() {
            stats.empty_entries += 1;
            continue;
        }
        stats.original_entries += 1;
        // Record forms are deduplicated, so each (form, lemma) pair lands once.
        for form in &record.forms {
            inverse.entry(form.as_str()).or_default().push(i as u32);
        }
    }

    let mut classes: BTreeMap<LemmaList, Vec<&str>> = BTreeMap::new();
    for (form, lemmas) in inverse {
        classes.entry(lemmas).or_default().push(form);
    }

    let entries: Vec<ConsolidatedEntry> = classes
        .into_iter()
        .map(|(lemmas, mut forms)| {
            forms.sort_unstable_by(|a, b| order(a, b));
            merge_entry(records, &lemmas, forms)
        })
        .collect();

    stats.merged_entries = entries.len();
    stats.index_size = entries.iter().map(|e| e.forms.len()).sum();

    tracing::debug!(
        original = stats.original_entries,
        merged = stats.merged_entries,
        empty = stats.empty_entries,
        "consolidated lemma records"
    );

    Consolidation { entries, stats }
}

fn merge_entry(records: &[LemmaRecord], lemmas: &[u32], forms: Vec<&str>) -> ConsolidatedEntry {
    let first = &records[lemmas[0] as usize];
    let mut description = first.description.clone();
    for &i in &lemmas[1..] {
        let other = &records[i as usize];
        description.push_str(&other.headword);
        description.push_str(&other.description);
    }
    ConsolidatedEntry {
        headword: first.headword.clone(),
        forms: forms.into_iter().map(str::to_string).collect(),
        description,
        lemmas: lemmas
            .iter()
            .map(|&i| records[i as usize].lemma.clone())
            .collect(),
    }
}
