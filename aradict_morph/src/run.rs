// End-to-end run: select lemmas, generate forms, consolidate the index.
//
// `run` drives phases 3 and 4 against an already built `MorphContext`
// (phases 1 and 2 happen in `MorphContext::build`). It returns the
// consolidated entries together with a `RunReport` of counters, or an error
// and nothing else; a run never yields partial output.
//
// Lemma selection: with `root_initial` set, only lemmas whose Buckwalter root
// starts with that prefix are processed (the "mini" dictionary uses "E").
// Lemmas without a root are never selected by a prefix. An empty selection
// is not an error; it yields an empty dictionary and a warning.
//
// Batching: with `batch_size` set, lemmas are processed in chunks and each
// chunk is consolidated on its own. This bounds peak memory, but lemmas can
// then only merge with other lemmas of the same chunk.
//
// See also: `generator.rs` (phase 3), `consolidate.rs` (phase 4).

use crate::consolidate::{ConsolidatedEntry, ConsolidationStats, consolidate};
use crate::context::MorphContext;
use crate::error::MorphError;
use crate::filter::AcceptFilter;
use crate::generator::{FormGenerator, GenerateOptions};
use crate::types::LemmaGroup;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Switches for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Also index optional-vowel spellings.
    pub vowelled_forms: bool,
    /// Only process lemmas whose root starts with this Buckwalter prefix.
    pub root_initial: Option<String>,
    /// Process and consolidate lemmas in chunks of this size.
    pub batch_size: Option<usize>,
    /// Add romanizations to gloss lines.
    pub romanize: bool,
}

impl RunOptions {
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            vowelled_forms: self.vowelled_forms,
            romanize: self.romanize,
        }
    }

    fn selects(&self, lemma: &LemmaGroup) -> bool {
        match &self.root_initial {
            Some(prefix) => !lemma.root().is_empty() && lemma.root().starts_with(prefix.as_str()),
            None => true,
        }
    }
}

/// Counters for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Lemmas selected for generation.
    pub lemmas: usize,
    /// Stems across the selected lemmas.
    pub stems: usize,
    pub entries: ConsolidationStats,
    /// Categories with no counterpart in the compatibility rules, or rules
    /// naming categories no morpheme uses.
    pub unmatched_categories: usize,
    /// Stem rows dropped at load time because they carry no lemma id.
    pub dropped_stems: usize,
    pub elapsed: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated {} original entries, {} merged entries, {} empty entries, \
             {} index size from {} lemmas and {} stems in {:.3} seconds",
            self.entries.original_entries,
            self.entries.merged_entries,
            self.entries.empty_entries,
            self.entries.index_size,
            self.lemmas,
            self.stems,
            self.elapsed.as_secs_f64()
        )?;
        if self.unmatched_categories > 0 {
            write!(f, " ({} unmatched categories)", self.unmatched_categories)?;
        }
        if self.dropped_stems > 0 {
            write!(f, " ({} stems without a lemma dropped)", self.dropped_stems)?;
        }
        Ok(())
    }
}

/// Consolidated entries plus the run's counters.
#[derive(Clone, Debug, Default)]
pub struct DictionaryOutput {
    pub entries: Vec<ConsolidatedEntry>,
    pub report: RunReport,
}

/// Generate and consolidate the dictionary for the selected lemmas.
pub fn run(
    ctx: &MorphContext,
    filter: Option<&AcceptFilter>,
    options: &RunOptions,
) -> Result<DictionaryOutput, MorphError> {
    let start = Instant::now();

    let selection: Vec<&LemmaGroup> = ctx
        .catalog()
        .lemmas()
        .iter()
        .filter(|lemma| options.selects(lemma))
        .collect();

    let mut report = RunReport {
        lemmas: selection.len(),
        stems: selection.iter().map(|lemma| lemma.stems().len()).sum(),
        unmatched_categories: ctx.diagnostics().count(),
        dropped_stems: ctx.catalog().orphan_stems(),
        ..Default::default()
    };

    if selection.is_empty() {
        tracing::warn!(
            root_initial = ?options.root_initial,
            "no lemmas selected; the dictionary will be empty"
        );
        report.elapsed = start.elapsed();
        return Ok(DictionaryOutput {
            entries: Vec::new(),
            report,
        });
    }

    tracing::info!(
        lemmas = report.lemmas,
        stems = report.stems,
        filtered = filter.is_some(),
        "iterating and processing lemmas"
    );

    let generator = FormGenerator::new(ctx, filter, options.generate_options());
    let batch_size = options.batch_size.unwrap_or(selection.len()).max(1);
    let mut entries = Vec::new();

    for (i, batch) in selection.chunks(batch_size).enumerate() {
        if options.batch_size.is_some() {
            tracing::debug!(batch = i, lemmas = batch.len(), "processing batch");
        }
        let records = generator.generate_all(batch);
        let consolidation = consolidate(&records);
        entries.extend(consolidation.entries);
        report.entries += consolidation.stats;
    }

    report.elapsed = start.elapsed();
    tracing::info!("{report}");

    Ok(DictionaryOutput { entries, report })
}
