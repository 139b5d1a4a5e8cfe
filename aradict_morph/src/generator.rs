// Surface-form generation: one `LemmaRecord` per lemma.
//
// For each stem of a lemma and each legal (prefix, suffix) pair of the
// stem's category (see `pairs.rs`), the generator concatenates the three
// unvowelled texts into a bare surface form and transliterates it. The first
// pair of every stem also yields the vowelled form used in the gloss line
// "<vowelled> <pos> <gloss>"; identical lines from different stems are
// rendered once.
//
// With an `AcceptFilter`, a combination is only considered when its bare
// form strips-matches some accepted word; the bare form and (when enabled)
// each optional-vowel spelling are then admitted individually if accepted
// verbatim. Without a filter every form is admitted.
//
// A lemma whose forms are all rejected still produces a record, flagged
// empty, so the consolidator can count it.
//
// Lemmas only read the shared `MorphContext`, so `generate_all` fans them
// out across rayon workers and collects results in input order.

use crate::context::MorphContext;
use crate::filter::AcceptFilter;
use crate::translit::{buckwalter_to_ala, buckwalter_to_unicode, vowel_combinations};
use crate::types::{LemmaGroup, Morpheme};
use quick_xml::escape::partial_escape;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lemmas between progress log lines.
const PROGRESS_INTERVAL: usize = 1024;

/// Per-form switches for the generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Also index every optional-vowel spelling of each vowelled form.
    pub vowelled_forms: bool,
    /// Add an ALA-LC romanization to each gloss line.
    pub romanize: bool,
}

/// Generated forms and rendered markup for one lemma.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaRecord {
    /// Lemma id from the stem table.
    pub lemma: String,
    /// Headword markup (`<b>…</b>`).
    pub headword: String,
    /// Admitted surface forms, sorted and deduplicated.
    pub forms: Vec<String>,
    /// Description markup: gloss list, root line, rule.
    pub description: String,
    /// Stems processed for this lemma.
    pub stems: usize,
}

impl LemmaRecord {
    /// True when no generated form survived the filter.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Generates lemma records against a shared context.
#[derive(Clone, Copy)]
pub struct FormGenerator<'a> {
    ctx: &'a MorphContext,
    filter: Option<&'a AcceptFilter>,
    options: GenerateOptions,
}

impl<'a> FormGenerator<'a> {
    pub fn new(
        ctx: &'a MorphContext,
        filter: Option<&'a AcceptFilter>,
        options: GenerateOptions,
    ) -> Self {
        FormGenerator {
            ctx,
            filter,
            options,
        }
    }

    /// Generate the record for a single lemma.
    pub fn generate(&self, lemma: &LemmaGroup) -> LemmaRecord {
        let catalog = self.ctx.catalog();
        let pairs = self.ctx.pairs();

        let mut forms: FxHashSet<String> = FxHashSet::default();
        let mut gloss_lines: Vec<String> = Vec::new();

        for stem in lemma.stems() {
            for (i, (prefix, suffix)) in pairs.resolved(catalog, stem.category).enumerate() {
                let unvowelled = [
                    prefix.unvowelled.as_str(),
                    stem.unvowelled.as_str(),
                    suffix.unvowelled.as_str(),
                ]
                .concat();
                let vowelled = [
                    prefix.vowelled.as_str(),
                    stem.vowelled.as_str(),
                    suffix.vowelled.as_str(),
                ]
                .concat();

                if i == 0 {
                    let line = self.gloss_line(stem, &vowelled);
                    if !gloss_lines.contains(&line) {
                        gloss_lines.push(line);
                    }
                }

                self.admit(&mut forms, buckwalter_to_unicode(&unvowelled), &vowelled);
            }
        }

        let mut forms: Vec<String> = forms.into_iter().collect();
        forms.sort_unstable();

        LemmaRecord {
            lemma: lemma.id().to_string(),
            headword: headword_markup(lemma),
            forms,
            description: description_markup(&gloss_lines, lemma.root()),
            stems: lemma.stems().len(),
        }
    }

    /// Generate records for many lemmas in parallel, preserving input order.
    pub fn generate_all(&self, lemmas: &[&LemmaGroup]) -> Vec<LemmaRecord> {
        let total = lemmas.len();
        let done = AtomicUsize::new(0);
        lemmas
            .par_iter()
            .map(|lemma| {
                let record = self.generate(lemma);
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                if n % PROGRESS_INTERVAL == 0 {
                    tracing::info!(
                        "progress: {:.2} %",
                        100.0 * n as f64 / total.max(1) as f64
                    );
                }
                record
            })
            .collect()
    }

    fn admit(&self, forms: &mut FxHashSet<String>, bare: String, vowelled: &str) {
        let Some(filter) = self.filter else {
            if self.options.vowelled_forms {
                forms.extend(vowel_combinations(vowelled).iter());
            }
            forms.insert(bare);
            return;
        };

        if !filter.accepts_unvowelled(&bare) {
            return;
        }
        if self.options.vowelled_forms {
            for spelling in &vowel_combinations(vowelled) {
                if filter.accepts(&spelling) {
                    forms.insert(spelling);
                }
            }
        }
        if filter.accepts(&bare) {
            forms.insert(bare);
        }
    }

    fn gloss_line(&self, stem: &Morpheme, vowelled: &str) -> String {
        let gloss = if stem.is_verb() {
            format!("to {}", stem.gloss)
        } else {
            stem.gloss.clone()
        };
        let arabic = buckwalter_to_unicode(vowelled);
        let romanized = if self.options.romanize {
            format!(" ({})", partial_escape(buckwalter_to_ala(vowelled).as_str()))
        } else {
            String::new()
        };
        format!(
            "<li> {}{} <i>{}</i> {}</li>\n",
            partial_escape(arabic.as_str()),
            romanized,
            partial_escape(stem.pos.as_str()),
            partial_escape(gloss.as_str())
        )
    }
}

fn headword_markup(lemma: &LemmaGroup) -> String {
    let arabic = buckwalter_to_unicode(lemma.primary_token());
    format!("<b>{}</b>", partial_escape(arabic.as_str()))
}

fn description_markup(gloss_lines: &[String], root: &str) -> String {
    let mut desc = String::from("<ul>\n");
    for line in gloss_lines {
        desc.push_str(line);
    }
    desc.push_str("\n</ul>\n");
    if root.is_empty() {
        desc.push_str("No root\n");
    } else {
        let arabic = buckwalter_to_unicode(root);
        desc.push_str(&format!("Root: {}\n", partial_escape(arabic.as_str())));
    }
    desc.push_str("<hr/>\n");
    desc
}
