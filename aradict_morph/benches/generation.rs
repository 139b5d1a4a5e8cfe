// Benchmarks for form generation and consolidation over a synthetic catalog.
//
// The catalog mimics the shape of the real tables: a handful of prefix and
// suffix categories, each fully ruled against two stem categories, and many
// short lemmas with one or two stems each.
//
// Run with: cargo bench -p aradict_morph

use aradict_morph::{
    AcceptFilter, CatalogBuilder, FormGenerator, GenerateOptions, LemmaGroup, MorphContext,
    MorphemeRecord, Relation, RunOptions, consolidate, run,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const PREFIXES: &[(&str, &str, &str)] = &[
    ("", "", "Pref-0"),
    ("w", "wa", "Pref-Wa"),
    ("f", "fa", "Pref-Wa"),
    ("Al", "Al", "Pref-Al"),
    ("wAl", "waAl", "Pref-WaAl"),
];

const SUFFIXES: &[(&str, &str, &str)] = &[
    ("", "", "Suff-0"),
    ("t", "at", "Suff-t"),
    ("p", "ap", "Suff-p"),
    ("An", "Ani", "Suff-An"),
    ("wn", "uwna", "Suff-wn"),
];

const LETTERS: &[u8] = b"btjHxdrzs$SDTZEfqklmnh";

fn record(unvowelled: &str, vowelled: &str, category: &str) -> MorphemeRecord {
    MorphemeRecord {
        unvowelled: unvowelled.into(),
        vowelled: vowelled.into(),
        category: category.into(),
        ..Default::default()
    }
}

/// Build a context with `lemma_count` three-radical lemmas.
fn build_context(lemma_count: usize) -> MorphContext {
    let mut b = CatalogBuilder::new();
    for &(u, v, c) in PREFIXES {
        b.add_prefix(record(u, v, c));
    }
    for &(u, v, c) in SUFFIXES {
        b.add_suffix(record(u, v, c));
    }
    for i in 0..lemma_count {
        let radicals: String = [i, i / 7, i / 49]
            .iter()
            .map(|&n| LETTERS[n % LETTERS.len()] as char)
            .collect();
        let r: Vec<char> = radicals.chars().collect();
        let vowelled = format!("{}a{}a{}", r[0], r[1], r[2]);
        let category = if i % 2 == 0 { "N" } else { "PV" };
        b.add_stem(MorphemeRecord {
            unvowelled: radicals.clone(),
            vowelled,
            category: category.into(),
            pos: if i % 2 == 0 { "noun" } else { "verb" }.into(),
            gloss: format!("gloss {i}"),
            root: radicals,
            lemma: format!("lemma_{i}"),
        });
    }
    for &(_, _, pref) in PREFIXES {
        for stem in ["N", "PV"] {
            b.add_rule(Relation::PrefixStem, pref, stem);
        }
        for &(_, _, suff) in SUFFIXES {
            b.add_rule(Relation::PrefixSuffix, pref, suff);
        }
    }
    for &(_, _, suff) in SUFFIXES {
        b.add_rule(Relation::StemSuffix, "N", suff);
        b.add_rule(Relation::StemSuffix, "PV", suff);
    }
    let (catalog, compat) = b.build().expect("synthetic catalog is valid");
    MorphContext::build(catalog, compat).expect("synthetic catalog is non-empty")
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    group.sample_size(20);

    for lemma_count in [1_000, 10_000] {
        let ctx = build_context(lemma_count);
        let lemmas: Vec<&LemmaGroup> = ctx.catalog().lemmas().iter().collect();

        for vowelled_forms in [false, true] {
            let options = GenerateOptions {
                vowelled_forms,
                romanize: false,
            };
            let label = if vowelled_forms { "vowelled" } else { "bare" };
            let generator = FormGenerator::new(&ctx, None, options);
            group.bench_with_input(BenchmarkId::new(label, lemma_count), &lemmas, |b, lemmas| {
                b.iter(|| black_box(generator.generate_all(black_box(lemmas))));
            });
        }

        let generator = FormGenerator::new(&ctx, None, GenerateOptions::default());
        let records = generator.generate_all(&lemmas);
        group.bench_with_input(
            BenchmarkId::new("consolidate", lemma_count),
            &records,
            |b, records| {
                b.iter(|| black_box(consolidate(black_box(records))));
            },
        );

        // Filtered run: accept only every third generated form.
        let filter = AcceptFilter::from_words(
            records
                .iter()
                .flat_map(|r| r.forms.iter())
                .step_by(3)
                .cloned(),
        );
        group.bench_with_input(
            BenchmarkId::new("filtered_run", lemma_count),
            &filter,
            |b, filter| {
                b.iter(|| black_box(run(&ctx, Some(filter), &RunOptions::default())));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
