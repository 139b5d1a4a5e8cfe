// Readers for the Buckwalter morphological analyzer tables.
//
// Morpheme tables (prefixes, stems, suffixes) are tab-separated:
//
//   unvowelled <TAB> vowelled <TAB> category <TAB> gloss [<pos>label</pos>]
//
// interleaved with marker lines. In the stem table `;; lemma-id` starts a new
// lemma and `;--- root` sets the root for the lemmas that follow; any other
// line starting with `;` is a comment. The part of speech comes from the
// `<pos>` tag when present, otherwise it is deduced from the category
// prefix. Glosses lose the tag and trailing whitespace, and `;` separators
// become `/`.
//
// Compatibility tables hold two whitespace-separated category names per
// line (left, right), with `;` comment lines.
//
// `load_context` reads all six tables from a data directory and builds the
// `MorphContext`.

use crate::config::InputFiles;
use crate::error::KindleError;
use aradict_morph::{CatalogBuilder, MorphContext, MorphemeKind, MorphemeRecord, Relation};
use std::path::Path;

/// Part-of-speech labels deduced from a category prefix.
/// Checked in order, so `Nprop` must precede the generic noun case.
const POS_BY_CATEGORY: &[(&str, &str)] = &[
    ("F", "function word"),
    ("IV", "verb (imperfect)"),
    ("PV", "verb (perfect)"),
    ("CV", "verb (imperative)"),
    ("Nprop", "proper noun"),
];

const NULL_CATEGORIES: &[&str] = &["Pref-0", "Suff-0"];

/// Parse a prefix, stem, or suffix table.
///
/// `file` is only used in error messages.
pub fn parse_morpheme_table(text: &str, file: &Path) -> Result<Vec<MorphemeRecord>, KindleError> {
    let mut records = Vec::new();
    let mut lemma = String::new();
    let mut root = String::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(";---") {
            root = rest.trim().to_string();
            continue;
        }
        if let Some(rest) = line.strip_prefix(";;") {
            lemma = rest.trim().to_string();
            continue;
        }
        if line.starts_with(';') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 4 {
            return Err(KindleError::table(
                file,
                line_no,
                format!("expected 4 tab-separated fields, found {}", fields.len()),
            ));
        }
        let category = fields[2];
        let (gloss, tagged_pos) = split_pos_tag(fields[3]);
        let pos = match tagged_pos {
            Some(pos) => pos.to_string(),
            None => deduce_pos(category, gloss).ok_or_else(|| {
                KindleError::table(
                    file,
                    line_no,
                    format!("cannot deduce part of speech for category '{category}'"),
                )
            })?,
        };

        records.push(MorphemeRecord {
            unvowelled: fields[0].to_string(),
            vowelled: fields[1].to_string(),
            category: category.to_string(),
            pos,
            gloss: gloss.trim_end().replace(';', "/"),
            root: root.clone(),
            lemma: lemma.clone(),
        });
    }
    Ok(records)
}

/// Split `gloss <pos>label</pos>` into the gloss and the label.
fn split_pos_tag(field: &str) -> (&str, Option<&str>) {
    let Some(open) = field.find("<pos>") else {
        return (field, None);
    };
    let label_start = open + "<pos>".len();
    match field[label_start..].find("</pos>") {
        Some(len) => (&field[..open], Some(&field[label_start..label_start + len])),
        None => (field, None),
    }
}

fn deduce_pos(category: &str, gloss: &str) -> Option<String> {
    if NULL_CATEGORIES.iter().any(|c| category.starts_with(c)) {
        return Some(String::new());
    }
    if let Some((_, label)) = POS_BY_CATEGORY
        .iter()
        .find(|(prefix, _)| category.starts_with(prefix))
    {
        return Some(label.to_string());
    }
    if category.starts_with('N') {
        // A capitalized gloss is almost always a proper name.
        let proper = gloss.starts_with(|c: char| c.is_ascii_uppercase());
        return Some(if proper { "proper noun" } else { "noun" }.to_string());
    }
    None
}

/// Parse a two-column compatibility table into (left, right) rows.
pub fn parse_compat_table(text: &str, file: &Path) -> Result<Vec<(String, String)>, KindleError> {
    let mut rows = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(KindleError::table(
                file,
                i + 1,
                format!("expected 2 category names, found {}", tokens.len()),
            ));
        }
        rows.push((tokens[0].to_string(), tokens[1].to_string()));
    }
    Ok(rows)
}

fn read(path: &Path) -> Result<String, KindleError> {
    std::fs::read_to_string(path).map_err(|e| KindleError::io(path, e))
}

pub fn read_morpheme_table(path: &Path) -> Result<Vec<MorphemeRecord>, KindleError> {
    parse_morpheme_table(&read(path)?, path)
}

pub fn read_compat_table(path: &Path) -> Result<Vec<(String, String)>, KindleError> {
    parse_compat_table(&read(path)?, path)
}

/// Read the six tables from `data_dir` and build the generation context.
pub fn load_context(data_dir: &Path, files: &InputFiles) -> Result<MorphContext, KindleError> {
    let mut builder = CatalogBuilder::new();

    let morphemes = [
        (MorphemeKind::Prefix, &files.prefixes),
        (MorphemeKind::Stem, &files.stems),
        (MorphemeKind::Suffix, &files.suffixes),
    ];
    for (kind, name) in morphemes {
        let records = read_morpheme_table(&data_dir.join(name))?;
        tracing::debug!(%kind, file = %name, rows = records.len(), "read morpheme table");
        for record in records {
            match kind {
                MorphemeKind::Prefix => builder.add_prefix(record),
                MorphemeKind::Stem => builder.add_stem(record),
                MorphemeKind::Suffix => builder.add_suffix(record),
            };
        }
    }
    let relations = [
        (Relation::PrefixStem, &files.table_ab),
        (Relation::StemSuffix, &files.table_bc),
        (Relation::PrefixSuffix, &files.table_ac),
    ];
    for (relation, name) in relations {
        let rows = read_compat_table(&data_dir.join(name))?;
        tracing::debug!(?relation, file = %name, rows = rows.len(), "read compatibility table");
        for (left, right) in &rows {
            builder.add_rule(relation, left, right);
        }
    }

    let (catalog, compat) = builder.build()?;
    Ok(MorphContext::build(catalog, compat)?)
}
