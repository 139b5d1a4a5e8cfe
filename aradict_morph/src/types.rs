// Core morphology types: interned categories, morphemes, and lemma groups.
//
// The type hierarchy is:
// - `CategoryId` — an interned grammatical category token (small integer)
// - `CategoryInterner` — maps category names to ids and back, built at load
// - `MorphemeKind` — prefix, stem, or suffix (used in errors and diagnostics)
// - `MorphemeRecord` — the all-strings shape handed over by the table reader
// - `Morpheme` — an immutable prefix/stem/suffix with its category interned
// - `LemmaGroup` — a lemma id, its root, and the stems that share the lemma
//
// Morphemes are created once when the catalog is built and are only ever
// borrowed afterwards. Categories are compared by id, never by string, so the
// pair precomputation's cross product does no string hashing.

use crate::error::MorphError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interned grammatical category. Only meaningful relative to the
/// `CategoryInterner` that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub u32);

/// Bidirectional category name ↔ id table.
///
/// Ids are dense and assigned in first-seen order, so iterating `0..len()`
/// visits categories in the order the tables introduced them.
#[derive(Clone, Debug, Default)]
pub struct CategoryInterner {
    ids: FxHashMap<String, CategoryId>,
    names: Vec<String>,
}

impl CategoryInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, assigning a fresh one on first sight.
    pub fn intern(&mut self, name: &str) -> CategoryId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = CategoryId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up an already-interned name.
    pub fn get(&self, name: &str) -> Option<CategoryId> {
        self.ids.get(name).copied()
    }

    /// The name an id was interned from.
    pub fn name(&self, id: CategoryId) -> &str {
        self.names.get(id.0 as usize).map(String::as_str).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Which slot of a word a morpheme fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphemeKind {
    Prefix,
    Stem,
    Suffix,
}

impl fmt::Display for MorphemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MorphemeKind::Prefix => "prefix",
            MorphemeKind::Stem => "stem",
            MorphemeKind::Suffix => "suffix",
        };
        f.write_str(name)
    }
}

/// One row of a prefix, stem, or suffix table, as parsed by the reader.
///
/// Text fields are in Buckwalter transliteration. `root` and `lemma` are
/// empty for prefixes and suffixes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphemeRecord {
    pub unvowelled: String,
    pub vowelled: String,
    pub category: String,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub gloss: String,
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub lemma: String,
}

/// An atomic prefix, stem, or suffix. Never mutated after catalog load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Morpheme {
    /// Buckwalter text without short vowels.
    pub unvowelled: String,
    /// Fully vowelled Buckwalter text.
    pub vowelled: String,
    /// Category governing which other morphemes this one combines with.
    pub category: CategoryId,
    /// Human-readable part-of-speech label.
    pub pos: String,
    /// English gloss.
    pub gloss: String,
    /// Root in Buckwalter (stems only; empty otherwise).
    pub root: String,
    /// Owning lemma id (stems only; empty otherwise).
    pub lemma: String,
}

impl Morpheme {
    /// Convert a reader record, interning its category.
    pub fn from_record(record: MorphemeRecord, categories: &mut CategoryInterner) -> Self {
        let category = categories.intern(&record.category);
        Morpheme {
            unvowelled: record.unvowelled,
            vowelled: record.vowelled,
            category,
            pos: record.pos,
            gloss: record.gloss,
            root: record.root,
            lemma: record.lemma,
        }
    }

    /// Whether the gloss should read as an infinitive ("to write").
    ///
    /// Matches any label mentioning "verb" except the adverb labels.
    pub fn is_verb(&self) -> bool {
        self.pos.contains("verb") && !self.pos.contains("Adverb")
    }
}

/// A lemma and the stems that realize it.
///
/// Invariant: `stems` is non-empty and every stem's `lemma` equals `id`.
#[derive(Clone, Debug)]
pub struct LemmaGroup {
    id: String,
    root: String,
    stems: Vec<Morpheme>,
}

impl LemmaGroup {
    /// Build a group, checking the lemma invariant.
    pub fn new(id: String, root: String, stems: Vec<Morpheme>) -> Result<Self, MorphError> {
        if stems.is_empty() {
            return Err(MorphError::EmptyLemma { lemma: id });
        }
        if let Some((stem_index, stem)) = stems.iter().enumerate().find(|(_, s)| s.lemma != id) {
            return Err(MorphError::InvariantViolation {
                lemma: id,
                stem_index,
                found: stem.lemma.clone(),
            });
        }
        Ok(LemmaGroup { id, root, stems })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Root in Buckwalter; empty when the lemma has none.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn stems(&self) -> &[Morpheme] {
        &self.stems
    }

    /// The lemma id without its disambiguation suffix: `kataba-u_1` → `kataba`.
    pub fn primary_token(&self) -> &str {
        let before_dash = self.id.split('-').next().unwrap_or("");
        before_dash.split('_').next().unwrap_or("")
    }
}
