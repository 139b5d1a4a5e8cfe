// Data-driven dictionary configuration.
//
// `DictConfig` groups everything about a build that is not morphology: the
// book metadata written into the OPF manifest, the Kindle writer limits, the
// names of the six input tables inside the data directory, and the default
// generation switches. It is loaded from JSON; every field has a default, so
// a config file only needs the keys it overrides. CLI flags are applied on
// top of the loaded config in `main.rs`.
//
// See also: `opf.rs` (reads `BookMetadata` and `WriterLimits`), `tables.rs`
// (reads `InputFiles`), `aradict_morph::run::RunOptions` (the `generation`
// section).

use crate::error::KindleError;
use aradict_morph::RunOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata for the generated book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookMetadata {
    /// Title of the unfiltered dictionary.
    pub title: String,
    /// Title used when frequency lists filter the index.
    pub abridged_title: String,
    /// Title used for the root-subset test dictionary.
    pub mini_title: String,
    pub identifier: String,
    pub creators: Vec<String>,
    /// Language of the headwords (`DictionaryInLanguage`).
    pub in_language: String,
    /// Language of the definitions (`DictionaryOutLanguage`).
    pub out_language: String,
    /// Cover image path, relative to the OPF file.
    pub cover_image: String,
    /// Title page path, relative to the OPF file.
    pub title_page: String,
}

impl BookMetadata {
    /// The title for a build. The mini title wins over the abridged one.
    pub fn title_for(&self, abridged: bool, mini: bool) -> &str {
        if mini {
            &self.mini_title
        } else if abridged {
            &self.abridged_title
        } else {
            &self.title
        }
    }
}

impl Default for BookMetadata {
    fn default() -> Self {
        Self {
            title: "The Morphological Arabic-English Dictionary".into(),
            abridged_title: "The Abridged Morphological Arabic-English Dictionary".into(),
            mini_title: "Test Dictionary".into(),
            identifier: "https://github.com/runehol/kindlearadict/".into(),
            creators: vec!["Rune Holm".into()],
            in_language: "ar".into(),
            out_language: "en".into(),
            cover_image: "../datafiles/aradict-cover.jpg".into(),
            title_page: "../datafiles/title-page.html".into(),
        }
    }
}

/// Limits imposed by the Kindle toolchain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterLimits {
    /// Entries per `dictNNN.html` page.
    pub max_entries_per_page: usize,
    /// Index forms per entry; kindlegen rejects more than 255 inflections.
    pub max_forms_per_entry: usize,
}

impl Default for WriterLimits {
    fn default() -> Self {
        Self {
            max_entries_per_page: 500,
            max_forms_per_entry: 250,
        }
    }
}

/// File names of the input tables, relative to the data directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub prefixes: String,
    pub stems: String,
    pub suffixes: String,
    /// Prefix category → stem category.
    pub table_ab: String,
    /// Stem category → suffix category.
    pub table_bc: String,
    /// Prefix category → suffix category.
    pub table_ac: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            prefixes: "dictprefixes.txt".into(),
            stems: "dictstems.txt".into(),
            suffixes: "dictsuffixes.txt".into(),
            table_ab: "tableab.txt".into(),
            table_bc: "tablebc.txt".into(),
            table_ac: "tableac.txt".into(),
        }
    }
}

/// Top-level build configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictConfig {
    pub book: BookMetadata,
    pub writer: WriterLimits,
    pub inputs: InputFiles,
    /// Root prefix selected by `--mini` (Buckwalter; "E" is ain).
    pub mini_root_initial: String,
    /// Generation defaults; CLI flags can only switch options on.
    pub generation: RunOptions,
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            book: BookMetadata::default(),
            writer: WriterLimits::default(),
            inputs: InputFiles::default(),
            mini_root_initial: "E".into(),
            generation: RunOptions::default(),
        }
    }
}

impl DictConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, KindleError> {
        let data = std::fs::read_to_string(path).map_err(|e| KindleError::io(path, e))?;
        serde_json::from_str(&data).map_err(|source| KindleError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
