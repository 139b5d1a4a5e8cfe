// Frequency list reader.
//
// A frequency list is one word per line, optionally followed by its corpus
// count: `word count`. Blank lines are skipped. Words are Arabic script,
// vowelled or not. Only membership matters for the dictionary; the counts
// are kept for logging.

use crate::error::KindleError;
use aradict_morph::AcceptFilter;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub word: String,
    /// Corpus count; 0 when the line had none.
    pub count: u64,
}

pub fn parse_frequency_list(text: &str, file: &Path) -> Result<Vec<FrequencyEntry>, KindleError> {
    let mut entries = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            continue;
        };
        let count = match tokens.next() {
            Some(n) => n.parse().map_err(|_| {
                KindleError::table(file, i + 1, format!("invalid count '{n}'"))
            })?,
            None => 0,
        };
        if tokens.next().is_some() {
            return Err(KindleError::table(file, i + 1, "expected 'word count'"));
        }
        entries.push(FrequencyEntry {
            word: word.to_string(),
            count,
        });
    }
    Ok(entries)
}

pub fn read_frequency_list(path: &Path) -> Result<Vec<FrequencyEntry>, KindleError> {
    let text = std::fs::read_to_string(path).map_err(|e| KindleError::io(path, e))?;
    parse_frequency_list(&text, path)
}

/// Build an accept filter from the union of several frequency lists.
pub fn load_filter(paths: &[PathBuf]) -> Result<AcceptFilter, KindleError> {
    let mut filter = AcceptFilter::new();
    for path in paths {
        let entries = read_frequency_list(path)?;
        let occurrences: u64 = entries.iter().map(|e| e.count).sum();
        tracing::info!(
            file = %path.display(),
            words = entries.len(),
            occurrences,
            "read frequency list"
        );
        filter.extend(entries.into_iter().map(|e| e.word));
    }
    Ok(filter)
}
