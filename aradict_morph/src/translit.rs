// Buckwalter ↔ Arabic Unicode transliteration and vowel-mark handling.
//
// The morpheme tables are stored in Buckwalter transliteration (one ASCII
// character per Arabic letter or mark); the dictionary is displayed in
// Arabic script. The mapping is a fixed character table covering the four
// Unicode runs hamza..ghayn, tatweel..sukun, the Arabic-Indic digits, and
// dagger alif..alef wasla. Both directions are built at compile time and
// the table lengths are checked by `const` assertions, so lookups can
// never fail at runtime; characters outside the table pass through.
//
// Short vowels, tanween, shadda, sukun, and dagger alif are optional marks:
// Arabic text usually omits some or all of them. `vowel_combinations`
// enumerates every way of keeping or dropping each optional mark in a
// vowelled word, so the index matches partially vowelled spellings too.
//
// `buckwalter_to_ala` produces a reader-friendly ALA-LC/Wehr romanization.

/// Buckwalter characters, in the order of `UNICODE_RUNS`.
const BUCKWALTER: &[u8] = b"'|>&<}AbptvjHxd*rzs$SDTZEg_fqklmnhwYyFNKaui~o0123456789`{";

/// Half-open code point runs the Buckwalter characters map onto, in order.
const UNICODE_RUNS: [(u32, u32); 4] = [
    (0x0621, 0x063B), // hamza through ghayn
    (0x0640, 0x0653), // tatweel through sukun
    (0x0660, 0x066A), // Arabic-Indic digits
    (0x0670, 0x0672), // dagger alif, alef wasla
];

/// ALA-LC/Wehr rendering of each Buckwalter character, same order.
const ALA: [&str; 57] = [
    // hamza through ghayn
    "ʾ", "ʾā", "ʾ", "ʾ", "ʾ", "ʾ", "ā", "b", "h", "t", "ṯ", "j", "ḥ", "ḵ", "d", "ḏ", "r", "z", "s",
    "š", "ṣ", "ḍ", "ṭ", "ẓ", "ʿ", "ḡ",
    // tatweel through sukun
    "", "f", "q", "k", "l", "m", "n", "h", "w", "ā", "y", "an", "un", "in", "a", "u", "i", "~", "",
    // digits
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    // dagger alif, alef wasla
    "ā", "",
];

/// Optional marks in Buckwalter: tanween, short vowels, shadda, sukun, dagger alif.
const BUCKWALTER_MARKS: &str = "FNKaui~o`";

const ALEF: char = '\u{0627}';
const ALEF_WASLA: char = '\u{0671}';
const DAGGER_ALIF: char = '\u{0670}';

const fn run_total() -> usize {
    let mut total = 0;
    let mut r = 0;
    while r < UNICODE_RUNS.len() {
        total += (UNICODE_RUNS[r].1 - UNICODE_RUNS[r].0) as usize;
        r += 1;
    }
    total
}

const _: () = assert!(BUCKWALTER.len() == run_total());
const _: () = assert!(ALA.len() == BUCKWALTER.len());

/// Buckwalter byte → Arabic character; `'\0'` marks an unmapped byte.
const B2U: [char; 128] = {
    let mut table = ['\0'; 128];
    let mut i = 0;
    let mut r = 0;
    while r < UNICODE_RUNS.len() {
        let (start, end) = UNICODE_RUNS[r];
        let mut cp = start;
        while cp < end {
            table[BUCKWALTER[i] as usize] = match char::from_u32(cp) {
                Some(c) => c,
                None => panic!("invalid code point in transliteration table"),
            };
            i += 1;
            cp += 1;
        }
        r += 1;
    }
    table
};

/// (code point − 0x0600) → Buckwalter byte; 0 marks an unmapped character.
const U2B: [u8; 0x80] = {
    let mut table = [0u8; 0x80];
    let mut i = 0;
    let mut r = 0;
    while r < UNICODE_RUNS.len() {
        let (start, end) = UNICODE_RUNS[r];
        let mut cp = start;
        while cp < end {
            table[(cp - 0x0600) as usize] = BUCKWALTER[i];
            i += 1;
            cp += 1;
        }
        r += 1;
    }
    table
};

fn b2u_char(c: char) -> Option<char> {
    if !c.is_ascii() {
        return None;
    }
    match B2U[c as usize] {
        '\0' => None,
        // Alef wasla renders poorly in most e-reader fonts.
        ALEF_WASLA => Some(ALEF),
        u => Some(u),
    }
}

/// Transliterate Buckwalter text to Arabic script. Unmapped characters
/// pass through unchanged.
pub fn buckwalter_to_unicode(buckwalter: &str) -> String {
    buckwalter
        .chars()
        .map(|c| b2u_char(c).unwrap_or(c))
        .collect()
}

/// Transliterate Arabic script back to Buckwalter. Unmapped characters pass
/// through unchanged.
pub fn unicode_to_buckwalter(arabic: &str) -> String {
    arabic
        .chars()
        .map(|c| {
            let cp = c as u32;
            if (0x0600..0x0680).contains(&cp) {
                match U2B[(cp - 0x0600) as usize] {
                    0 => c,
                    b => b as char,
                }
            } else {
                c
            }
        })
        .collect()
}

/// Whether an Arabic-script character is an optional vowel mark.
pub fn is_vowel_mark(c: char) -> bool {
    ('\u{064B}'..='\u{0652}').contains(&c) || c == DAGGER_ALIF
}

fn is_buckwalter_mark(c: char) -> bool {
    BUCKWALTER_MARKS.contains(c)
}

/// Remove every optional vowel mark from Arabic-script text.
pub fn strip_vowels(arabic: &str) -> String {
    arabic.chars().filter(|&c| !is_vowel_mark(c)).collect()
}

/// Remove every optional vowel mark from Buckwalter text.
pub fn strip_buckwalter_vowels(buckwalter: &str) -> String {
    buckwalter.chars().filter(|&c| !is_buckwalter_mark(c)).collect()
}

/// One unit of a vowelled word: a merged run of mandatory characters, or a
/// single optional mark.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Unit {
    Fixed(String),
    Optional(char),
}

/// Every spelling of a vowelled word with each optional mark kept or
/// dropped independently.
///
/// Finite (`2^k` items for `k` marks) and restartable: `iter()` can be called
/// any number of times. The first spelling keeps every mark, the last drops
/// them all.
#[derive(Clone, Debug)]
pub struct VowelCombinations {
    units: Vec<Unit>,
    optional: usize,
}

impl VowelCombinations {
    /// Number of spellings this expansion yields (saturating).
    pub fn len(&self) -> usize {
        u32::try_from(self.optional)
            .ok()
            .and_then(|k| 1usize.checked_shl(k))
            .unwrap_or(usize::MAX)
    }

    /// Never true: even a word without marks has one spelling.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn optional_marks(&self) -> usize {
        self.optional
    }

    pub fn iter(&self) -> VowelCombinationIter<'_> {
        VowelCombinationIter {
            units: &self.units,
            dropped: vec![false; self.optional],
            done: false,
        }
    }
}

impl<'a> IntoIterator for &'a VowelCombinations {
    type Item = String;
    type IntoIter = VowelCombinationIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the spellings of a `VowelCombinations`.
pub struct VowelCombinationIter<'a> {
    units: &'a [Unit],
    /// One flag per optional unit, least significant last.
    dropped: Vec<bool>,
    done: bool,
}

impl Iterator for VowelCombinationIter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let mut out = String::new();
        let mut k = 0;
        for unit in self.units {
            match unit {
                Unit::Fixed(s) => out.push_str(s),
                Unit::Optional(c) => {
                    if !self.dropped[k] {
                        out.push(*c);
                    }
                    k += 1;
                }
            }
        }

        // Binary increment; wrapping past all-dropped ends the sequence.
        let mut carry = true;
        for flag in self.dropped.iter_mut().rev() {
            if !carry {
                break;
            }
            carry = *flag;
            *flag = !*flag;
        }
        if carry {
            self.done = true;
        }

        Some(out)
    }
}

/// Expand a vowelled Buckwalter word into its optional-mark spellings, in
/// Arabic script. Adjacent mandatory characters are merged into one unit
/// before the product is taken.
pub fn vowel_combinations(vowelled_buckwalter: &str) -> VowelCombinations {
    let mut units: Vec<Unit> = Vec::new();
    let mut optional = 0;
    for c in vowelled_buckwalter.chars() {
        let display = b2u_char(c).unwrap_or(c);
        if is_buckwalter_mark(c) {
            units.push(Unit::Optional(display));
            optional += 1;
        } else if let Some(Unit::Fixed(run)) = units.last_mut() {
            run.push(display);
        } else {
            units.push(Unit::Fixed(display.to_string()));
        }
    }
    VowelCombinations { units, optional }
}

/// Romanize Buckwalter text using ALA-LC/Wehr conventions.
pub fn buckwalter_to_ala(buckwalter: &str) -> String {
    // Shadda doubles the preceding letter.
    let mut doubled: Vec<char> = Vec::with_capacity(buckwalter.len());
    for c in buckwalter.chars() {
        match (c, doubled.last().copied()) {
            ('~', Some(prev)) => doubled.push(prev),
            _ => doubled.push(c),
        }
    }

    let mut out = String::with_capacity(doubled.len());
    for c in doubled {
        let ala = u8::try_from(c)
            .ok()
            .and_then(|b| BUCKWALTER.iter().position(|&x| x == b))
            .map(|i| ALA[i]);
        match ala {
            Some(s) => out.push_str(s),
            None => out.push(c),
        }
    }

    out.replace("uw", "ū")
        .replace("iy", "ī")
        .replace("aan", "an")
        .replace("āa", "ā")
        .replace("ūu", "ū")
        // Allah: two written lams, one carrying shadda.
        .replace("lll", "ll")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const KTB: &str = "\u{0643}\u{062A}\u{0628}";

    #[test]
    fn transliterates_letters() {
        assert_eq!(buckwalter_to_unicode("ktb"), KTB);
        assert_eq!(buckwalter_to_unicode("'"), "\u{0621}");
        assert_eq!(buckwalter_to_unicode("g"), "\u{063A}");
        assert_eq!(buckwalter_to_unicode("o"), "\u{0652}");
        assert_eq!(buckwalter_to_unicode("09"), "\u{0660}\u{0669}");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        assert_eq!(buckwalter_to_unicode("k-t b!"), "\u{0643}-\u{062A} \u{0628}!");
        assert_eq!(unicode_to_buckwalter("abc ."), "abc .");
    }

    #[test]
    fn alef_wasla_renders_as_alef() {
        assert_eq!(buckwalter_to_unicode("{"), "\u{0627}");
    }

    #[test]
    fn unicode_round_trips_to_buckwalter() {
        for word in ["kataba", "kut~Ab", "<isolAm", "maktabapN", "Eilm"] {
            assert_eq!(unicode_to_buckwalter(&buckwalter_to_unicode(word)), word);
        }
    }

    #[test]
    fn stripping_commutes_with_transliteration() {
        for word in ["kataba", "kut~Ab", "maktabapN", "yaktubuwna", "h`*A", "{lkitAbu"] {
            assert_eq!(
                strip_vowels(&buckwalter_to_unicode(word)),
                buckwalter_to_unicode(&strip_buckwalter_vowels(word)),
                "word {word}"
            );
        }
    }

    #[test]
    fn expansion_yields_two_to_the_k_distinct_spellings() {
        let combos = vowel_combinations("kataba");
        assert_eq!(combos.optional_marks(), 3);
        assert_eq!(combos.len(), 8);

        let all: Vec<String> = combos.iter().collect();
        assert_eq!(all.len(), 8);
        let distinct: HashSet<&String> = all.iter().collect();
        assert_eq!(distinct.len(), 8);

        assert_eq!(all.first().unwrap(), &buckwalter_to_unicode("kataba"));
        assert_eq!(all.last().unwrap(), KTB);
    }

    #[test]
    fn expansion_without_marks_has_one_spelling() {
        let combos = vowel_combinations("ktb");
        assert_eq!(combos.len(), 1);
        assert_eq!(combos.iter().collect::<Vec<_>>(), vec![KTB.to_string()]);
    }

    #[test]
    fn expansion_is_restartable() {
        let combos = vowel_combinations("kutubN");
        let first: Vec<String> = combos.iter().collect();
        let second: Vec<String> = (&combos).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn every_spelling_strips_to_the_bare_form() {
        let bare = buckwalter_to_unicode("ktAb");
        for spelling in &vowel_combinations("kitAbN") {
            assert_eq!(strip_vowels(&spelling), bare);
        }
    }

    #[test]
    fn ala_romanization() {
        assert_eq!(buckwalter_to_ala("kataba"), "kataba");
        assert_eq!(buckwalter_to_ala("kut~Ab"), "kuttāb");
        assert_eq!(buckwalter_to_ala("kabiyr"), "kabīr");
        assert_eq!(buckwalter_to_ala("suwq"), "sūq");
        assert_eq!(buckwalter_to_ala("Eilm"), "ʿilm");
    }
}
