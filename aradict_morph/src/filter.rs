// Accepted-word filter built from frequency lists.
//
// An abridged dictionary only indexes forms that actually occur in a
// corpus. The filter keeps the accepted words verbatim (vowelled or not, as
// they appeared) plus their vowel-stripped variants, so the generator can
// cheaply reject a prefix/stem/suffix combination by its bare spelling
// before expanding any vowelled spellings. Lookups never fail; a miss is
// just "not accepted".

use crate::translit::strip_vowels;
use rustc_hash::FxHashSet;

/// Membership filter over Arabic-script surface forms.
#[derive(Clone, Debug, Default)]
pub struct AcceptFilter {
    accepted: FxHashSet<String>,
    unvowelled: FxHashSet<String>,
}

impl AcceptFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from accepted words in Arabic script.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::new();
        for word in words {
            filter.insert(word);
        }
        filter
    }

    pub fn insert(&mut self, word: impl Into<String>) {
        let word = word.into();
        self.unvowelled.insert(strip_vowels(&word));
        self.accepted.insert(word);
    }

    /// Whether `form` was accepted verbatim.
    pub fn accepts(&self, form: &str) -> bool {
        self.accepted.contains(form)
    }

    /// Whether some accepted word strips to the bare spelling `form`.
    pub fn accepts_unvowelled(&self, form: &str) -> bool {
        self.unvowelled.contains(form)
    }

    /// Number of accepted words.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for AcceptFilter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translit::buckwalter_to_unicode;

    #[test]
    fn vowelled_word_also_accepts_its_bare_spelling_for_gating() {
        let filter = AcceptFilter::from_words([buckwalter_to_unicode("kataba")]);
        let bare = buckwalter_to_unicode("ktb");

        assert!(filter.accepts(&buckwalter_to_unicode("kataba")));
        assert!(filter.accepts_unvowelled(&bare));
        // The bare spelling itself was never seen verbatim.
        assert!(!filter.accepts(&bare));
    }

    #[test]
    fn misses_are_not_errors() {
        let filter = AcceptFilter::new();
        assert!(filter.is_empty());
        assert!(!filter.accepts("anything"));
        assert!(!filter.accepts_unvowelled("anything"));
    }

    #[test]
    fn extend_adds_words() {
        let mut filter = AcceptFilter::new();
        filter.extend(["a", "b", "a"]);
        assert_eq!(filter.len(), 2);
    }
}
