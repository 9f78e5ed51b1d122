use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Mapping from label name to the trigger words that count as evidence for it.
///
/// Labels are kept in sorted order and each label's words are deduplicated and
/// sorted, so two dictionaries built from the same words in any order serialize
/// to identical JSON.
///
/// ```
/// use clear_bow::LabelDictionary;
///
/// let dictionary = LabelDictionary::new()
///     .with_label("fund", vec!["unisuper", "qsuper", "unisuper"])
///     .with_label("covid", vec!["lockdown", "covid"]);
///
/// assert_eq!(dictionary.labels().collect::<Vec<_>>(), vec!["covid", "fund"]);
/// assert_eq!(dictionary.words("fund").unwrap(), ["qsuper", "unisuper"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct LabelDictionary {
    labels: BTreeMap<String, Vec<String>>,
}

impl LabelDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds words to `label`, merging with any words it already has.
    pub fn insert<I, S>(&mut self, label: impl Into<String>, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.labels.entry(label.into()).or_default();
        let merged: BTreeSet<String> = entry.drain(..).chain(words.into_iter().map(Into::into)).collect();
        *entry = merged.into_iter().collect();
    }

    pub fn with_label<I, S>(mut self, label: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(label, words);
        self
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    pub fn words(&self, label: &str) -> Option<&[String]> {
        self.labels.get(label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.labels.iter().map(|(label, words)| (label.as_str(), words.as_slice()))
    }

    /// Counts, per label, how many of its words occur as substrings of the lowercased text.
    ///
    /// Matching is plain containment: "tax" is found inside "taxes".
    pub fn tally(&self, text: &str) -> BTreeMap<String, usize> {
        let text = text.to_lowercase();
        self.labels
            .iter()
            .map(|(label, words)| {
                let count = words.iter().filter(|word| text.contains(word.as_str())).count();
                (label.clone(), count)
            })
            .collect()
    }
}

impl<S: Into<String>> From<BTreeMap<String, Vec<S>>> for LabelDictionary {
    fn from(map: BTreeMap<String, Vec<S>>) -> Self {
        map.into_iter().collect()
    }
}

impl<S: Into<String>> From<HashMap<String, Vec<S>>> for LabelDictionary {
    fn from(map: HashMap<String, Vec<S>>) -> Self {
        map.into_iter().collect()
    }
}

impl From<LabelDictionary> for BTreeMap<String, Vec<String>> {
    fn from(dictionary: LabelDictionary) -> Self {
        dictionary.labels
    }
}

impl<L, I, S> FromIterator<(L, I)> for LabelDictionary
where
    L: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (L, I)>>(iter: T) -> Self {
        let mut dictionary = Self::new();
        for (label, words) in iter {
            dictionary.insert(label, words);
        }
        dictionary
    }
}
