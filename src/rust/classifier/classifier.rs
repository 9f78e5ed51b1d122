use std::collections::BTreeMap;

use ndarray::Array1;

use super::config::{ClassifierType, DEFAULT_PRECISION};
use super::dictionary::LabelDictionary;
use super::error::{ClassifierError, Result};
use super::prediction::Prediction;
use super::utils::{sigmoid, softmax};

/// A dictionary-based text classifier.
///
/// Each label owns a list of trigger words. A text is scored by counting, per
/// label, how many of its words occur in the lowercased text; the counts are then
/// turned into probabilities with softmax (`MultiClass`) or sigmoid (`MultiLabel`).
///
/// ```rust
/// use clear_bow::{Classifier, ClassifierType, LabelDictionary};
///
/// let dictionary = LabelDictionary::new()
///     .with_label("regulation", vec!["asic", "government", "tax"])
///     .with_label("covid", vec!["covid", "lockdown"]);
///
/// let classifier = Classifier::new(ClassifierType::MultiClass, Some(dictionary));
/// let prediction = classifier.predict("Is the income figure before or after tax?")?;
/// assert_eq!(prediction.top_label(), Some("regulation"));
/// # Ok::<(), clear_bow::ClassifierError>(())
/// ```
///
/// Prediction never mutates the classifier, so an initialized instance can be
/// shared across threads behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    pub(crate) classifier_type: ClassifierType,
    pub(crate) label_dictionary: Option<LabelDictionary>,
    pub(crate) precision: u32,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierType::default(), None)
    }
}

impl Classifier {
    /// Creates a classifier; without a dictionary it stays uninitialized until [`Classifier::load`].
    ///
    /// An empty dictionary counts as no dictionary.
    pub fn new(classifier_type: ClassifierType, label_dictionary: Option<LabelDictionary>) -> Self {
        Self {
            classifier_type,
            label_dictionary: label_dictionary.filter(|d| !d.is_empty()),
            precision: DEFAULT_PRECISION,
        }
    }

    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    pub fn classifier_type(&self) -> ClassifierType {
        self.classifier_type
    }

    pub fn label_dictionary(&self) -> Option<&LabelDictionary> {
        self.label_dictionary.as_ref()
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn is_initialized(&self) -> bool {
        self.label_dictionary.is_some()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        let dictionary = self.label_dictionary.as_ref();
        super::ClassifierInfo {
            classifier_type: self.classifier_type,
            num_labels: dictionary.map_or(0, LabelDictionary::len),
            labels: dictionary
                .map(|d| d.labels().map(str::to_string).collect())
                .unwrap_or_default(),
            num_words: dictionary
                .map(|d| d.iter().map(|(label, words)| (label.to_string(), words.len())).collect())
                .unwrap_or_default(),
            precision: self.precision,
        }
    }

    fn dictionary(&self) -> Result<&LabelDictionary> {
        self.label_dictionary.as_ref().ok_or(ClassifierError::Uninitialized)
    }

    /// Counts, per label, the label words found in `text`.
    ///
    /// # Errors
    /// - `Uninitialized` if no label dictionary is set
    pub fn label_word_count(&self, text: &str) -> Result<BTreeMap<String, usize>> {
        Ok(self.dictionary()?.tally(text))
    }

    /// Turns raw per-label counts into a [`Prediction`].
    ///
    /// All-zero counts give `Prediction::NoLabel`; otherwise softmax or sigmoid
    /// is applied depending on the classifier type.
    pub fn transform(&self, tally: &BTreeMap<String, usize>) -> Prediction {
        if tally.values().all(|&count| count == 0) {
            return Prediction::NoLabel(tally.keys().cloned().collect());
        }

        let counts: Array1<f64> = tally.values().map(|&count| count as f64).collect();
        let scores = match self.classifier_type {
            ClassifierType::MultiClass => softmax(&counts),
            ClassifierType::MultiLabel => sigmoid(&counts),
        };

        Prediction::Scored(tally.keys().cloned().zip(scores.iter().copied()).collect())
    }

    /// Scores a single text, rounding to the configured precision when `round_preds` is set.
    ///
    /// # Errors
    /// - `Uninitialized` if no label dictionary is set
    pub fn predict_single(&self, text: &str, round_preds: bool) -> Result<Prediction> {
        let tally = self.label_word_count(text)?;
        let prediction = self.transform(&tally);
        Ok(if round_preds {
            prediction.rounded(self.precision)
        } else {
            prediction
        })
    }

    /// Scores a single text with rounding enabled.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        self.predict_single(text, true)
    }

    /// Scores every text independently, preserving input order.
    pub fn predict_batch<S: AsRef<str>>(&self, texts: &[S], round_preds: bool) -> Result<Vec<Prediction>> {
        texts
            .iter()
            .map(|text| self.predict_single(text.as_ref(), round_preds))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NO_LABEL;

    fn super_dictionary() -> LabelDictionary {
        LabelDictionary::new()
            .with_label("regulation", vec!["asic", "government", "federal", "tax"])
            .with_label("contribution", vec!["contribution", "concession", "personal", "after tax", "10%", "10.5%"])
            .with_label("covid", vec!["covid", "lockdown", "downturn", "effect"])
            .with_label("retirement", vec!["retire", "house", "annuity", "age"])
            .with_label("fund", vec!["unisuper", "aus super", "australian super", "sun super", "qsuper", "rest", "cbus"])
    }

    fn tally(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs.iter().map(|(l, c)| (l.to_string(), *c)).collect()
    }

    #[test]
    fn test_defaults() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classifier_type(), ClassifierType::MultiClass);
        assert!(classifier.label_dictionary().is_none());
        assert_eq!(classifier.precision(), 4);
    }

    #[test]
    fn test_uninitialized_prediction_fails() {
        let classifier = Classifier::default();
        assert!(matches!(classifier.predict("some text"), Err(ClassifierError::Uninitialized)));
        assert!(matches!(classifier.label_word_count("some text"), Err(ClassifierError::Uninitialized)));
    }

    #[test]
    fn test_empty_dictionary_is_uninitialized() {
        let classifier = Classifier::new(ClassifierType::MultiClass, Some(LabelDictionary::new()));
        assert!(!classifier.is_initialized());
    }

    #[test]
    fn test_transform_all_zero() {
        let classifier = Classifier::new(ClassifierType::MultiLabel, Some(super_dictionary()));
        let prediction = classifier.transform(&tally(&[("a", 0), ("b", 0)]));
        assert_eq!(prediction, Prediction::NoLabel(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_transform_multi_class_is_softmax() {
        let classifier = Classifier::new(ClassifierType::MultiClass, Some(super_dictionary()));
        let prediction = classifier.transform(&tally(&[("a", 1), ("b", 2), ("c", 0)]));
        assert!(!prediction.is_no_label());
        assert!((prediction.sum() - 1.0).abs() < 1e-10);
        assert!(prediction.get("b").unwrap() > prediction.get("a").unwrap());
        assert!(prediction.get("a").unwrap() > prediction.get("c").unwrap());
        assert_eq!(prediction.get(NO_LABEL), None);
    }

    #[test]
    fn test_transform_multi_label_is_sigmoid() {
        let classifier = Classifier::new(ClassifierType::MultiLabel, Some(super_dictionary()));
        let prediction = classifier.transform(&tally(&[("a", 0), ("b", 3)]));
        assert_eq!(prediction.get("a"), Some(0.5));
        assert!(prediction.get("b").unwrap() > 0.95);
    }

    #[test]
    fn test_predict_single_rounds() {
        let classifier = Classifier::new(ClassifierType::MultiClass, Some(super_dictionary()));
        let text = "Mate you get 15% tax on concessional contributions in super.";
        let rounded = classifier.predict_single(text, true).unwrap();
        let raw = classifier.predict_single(text, false).unwrap();
        for (label, score) in rounded.to_map() {
            let raw_score = raw.get(&label).unwrap();
            assert!((score - raw_score).abs() <= 0.00005);
            assert_eq!(score, (score * 10_000.0).round() / 10_000.0);
        }
    }

    #[test]
    fn test_predict_batch_preserves_order() {
        let classifier = Classifier::new(ClassifierType::MultiClass, Some(super_dictionary()));
        let texts = ["Sun Super all the way", "nothing relevant here", "lockdown"];
        let predictions = classifier.predict_batch(&texts, true).unwrap();
        assert_eq!(predictions.len(), 3);
        assert_eq!(predictions[0].top_label(), Some("fund"));
        assert!(predictions[1].is_no_label());
        assert_eq!(predictions[2].top_label(), Some("covid"));
    }

    #[test]
    fn test_predict_batch_empty() {
        let classifier = Classifier::default();
        let texts: Vec<String> = Vec::new();
        assert!(classifier.predict_batch(&texts, true).unwrap().is_empty());
    }

    #[test]
    fn test_info() {
        let classifier = Classifier::new(ClassifierType::MultiLabel, Some(super_dictionary()));
        let info = classifier.info();
        assert_eq!(info.classifier_type, ClassifierType::MultiLabel);
        assert_eq!(info.num_labels, 5);
        assert_eq!(info.labels[0], "contribution");
        assert_eq!(info.num_words["fund"], 7);
    }
}
