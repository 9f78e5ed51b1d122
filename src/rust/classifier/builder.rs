use log::debug;

use super::classifier::Classifier;
use super::config::{check_precision, ClassifierType, DEFAULT_PRECISION};
use super::dictionary::LabelDictionary;
use super::error::ClassifierError;

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    classifier_type: ClassifierType,
    label_dictionary: LabelDictionary,
    precision: u32,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder: `multi_class`, no labels, 4 decimal digits
    ///
    /// # Example
    /// ```
    /// use clear_bow::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            classifier_type: ClassifierType::default(),
            label_dictionary: LabelDictionary::new(),
            precision: DEFAULT_PRECISION,
        }
    }

    /// Sets how word counts are transformed into scores
    pub fn with_classifier_type(mut self, classifier_type: ClassifierType) -> Self {
        self.classifier_type = classifier_type;
        self
    }

    /// Sets the classifier type from its string name
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance, or `InvalidConfiguration`
    ///   if the name is not `multi_class` or `multi_label`
    ///
    /// # Example
    /// ```
    /// use clear_bow::ClassifierBuilder;
    ///
    /// assert!(ClassifierBuilder::new().with_classifier_type_str("multi_label").is_ok());
    /// assert!(ClassifierBuilder::new().with_classifier_type_str("invalid_type").is_err());
    /// ```
    pub fn with_classifier_type_str(self, classifier_type: &str) -> Result<Self, ClassifierError> {
        Ok(self.with_classifier_type(classifier_type.parse()?))
    }

    /// Sets the number of decimal digits predictions are rounded to
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance, or `InvalidConfiguration`
    ///   if `precision` exceeds [`MAX_PRECISION`](crate::classifier::MAX_PRECISION)
    pub fn with_precision(mut self, precision: u32) -> Result<Self, ClassifierError> {
        self.precision = check_precision(precision)?;
        Ok(self)
    }

    /// Replaces all labels with the given dictionary
    pub fn with_label_dictionary(mut self, label_dictionary: impl Into<LabelDictionary>) -> Self {
        self.label_dictionary = label_dictionary.into();
        self
    }

    /// Adds a label and its trigger words, merging with words already added for it
    ///
    /// Words are matched against lowercased text, so they should be lowercase.
    ///
    /// # Example
    /// ```
    /// use clear_bow::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .add_label("covid", vec!["covid", "lockdown"])
    ///     .add_label("fund", vec!["unisuper", "qsuper"]);
    /// ```
    pub fn add_label<I, S>(mut self, label: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_dictionary.insert(label, words);
        self
    }

    /// Builds and returns the final Classifier instance
    ///
    /// A builder with no labels produces an uninitialized classifier that must be
    /// loaded from disk before predicting.
    pub fn build(self) -> Classifier {
        debug!(
            "Building {} classifier with {} labels",
            self.classifier_type,
            self.label_dictionary.len()
        );
        let mut classifier = Classifier::new(self.classifier_type, Some(self.label_dictionary));
        classifier.precision = self.precision;
        classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MAX_PRECISION;

    #[test]
    fn test_builder_defaults() {
        let classifier = ClassifierBuilder::new().build();
        assert_eq!(classifier.classifier_type(), ClassifierType::MultiClass);
        assert!(!classifier.is_initialized());
        assert_eq!(classifier.precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_invalid_classifier_type() {
        let err = ClassifierBuilder::new().with_classifier_type_str("invalid_type").unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_add_label_merges() {
        let classifier = ClassifierBuilder::new()
            .add_label("covid", vec!["lockdown"])
            .add_label("covid", vec!["covid", "lockdown"])
            .build();
        let dictionary = classifier.label_dictionary().unwrap();
        assert_eq!(dictionary.words("covid").unwrap(), ["covid", "lockdown"]);
    }

    #[test]
    fn test_custom_precision() {
        let classifier = ClassifierBuilder::new()
            .add_label("a", vec!["x"])
            .add_label("b", vec!["y"])
            .add_label("c", vec!["z"])
            .with_precision(2)
            .unwrap()
            .build();
        let prediction = classifier.predict("x").unwrap();
        assert_eq!(prediction.get("a"), Some(0.58));
        assert_eq!(prediction.get("b"), Some(0.21));
    }

    #[test]
    fn test_precision_above_maximum_is_rejected() {
        for precision in [16, 400, u32::MAX] {
            let err = ClassifierBuilder::new().with_precision(precision).unwrap_err();
            assert!(matches!(err, ClassifierError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_maximum_precision_keeps_scores_in_range() {
        let classifier = ClassifierBuilder::new()
            .add_label("a", vec!["x"])
            .add_label("b", vec!["y"])
            .with_precision(MAX_PRECISION)
            .unwrap()
            .build();
        let prediction = classifier.predict("x").unwrap();
        assert!(prediction.to_map().values().all(|v| (0.0..=1.0).contains(v)));
    }
}
