use std::collections::BTreeMap;

mod error;
mod config;
mod dictionary;
mod prediction;
mod classifier;
pub mod builder;
mod persistence;
mod utils;

pub use error::{ClassifierError, Result};
pub use config::{ClassifierType, DEFAULT_PRECISION, MAX_PRECISION};
pub use dictionary::LabelDictionary;
pub use prediction::{Prediction, NO_LABEL};
pub use classifier::Classifier;
pub use builder::ClassifierBuilder;
pub use persistence::{CONFIG_FILE, LABEL_DICTIONARY_FILE};

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierInfo {
    /// How word counts are turned into scores
    pub classifier_type: ClassifierType,
    /// Number of labels in the dictionary, 0 when uninitialized
    pub num_labels: usize,
    /// Labels in sorted order
    pub labels: Vec<String>,
    /// Number of distinct trigger words per label
    pub num_words: BTreeMap<String, usize>,
    /// Decimal digits predictions are rounded to
    pub precision: u32,
}
