//! A lexicon-based text classifier: each label owns a list of trigger words, a text
//! is scored by counting which of those words it contains, and the counts are turned
//! into probabilities with softmax (mutually exclusive labels) or sigmoid
//! (independent labels).
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use clear_bow::{Classifier, ClassifierType, NO_LABEL};
//!
//! let classifier = Classifier::builder()
//!     .with_classifier_type(ClassifierType::MultiClass)
//!     .add_label("regulation", vec!["asic", "government", "federal", "tax"])
//!     .add_label("covid", vec!["covid", "lockdown", "downturn"])
//!     .build();
//!
//! let prediction = classifier.predict("Taxes are not fees. They are a federal government tax.")?;
//! assert_eq!(prediction.top_label(), Some("regulation"));
//!
//! // No trigger word at all is reported as a confident `no_label`
//! let prediction = classifier.predict("The weather is nice")?;
//! assert_eq!(prediction.get(NO_LABEL), Some(1.0));
//! # Ok(())
//! # }
//! ```
//!
//! # Persistence
//!
//! A classifier is saved as `config.json` plus `label_dictionary.json` in a directory:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use clear_bow::Classifier;
//!
//! let dir = std::env::temp_dir().join("clear-bow-doc-model");
//! let classifier = Classifier::builder()
//!     .add_label("covid", vec!["covid", "lockdown"])
//!     .build();
//! classifier.save(&dir)?;
//!
//! let loaded = Classifier::from_disk(&dir)?;
//! assert_eq!(loaded, classifier);
//! # std::fs::remove_dir_all(&dir)?;
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod model_store;
pub mod report;

pub use classifier::{
    Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, ClassifierType, LabelDictionary, Prediction,
    Result, DEFAULT_PRECISION, MAX_PRECISION, NO_LABEL,
};
pub use model_store::ModelStore;
pub use report::{GroundTruth, PredictionReport, ReportRow, SplitType};

pub fn init_logger() {
    env_logger::init();
}
