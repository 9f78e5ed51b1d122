use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::classifier::Classifier;
use super::config::ModelConfig;
use super::dictionary::LabelDictionary;
use super::error::{ClassifierError, Result};

pub const CONFIG_FILE: &str = "config.json";
pub const LABEL_DICTIONARY_FILE: &str = "label_dictionary.json";

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ClassifierError::io(path, e.into()))?;
    debug!("Writing {} bytes to {:?}", json.len(), path);
    fs::write(path, json).map_err(|e| ClassifierError::io(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| ClassifierError::read(path, e))?;
    debug!("Read {} bytes from {:?}", bytes.len(), path);
    serde_json::from_slice(&bytes).map_err(|e| ClassifierError::corrupt(path, e))
}

impl Classifier {
    /// Creates a classifier from a directory written by [`Classifier::save`].
    pub fn from_disk(model_dir: impl AsRef<Path>) -> Result<Self> {
        let mut classifier = Self::default();
        classifier.load(model_dir)?;
        Ok(classifier)
    }

    /// Writes `config.json` and `label_dictionary.json` into `model_dir`, creating it if needed.
    ///
    /// The two files are written one after the other; if the second write fails the
    /// first one stays on disk.
    ///
    /// # Errors
    /// - `IoFailure` if the directory or either file cannot be written
    pub fn save(&self, model_dir: impl AsRef<Path>) -> Result<()> {
        let model_dir = model_dir.as_ref();
        fs::create_dir_all(model_dir).map_err(|e| ClassifierError::io(model_dir, e))?;

        write_json(
            &model_dir.join(CONFIG_FILE),
            &ModelConfig {
                classifier_type: self.classifier_type,
                precision: self.precision,
            },
        )?;
        write_json(&model_dir.join(LABEL_DICTIONARY_FILE), &self.label_dictionary)?;

        info!("Saved {} classifier to {:?}", self.classifier_type, model_dir);
        Ok(())
    }

    /// Reads the classifier type, precision and label dictionary back from `model_dir`.
    ///
    /// The config is applied before the dictionary is read, so a failure on the
    /// dictionary leaves the new classifier type in place and the previous
    /// dictionary untouched. A config without `precision` loads with the default.
    ///
    /// # Errors
    /// - `NotFound` if either file is missing
    /// - `CorruptData` if either file is not valid JSON for its record
    /// - `IoFailure` for any other read failure
    pub fn load(&mut self, model_dir: impl AsRef<Path>) -> Result<()> {
        let model_dir = model_dir.as_ref();

        let config: ModelConfig = read_json(&model_dir.join(CONFIG_FILE))?;
        self.classifier_type = config.classifier_type;
        self.precision = config.precision;

        let dictionary: Option<LabelDictionary> = read_json(&model_dir.join(LABEL_DICTIONARY_FILE))?;
        self.label_dictionary = dictionary.filter(|d| !d.is_empty());

        info!(
            "Loaded {} classifier with {} labels from {:?}",
            self.classifier_type,
            self.label_dictionary.as_ref().map_or(0, LabelDictionary::len),
            model_dir
        );
        Ok(())
    }
}
