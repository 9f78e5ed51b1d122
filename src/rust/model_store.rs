use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classifier::{Classifier, ClassifierError, Result, CONFIG_FILE, LABEL_DICTIONARY_FILE};

/// Environment variable overriding the root of the default model store.
pub const HOME_ENV_VAR: &str = "CLEAR_BOW_HOME";

/// A directory of named saved classifiers, one sub-directory per model.
#[derive(Debug, Clone)]
pub struct ModelStore {
    models_dir: PathBuf,
}

impl ModelStore {
    /// Creates a new ModelStore with the default models directory
    pub fn new_default() -> Result<Self> {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(HOME_ENV_VAR) {
            return PathBuf::from(path).join("models");
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("clear-bow").join("models");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".clear-bow").join("models");
        }

        // 4. If all else fails, use system temp directory
        env::temp_dir().join("clear-bow").join("models")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> Result<Self> {
        let models_dir = models_dir.as_ref().to_path_buf();
        fs::create_dir_all(&models_dir).map_err(|e| ClassifierError::io(&models_dir, e))?;
        Ok(Self { models_dir })
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ClassifierError::InvalidConfiguration("Model name cannot be empty".into()));
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ClassifierError::InvalidConfiguration(format!(
                "Model name '{}' must be a single path component",
                name
            )));
        }
        Ok(())
    }

    pub fn model_path(&self, name: &str) -> Result<PathBuf> {
        Self::validate_name(name)?;
        Ok(self.models_dir.join(name))
    }

    /// True when both model files exist for `name`.
    pub fn contains(&self, name: &str) -> bool {
        let Ok(path) = self.model_path(name) else {
            return false;
        };
        let exists = path.join(CONFIG_FILE).exists() && path.join(LABEL_DICTIONARY_FILE).exists();
        log::debug!("Model '{}' at {:?} (exists: {})", name, path, exists);
        exists
    }

    pub fn save(&self, name: &str, classifier: &Classifier) -> Result<PathBuf> {
        let path = self.model_path(name)?;
        log::info!("Saving model '{}' to {:?}", name, path);
        classifier.save(&path)?;
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Classifier> {
        let path = self.model_path(name)?;
        log::info!("Loading model '{}' from {:?}", name, path);
        Classifier::from_disk(path)
    }

    /// Names of all complete models, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.models_dir).map_err(|e| ClassifierError::read(&self.models_dir, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ClassifierError::io(&self.models_dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if self.contains(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Deletes the model directory; missing models are not an error.
    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.model_path(name)?;
        if path.exists() {
            log::info!("Removing model '{}' at {:?}", name, path);
            fs::remove_dir_all(&path).map_err(|e| ClassifierError::io(&path, e))?;
        }
        Ok(())
    }
}
