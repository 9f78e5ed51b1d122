use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ClassifierError;

/// Decimal digits kept in prediction scores unless the caller opts out of rounding.
pub const DEFAULT_PRECISION: u32 = 4;

/// Largest supported precision; `f64` carries no more significant decimal digits.
pub const MAX_PRECISION: u32 = 15;

/// Checks a rounding precision, failing with `InvalidConfiguration` above [`MAX_PRECISION`].
pub(crate) fn check_precision(precision: u32) -> Result<u32, ClassifierError> {
    if precision > MAX_PRECISION {
        return Err(ClassifierError::InvalidConfiguration(format!(
            "Precision must be at most {}, got {}",
            MAX_PRECISION, precision
        )));
    }
    Ok(precision)
}

/// How raw word counts are turned into scores.
///
/// - `MultiClass`: labels are mutually exclusive, counts go through softmax
/// - `MultiLabel`: labels are independent, each count goes through sigmoid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierType {
    #[default]
    MultiClass,
    MultiLabel,
}

impl ClassifierType {
    pub const ALL: [ClassifierType; 2] = [ClassifierType::MultiClass, ClassifierType::MultiLabel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultiClass => "multi_class",
            Self::MultiLabel => "multi_label",
        }
    }
}

impl fmt::Display for ClassifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierType {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ClassifierError::InvalidConfiguration(format!("Unsupported classifier type: {}", s)))
    }
}

/// The record written to `config.json`.
///
/// `precision` may be absent, in which case [`DEFAULT_PRECISION`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ModelConfig {
    pub classifier_type: ClassifierType,
    #[serde(default = "default_precision", deserialize_with = "deserialize_precision")]
    pub precision: u32,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

fn deserialize_precision<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let precision = u32::deserialize(deserializer)?;
    check_precision(precision).map_err(serde::de::Error::custom)
}
