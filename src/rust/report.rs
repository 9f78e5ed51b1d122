//! Prediction reports pairing texts with their ground truth and predicted scores.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::Serialize;

use crate::classifier::{Classifier, ClassifierError, Prediction, Result};

/// Which data split a report belongs to; decides the output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitType {
    Dev,
    Test,
}

impl SplitType {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Dev => "dev_preds.csv",
            Self::Test => "test_preds.csv",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => f.write_str("dev"),
            Self::Test => f.write_str("test"),
        }
    }
}

impl FromStr for SplitType {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dev" => Ok(Self::Dev),
            "test" => Ok(Self::Test),
            other => Err(ClassifierError::InvalidConfiguration(format!(
                "Split type must be either dev/test, got '{}'",
                other
            ))),
        }
    }
}

/// Expected labels for one text.
#[derive(Debug, Clone, PartialEq)]
pub enum GroundTruth {
    /// Exactly one label applies
    Single(String),
    /// Any number of labels apply
    Multi(Vec<String>),
    /// One row of a 0/1 label matrix, every column kept as 1.0 or 0.0
    Indicator(BTreeMap<String, f64>),
}

impl GroundTruth {
    /// Builds a multi-label truth from one row of a 0/1 label matrix.
    ///
    /// Non-zero cells become 1.0 and zero cells 0.0, so every column stays a key.
    pub fn from_indicator_row(columns: &[impl AsRef<str>], row: &[u8]) -> Self {
        Self::Indicator(
            columns
                .iter()
                .zip(row)
                .map(|(column, &flag)| (column.as_ref().to_string(), if flag != 0 { 1.0 } else { 0.0 }))
                .collect(),
        )
    }

    /// True when `label` is one of the expected labels.
    pub fn contains(&self, label: &str) -> bool {
        match self {
            Self::Single(expected) => expected == label,
            Self::Multi(labels) => labels.iter().any(|expected| expected == label),
            Self::Indicator(columns) => columns.get(label).is_some_and(|&value| value > 0.0),
        }
    }

    /// Label-keyed form comparable with a [`Prediction`]: every true label maps to 1.0.
    pub fn to_label_map(&self) -> BTreeMap<String, f64> {
        match self {
            Self::Single(label) => BTreeMap::from([(label.clone(), 1.0)]),
            Self::Multi(labels) => labels.iter().map(|label| (label.clone(), 1.0)).collect(),
            Self::Indicator(columns) => columns.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub text: String,
    pub y_true: GroundTruth,
    pub y_pred: Prediction,
}

impl Serialize for GroundTruth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_label_map().serialize(serializer)
    }
}

#[derive(Serialize)]
struct CsvRecord<'a> {
    text: &'a str,
    y_true: String,
    y_pred: String,
}

/// Texts, their expected labels and the classifier's batch predictions, row by row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionReport {
    rows: Vec<ReportRow>,
}

impl PredictionReport {
    /// Runs `predict_batch` over `texts` and pairs each prediction with its truth.
    ///
    /// # Errors
    /// - `InvalidConfiguration` if `texts` and `truths` differ in length
    /// - `Uninitialized` if the classifier has no label dictionary and `texts` is not empty
    pub fn build<S: AsRef<str>>(classifier: &Classifier, texts: &[S], truths: Vec<GroundTruth>) -> Result<Self> {
        if texts.len() != truths.len() {
            return Err(ClassifierError::InvalidConfiguration(format!(
                "Got {} texts but {} ground truth rows",
                texts.len(),
                truths.len()
            )));
        }

        let predictions = classifier.predict_batch(texts, true)?;
        let rows = texts
            .iter()
            .zip(truths)
            .zip(predictions)
            .map(|((text, y_true), y_pred)| ReportRow {
                text: text.as_ref().to_string(),
                y_true,
                y_pred,
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Share of rows whose top predicted label is one of the true labels.
    ///
    /// `no_label` predictions count as misses. Returns `None` for an empty report.
    pub fn top_label_accuracy(&self) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let hits = self
            .rows
            .iter()
            .filter(|row| {
                row.y_pred
                    .top_label()
                    .is_some_and(|label| row.y_true.contains(label))
            })
            .count();
        Some(hits as f64 / self.rows.len() as f64)
    }

    /// Writes the rows as CSV with columns `text,y_true,y_pred`, label maps encoded as JSON.
    pub fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(CsvRecord {
                text: &row.text,
                y_true: encode_map(&row.y_true.to_label_map())?,
                y_pred: encode_map(&row.y_pred.to_map())?,
            })?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Writes `dev_preds.csv` or `test_preds.csv` into `artefact_dir` and returns its path.
    pub fn write_csv(&self, artefact_dir: impl AsRef<Path>, split: SplitType) -> Result<PathBuf> {
        let artefact_dir = artefact_dir.as_ref();
        fs::create_dir_all(artefact_dir).map_err(|e| ClassifierError::io(artefact_dir, e))?;

        let path = artefact_dir.join(split.file_name());
        let file = fs::File::create(&path).map_err(|e| ClassifierError::io(&path, e))?;
        self.to_writer(file)?;

        info!("Successfully wrote {} to {:?}", split.file_name(), artefact_dir);
        Ok(path)
    }
}

fn encode_map(map: &BTreeMap<String, f64>) -> Result<String> {
    Ok(serde_json::to_string(map)?)
}
