use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use super::utils::round_to;

/// Key reported with a score of 1.0 when no label word occurs in the text.
pub const NO_LABEL: &str = "no_label";

/// The scores produced for one text.
///
/// A text either carries evidence for at least one label, in which case every
/// label gets a softmax or sigmoid score, or it carries none and the result is
/// a confident "no label applies". Both cases flatten to a label-keyed map with
/// [`Prediction::to_map`], which is also what the JSON form looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Softmax or sigmoid score per label
    Scored(BTreeMap<String, f64>),
    /// None of the listed labels had a matching word
    NoLabel(Vec<String>),
}

impl Prediction {
    pub fn is_no_label(&self) -> bool {
        matches!(self, Self::NoLabel(_))
    }

    /// Score for `label`, including the synthetic `no_label` key.
    pub fn get(&self, label: &str) -> Option<f64> {
        match self {
            Self::Scored(scores) => scores.get(label).copied(),
            Self::NoLabel(_) if label == NO_LABEL => Some(1.0),
            Self::NoLabel(labels) => labels.iter().any(|l| l == label).then_some(0.0),
        }
    }

    /// The highest scoring label, or `no_label` when there was no evidence.
    ///
    /// Ties resolve to the label that sorts first.
    pub fn top_label(&self) -> Option<&str> {
        match self {
            Self::Scored(scores) => scores
                .iter()
                .fold(None, |best: Option<(&String, f64)>, (label, &score)| match best {
                    Some((_, best_score)) if best_score >= score => best,
                    _ => Some((label, score)),
                })
                .map(|(label, _)| label.as_str()),
            Self::NoLabel(_) => Some(NO_LABEL),
        }
    }

    /// Flattens into a label-keyed map; `NoLabel` maps every label to 0.0 and `no_label` to 1.0.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        match self {
            Self::Scored(scores) => scores.clone(),
            Self::NoLabel(labels) => labels
                .iter()
                .map(|label| (label.clone(), 0.0))
                .chain(std::iter::once((NO_LABEL.to_string(), 1.0)))
                .collect(),
        }
    }

    pub fn sum(&self) -> f64 {
        match self {
            Self::Scored(scores) => scores.values().sum(),
            Self::NoLabel(_) => 1.0,
        }
    }

    /// Rounds every score to `precision` decimal digits.
    ///
    /// `NoLabel` holds only exact 0.0 and 1.0 values, which rounding leaves unchanged.
    pub fn rounded(self, precision: u32) -> Self {
        match self {
            Self::Scored(scores) => Self::Scored(
                scores
                    .into_iter()
                    .map(|(label, score)| (label, round_to(score, precision)))
                    .collect(),
            ),
            no_label => no_label,
        }
    }
}

impl From<Prediction> for BTreeMap<String, f64> {
    fn from(prediction: Prediction) -> Self {
        prediction.to_map()
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}
