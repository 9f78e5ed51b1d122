use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use clear_bow::{Classifier, ClassifierType, GroundTruth, LabelDictionary, ModelStore, PredictionReport, SplitType};
use log::info;
use serde::Deserialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Where a model lives: an explicit directory or a name in the model store
#[derive(Args)]
struct ModelLocation {
    /// Directory holding config.json and label_dictionary.json
    #[arg(long, conflicts_with = "name")]
    model_dir: Option<PathBuf>,

    /// Name of a model in the store ($CLEAR_BOW_HOME/models by default)
    #[arg(long)]
    name: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a model from a JSON file mapping labels to word lists
    Init {
        /// JSON file of the form {"label": ["word", ...]}
        #[arg(long)]
        labels: PathBuf,

        /// multi_class or multi_label
        #[arg(long, default_value = "multi_class")]
        classifier_type: String,

        #[command(flatten)]
        location: ModelLocation,
    },
    /// Score one or more texts, printing one JSON object per line
    Predict {
        #[command(flatten)]
        location: ModelLocation,

        /// Print unrounded scores
        #[arg(long)]
        raw: bool,

        texts: Vec<String>,
    },
    /// Score a JSONL file of {"text": ..., "labels": [...]} rows and write a CSV report
    Report {
        #[command(flatten)]
        location: ModelLocation,

        #[arg(long)]
        input: PathBuf,

        /// dev or test
        #[arg(long, default_value = "test")]
        split: String,

        /// Output directory, defaults to the model directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List models in the store
    Models,
    /// Delete a model from the store
    Remove {
        #[arg(long)]
        name: String,
    },
}

#[derive(Deserialize)]
struct ReportInput {
    text: String,
    labels: Vec<String>,
}

fn resolve_model_dir(location: &ModelLocation) -> Result<PathBuf> {
    match (&location.model_dir, &location.name) {
        (Some(dir), _) => Ok(dir.clone()),
        (None, Some(name)) => Ok(ModelStore::new_default()?.model_path(name)?),
        (None, None) => bail!("Either --model-dir or --name is required"),
    }
}

fn init(labels: &Path, classifier_type: &str, location: &ModelLocation) -> Result<()> {
    let classifier_type: ClassifierType = classifier_type.parse()?;
    let raw = fs::read_to_string(labels).with_context(|| format!("Failed to read {:?}", labels))?;
    let dictionary: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid label dictionary in {:?}", labels))?;

    let classifier = Classifier::new(classifier_type, Some(LabelDictionary::from(dictionary)));
    if !classifier.is_initialized() {
        bail!("Label dictionary in {:?} has no labels", labels);
    }

    let model_dir = resolve_model_dir(location)?;
    classifier.save(&model_dir)?;
    println!("Saved {} model with {} labels to {:?}", classifier_type, classifier.info().num_labels, model_dir);
    Ok(())
}

fn predict(location: &ModelLocation, raw: bool, texts: &[String]) -> Result<()> {
    let classifier = Classifier::from_disk(resolve_model_dir(location)?)?;
    for prediction in classifier.predict_batch(texts, !raw)? {
        println!("{}", serde_json::to_string(&prediction)?);
    }
    Ok(())
}

fn report(location: &ModelLocation, input: &Path, split: &str, out: Option<&Path>) -> Result<()> {
    let split: SplitType = split.parse()?;
    let model_dir = resolve_model_dir(location)?;
    let classifier = Classifier::from_disk(&model_dir)?;

    let raw = fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))?;
    let mut texts = Vec::new();
    let mut truths = Vec::new();
    for (i, line) in raw.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
        let row: ReportInput =
            serde_json::from_str(line).with_context(|| format!("Invalid row on line {} of {:?}", i + 1, input))?;
        texts.push(row.text);
        truths.push(GroundTruth::Multi(row.labels));
    }
    info!("Scoring {} rows from {:?}", texts.len(), input);

    let report = PredictionReport::build(&classifier, &texts, truths)?;
    let path = report.write_csv(out.unwrap_or(&model_dir), split)?;

    println!("Wrote {} rows to {:?}", report.len(), path);
    if let Some(accuracy) = report.top_label_accuracy() {
        println!("Top label accuracy: {:.1}%", accuracy * 100.0);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Init {
            labels,
            classifier_type,
            location,
        } => init(&labels, &classifier_type, &location),
        Command::Predict { location, raw, texts } => predict(&location, raw, &texts),
        Command::Report {
            location,
            input,
            split,
            out,
        } => report(&location, &input, &split, out.as_deref()),
        Command::Models => {
            let store = ModelStore::new_default()?;
            info!("Listing models in {:?}", store.models_dir());
            for name in store.list()? {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Remove { name } => {
            ModelStore::new_default()?.remove(&name)?;
            println!("Removed model '{}'", name);
            Ok(())
        }
    }
}
