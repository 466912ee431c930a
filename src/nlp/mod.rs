//! Abstract skimming orchestration layer.

pub mod classifier;
pub mod features;
#[cfg(feature = "onx")]
pub mod onnx;
pub mod sentences;

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use self::classifier::{Prediction, SectionClassifier, SectionLabel};

/// Sentences grouped under one rhetorical role.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub label: SectionLabel,
    pub sentences: Vec<String>,
}

/// Full classification result for one abstract.
#[derive(Debug, Clone, Serialize)]
pub struct SkimmedAbstract {
    pub sections: Vec<Section>,
    pub predictions: Vec<Prediction>,
}

/// Classify every sentence of `text` and group them by role.
pub fn skim(classifier: &dyn SectionClassifier, text: &str) -> Result<SkimmedAbstract> {
    let sentences = sentences::split_sentences(text);
    anyhow::ensure!(!sentences.is_empty(), "abstract contains no sentences");
    let lines = features::with_line_numbers(&sentences);
    let predictions = classifier.classify(&lines)?;
    let skimmed = aggregate(predictions);
    info!(
        sections = skimmed.sections.len(),
        lines = skimmed.predictions.len(),
        "skimmed abstract"
    );
    Ok(skimmed)
}

/// Group predictions by label. Sections keep the order in which each label
/// first appears; sentences within a section keep abstract order.
pub fn aggregate(predictions: Vec<Prediction>) -> SkimmedAbstract {
    let mut grouped: IndexMap<SectionLabel, Vec<String>> = IndexMap::new();
    for prediction in &predictions {
        grouped
            .entry(prediction.label)
            .or_default()
            .push(prediction.text.clone());
    }
    let sections = grouped
        .into_iter()
        .map(|(label, sentences)| Section { label, sentences })
        .collect();
    SkimmedAbstract {
        sections,
        predictions,
    }
}
