//! Sentence-role classification seam. The ONNX backend is feature gated; the
//! cue-lexicon fallback keeps the pipeline usable without model artifacts.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{config::Settings, nlp::features::AbstractLine};

/// Rhetorical roles, in model class order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SectionLabel {
    Background,
    Conclusions,
    Methods,
    Objective,
    Results,
}

impl SectionLabel {
    /// All labels in class order, index-aligned with the model output.
    pub const ALL: [SectionLabel; 5] = [
        SectionLabel::Background,
        SectionLabel::Conclusions,
        SectionLabel::Methods,
        SectionLabel::Objective,
        SectionLabel::Results,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Background => "BACKGROUND",
            SectionLabel::Conclusions => "CONCLUSIONS",
            SectionLabel::Methods => "METHODS",
            SectionLabel::Objective => "OBJECTIVE",
            SectionLabel::Results => "RESULTS",
        }
    }
}

impl std::fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicted role for one abstract line.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub line_number: usize,
    pub label: SectionLabel,
    pub score: f32,
    pub text: String,
}

/// Trait for section classifier implementations.
pub trait SectionClassifier: Send + Sync {
    fn classify(&self, lines: &[AbstractLine]) -> Result<Vec<Prediction>>;
}

/// Load the strongest classifier available for the current build.
pub async fn load_model(settings: &Settings) -> Result<Arc<dyn SectionClassifier>> {
    #[cfg(feature = "onx")]
    {
        let model_path = settings.join_model("model.onnx");
        if model_path.exists() {
            let classifier = super::onnx::OnnxClassifier::load(settings)?;
            info!(path = %model_path.display(), "loaded onnx section classifier");
            return Ok(Arc::new(classifier) as Arc<dyn SectionClassifier>);
        }
        tracing::warn!(
            path = %model_path.display(),
            "model artifacts missing; falling back to cue lexicons"
        );
    }
    info!(model_dir = %settings.model_dir.display(), "using cue-lexicon section classifier");
    Ok(Arc::new(HeuristicClassifier) as Arc<dyn SectionClassifier>)
}

/// Cue-lexicon fallback used when no model artifacts are installed.
pub struct HeuristicClassifier;

const OBJECTIVE_CUES: &[&str] = &[
    "aim",
    "aimed",
    "objective",
    "purpose",
    "we sought",
    "to investigate",
    "to determine",
    "to evaluate",
    "to assess",
    "to examine",
    "hypothesi",
];

const METHODS_CUES: &[&str] = &[
    "randomized",
    "randomised",
    "enrolled",
    "recruited",
    "were assigned",
    "was measured",
    "were measured",
    "was administered",
    "double-blind",
    "placebo",
    "cohort",
    "participants",
    "patients were",
    "we performed",
    "protocol",
    "regression",
];

const RESULTS_CUES: &[&str] = &[
    "significant",
    "p <",
    "p<",
    "p =",
    "95% ci",
    "confidence interval",
    "odds ratio",
    "hazard ratio",
    "respectively",
    "increased",
    "decreased",
    "compared with",
    "versus",
];

const CONCLUSIONS_CUES: &[&str] = &[
    "in conclusion",
    "we conclude",
    "these findings",
    "these results suggest",
    "our findings",
    "our results",
    "suggests that",
    "should be considered",
    "warrant",
];

const BACKGROUND_CUES: &[&str] = &[
    "is a",
    "are a",
    "has been",
    "have been",
    "remains",
    "is associated",
    "little is known",
    "is one of",
    "is the",
    "is common",
    "known to",
];

fn cues_for(label: SectionLabel) -> &'static [&'static str] {
    match label {
        SectionLabel::Background => BACKGROUND_CUES,
        SectionLabel::Conclusions => CONCLUSIONS_CUES,
        SectionLabel::Methods => METHODS_CUES,
        SectionLabel::Objective => OBJECTIVE_CUES,
        SectionLabel::Results => RESULTS_CUES,
    }
}

/// Prior from the line's relative position; each role peaks where it usually
/// sits in a structured abstract.
fn position_prior(label: SectionLabel, relative: f32) -> f32 {
    let prior = match label {
        SectionLabel::Background => 1.0 - relative,
        SectionLabel::Objective => 0.8 - (relative - 0.2).abs() * 2.0,
        SectionLabel::Methods => 0.9 - (relative - 0.45).abs() * 2.0,
        SectionLabel::Results => 0.9 - (relative - 0.7).abs() * 2.0,
        SectionLabel::Conclusions => relative,
    };
    prior.max(0.0)
}

fn score_line(line: &AbstractLine) -> Prediction {
    let lower = line.text.to_lowercase();
    let denom = line.total_lines.saturating_sub(1).max(1) as f32;
    let relative = line.line_number as f32 / denom;

    let mut scores = [0f32; 5];
    for (slot, label) in SectionLabel::ALL.iter().enumerate() {
        let hits = cues_for(*label)
            .iter()
            .filter(|cue| lower.contains(*cue))
            .count();
        scores[slot] = position_prior(*label, relative) + 0.6 * hits as f32;
    }

    let total: f32 = scores.iter().sum();
    let (best, best_score) = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .unwrap_or((0, &0.0));
    let score = if total > 0.0 {
        best_score / total
    } else {
        1.0 / SectionLabel::ALL.len() as f32
    };

    Prediction {
        line_number: line.line_number,
        label: SectionLabel::ALL[best],
        score,
        text: line.text.clone(),
    }
}

impl SectionClassifier for HeuristicClassifier {
    fn classify(&self, lines: &[AbstractLine]) -> Result<Vec<Prediction>> {
        Ok(lines.iter().map(score_line).collect())
    }
}
