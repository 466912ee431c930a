//! Shared DTOs for JSON responses.

use serde::Serialize;

use crate::nlp::SkimmedAbstract;

#[derive(Debug, Clone, Serialize)]
pub struct SectionDto {
    pub label: String,
    pub sentences: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionDto {
    pub line_number: usize,
    pub label: String,
    pub score: f32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkimResponse {
    pub sections: Vec<SectionDto>,
    pub predictions: Vec<PredictionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<SkimmedAbstract> for SkimResponse {
    fn from(value: SkimmedAbstract) -> Self {
        let sections = value
            .sections
            .into_iter()
            .map(|section| SectionDto {
                label: section.label.to_string(),
                sentences: section.sentences,
            })
            .collect();
        let predictions = value
            .predictions
            .into_iter()
            .map(|prediction| PredictionDto {
                line_number: prediction.line_number,
                label: prediction.label.to_string(),
                score: prediction.score,
                text: prediction.text,
            })
            .collect();
        SkimResponse {
            sections,
            predictions,
        }
    }
}
