//! ONNX-backed section classifier built on `ort` and `tokenizers`.
//!
//! Expects three artifacts under the configured model directory: the exported
//! graph `model.onnx`, a word-level `tokenizer.json`, and a char-level
//! `char_tokenizer.json` applied to the space-joined character stream. Graph
//! inputs, in order: `line_numbers` f32 `[n,15]`, `total_lines` f32 `[n,20]`,
//! `tokens` i64 `[n,L]`, `chars` i64 `[n,C]`; output is `[n,5]` class
//! probabilities.

use std::{path::Path, sync::Arc};

use anyhow::{anyhow, Context, Result};
use ndarray::{Array2, CowArray, IxDyn};
use ort::{Environment, GraphOptimizationLevel, Session, SessionBuilder, Value};
use tokenizers::Tokenizer;

use crate::{
    config::Settings,
    nlp::{
        classifier::{Prediction, SectionClassifier, SectionLabel},
        features::{self, AbstractLine},
    },
};

pub struct OnnxClassifier {
    session: Session,
    tokenizer: Tokenizer,
    char_tokenizer: Tokenizer,
}

impl OnnxClassifier {
    pub fn load(settings: &Settings) -> Result<Self> {
        let environment = Arc::new(
            Environment::builder()
                .with_name("abstract-skimmer")
                .build()?,
        );
        let model_path = settings.join_model("model.onnx");
        let session = SessionBuilder::new(&environment)?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_model_from_file(&model_path)
            .with_context(|| format!("loading model {}", model_path.display()))?;
        let tokenizer = load_tokenizer(&settings.join_model("tokenizer.json"))?;
        let char_tokenizer = load_tokenizer(&settings.join_model("char_tokenizer.json"))?;
        Ok(Self {
            session,
            tokenizer,
            char_tokenizer,
        })
    }
}

fn load_tokenizer(path: &Path) -> Result<Tokenizer> {
    Tokenizer::from_file(path).map_err(|e| anyhow!("loading tokenizer {}: {e}", path.display()))
}

/// Encode a batch of strings into an id matrix padded with zeros to the
/// longest encoding.
fn encode_batch(tokenizer: &Tokenizer, texts: &[String]) -> Result<Array2<i64>> {
    let encodings = tokenizer
        .encode_batch(texts.to_vec(), true)
        .map_err(|e| anyhow!("tokenizing batch: {e}"))?;
    let width = encodings
        .iter()
        .map(|e| e.get_ids().len())
        .max()
        .unwrap_or(0)
        .max(1);
    let mut matrix = Array2::zeros((encodings.len(), width));
    for (row, encoding) in encodings.iter().enumerate() {
        for (col, &id) in encoding.get_ids().iter().enumerate() {
            matrix[[row, col]] = id as i64;
        }
    }
    Ok(matrix)
}

impl SectionClassifier for OnnxClassifier {
    fn classify(&self, lines: &[AbstractLine]) -> Result<Vec<Prediction>> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }
        let texts: Vec<String> = lines.iter().map(|l| l.text.clone()).collect();
        let char_texts: Vec<String> = texts.iter().map(|t| features::split_chars(t)).collect();

        let line_numbers: CowArray<'_, f32, IxDyn> =
            CowArray::from(features::line_number_matrix(lines).into_dyn());
        let total_lines: CowArray<'_, f32, IxDyn> =
            CowArray::from(features::total_lines_matrix(lines).into_dyn());
        let tokens: CowArray<'_, i64, IxDyn> =
            CowArray::from(encode_batch(&self.tokenizer, &texts)?.into_dyn());
        let chars: CowArray<'_, i64, IxDyn> =
            CowArray::from(encode_batch(&self.char_tokenizer, &char_texts)?.into_dyn());

        let allocator = self.session.allocator();
        let inputs = vec![
            Value::from_array(allocator, &line_numbers)?,
            Value::from_array(allocator, &total_lines)?,
            Value::from_array(allocator, &tokens)?,
            Value::from_array(allocator, &chars)?,
        ];
        let outputs = self.session.run(inputs)?;
        let probs = outputs[0].try_extract::<f32>()?;
        let view = probs.view();

        let mut predictions = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let mut best = 0usize;
            let mut best_prob = f32::MIN;
            for class in 0..SectionLabel::ALL.len() {
                let prob = view[[row, class]];
                if prob > best_prob {
                    best_prob = prob;
                    best = class;
                }
            }
            let label = SectionLabel::from_index(best)
                .ok_or_else(|| anyhow!("class index {best} out of range"))?;
            predictions.push(Prediction {
                line_number: line.line_number,
                label,
                score: best_prob,
                text: line.text.clone(),
            });
        }
        Ok(predictions)
    }
}
