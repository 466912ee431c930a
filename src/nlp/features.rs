//! Per-line feature construction for the section classifier.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One-hot depth for the line-number feature, fixed by the trained model.
pub const LINE_NUMBER_DEPTH: usize = 15;
/// One-hot depth for the total-lines feature, fixed by the trained model.
pub const TOTAL_LINES_DEPTH: usize = 20;

/// One line of an abstract with its positional context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbstractLine {
    pub text: String,
    pub line_number: usize,
    pub total_lines: usize,
}

/// Attach 0-based line numbers and the total line count to each sentence.
pub fn with_line_numbers(sentences: &[String]) -> Vec<AbstractLine> {
    let total_lines = sentences.len();
    sentences
        .iter()
        .enumerate()
        .map(|(line_number, text)| AbstractLine {
            text: text.clone(),
            line_number,
            total_lines,
        })
        .collect()
}

/// Space-join the characters of a sentence for the char-level model input.
pub fn split_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// One-hot encode positional indices. Indices at or beyond `depth` produce an
/// all-zero row, matching the encoding the model was trained against.
pub fn one_hot(indices: &[usize], depth: usize) -> Array2<f32> {
    let mut matrix = Array2::zeros((indices.len(), depth));
    for (row, &idx) in indices.iter().enumerate() {
        if idx < depth {
            matrix[[row, idx]] = 1.0;
        }
    }
    matrix
}

/// One-hot line-number matrix of shape `[n, LINE_NUMBER_DEPTH]`.
pub fn line_number_matrix(lines: &[AbstractLine]) -> Array2<f32> {
    let indices: Vec<usize> = lines.iter().map(|l| l.line_number).collect();
    one_hot(&indices, LINE_NUMBER_DEPTH)
}

/// One-hot total-lines matrix of shape `[n, TOTAL_LINES_DEPTH]`.
pub fn total_lines_matrix(lines: &[AbstractLine]) -> Array2<f32> {
    let indices: Vec<usize> = lines.iter().map(|l| l.total_lines).collect();
    one_hot(&indices, TOTAL_LINES_DEPTH)
}
