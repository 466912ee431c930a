//! HTTP route handlers for Axum.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::{
    api::types::{ErrorBody, SkimResponse},
    data::pubmed,
    nlp,
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

/// Rejections for the `/predict` input contract.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Only valid PubMed links are accepted.")]
    InvalidLink,
    #[error("Failed to fetch PubMed abstract: {0}")]
    Fetch(String),
    #[error("No abstract found at the provided PubMed link.")]
    EmptyAbstract,
    #[error("Only .txt files are supported.")]
    UnsupportedFile,
    #[error("Uploaded file is too large.")]
    OversizeFile,
    #[error("Uploaded file is not valid UTF-8 text.")]
    NotUtf8,
    #[error("No input provided.")]
    MissingInput,
}

/// Form submission after multipart decoding. At most one source is used, in
/// link > text > file precedence.
#[derive(Debug, Default)]
struct Submission {
    pubmed_link: Option<String>,
    abstract_text: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

pub async fn predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<SkimResponse> {
    let submission = read_submission(multipart).await?;
    let text = resolve_text(submission, &state)
        .await
        .map_err(|err| bad_request(err.to_string()))?;
    let skimmed = nlp::skim(state.classifier.as_ref(), &text)
        .map_err(|err| bad_request(err.to_string()))?;
    Ok(Json(SkimResponse::from(skimmed)))
}

async fn read_submission(
    mut multipart: Multipart,
) -> Result<Submission, (StatusCode, Json<ErrorBody>)> {
    let mut submission = Submission::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| bad_request(err.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pubmed_link" => {
                submission.pubmed_link =
                    Some(field.text().await.map_err(|err| bad_request(err.to_string()))?);
            }
            "abstract_text" => {
                submission.abstract_text =
                    Some(field.text().await.map_err(|err| bad_request(err.to_string()))?);
            }
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| bad_request(err.to_string()))?;
                submission.file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }
    Ok(submission)
}

async fn resolve_text(submission: Submission, state: &AppState) -> Result<String, InputError> {
    if let Some(link) = submission
        .pubmed_link
        .as_deref()
        .map(str::trim)
        .filter(|link| !link.is_empty())
    {
        let pmid = pubmed::pmid_from_link(link).ok_or(InputError::InvalidLink)?;
        let record = pubmed::fetch_abstract(&pmid, &state.settings)
            .await
            .map_err(|err| {
                warn!(%pmid, %err, "pubmed fetch failed");
                InputError::Fetch(err.to_string())
            })?;
        if record.abstract_text.trim().is_empty() {
            return Err(InputError::EmptyAbstract);
        }
        return Ok(record.abstract_text);
    }

    if let Some(text) = submission
        .abstract_text
        .filter(|text| !text.trim().is_empty())
    {
        return Ok(text);
    }

    if let Some((filename, bytes)) = submission.file {
        if !filename.ends_with(".txt") {
            return Err(InputError::UnsupportedFile);
        }
        if bytes.len() > state.settings.max_upload_bytes {
            return Err(InputError::OversizeFile);
        }
        return String::from_utf8(bytes).map_err(|_| InputError::NotUtf8);
    }

    Err(InputError::MissingInput)
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}
