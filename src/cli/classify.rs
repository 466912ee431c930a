//! CLI entry-point for offline abstract classification.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use futures::stream::{self, StreamExt};
use tracing::{info, instrument};

use crate::{
    cli::OutputFormat,
    config::Settings,
    data::pubmed,
    nlp::{self, SkimmedAbstract},
};

/// Args for the `classify` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Path to a UTF-8 text file holding one abstract.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Raw abstract text.
    #[arg(long)]
    pub text: Option<String>,
    /// Comma separated PubMed ids to fetch and classify.
    #[arg(long, value_delimiter = ',')]
    pub pmids: Vec<String>,
    /// Output format.
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let classifier = nlp::classifier::load_model(&settings).await?;

    let mut documents: Vec<(String, String)> = Vec::new();
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        documents.push((path.display().to_string(), text));
    }
    if let Some(text) = &args.text {
        documents.push(("text".to_string(), text.clone()));
    }
    if !args.pmids.is_empty() {
        let concurrency = 2usize; // be nice to E-utilities
        let fetched = stream::iter(args.pmids.clone())
            .map(|pmid| {
                let settings = settings.clone();
                async move {
                    let record = pubmed::fetch_abstract(&pmid, &settings)
                        .await
                        .with_context(|| format!("fetching pmid {pmid}"))?;
                    Ok::<_, anyhow::Error>((pmid, record.abstract_text))
                }
            })
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;
        for result in fetched {
            documents.push(result?);
        }
    }
    anyhow::ensure!(
        !documents.is_empty(),
        "no input provided; pass --file, --text, or --pmids"
    );

    for (source, text) in documents {
        let skimmed = nlp::skim(classifier.as_ref(), &text)?;
        info!(%source, sections = skimmed.sections.len(), "classified abstract");
        render(&source, &skimmed, &args.format)?;
    }
    Ok(())
}

fn render(source: &str, skimmed: &SkimmedAbstract, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(skimmed)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["source", "line_number", "label", "score", "text"])?;
            for prediction in &skimmed.predictions {
                writer.write_record(&[
                    source.to_string(),
                    prediction.line_number.to_string(),
                    prediction.label.to_string(),
                    format!("{:.4}", prediction.score),
                    prediction.text.clone(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Text => {
            for section in &skimmed.sections {
                println!("{}", section.label);
                for sentence in &section.sentences {
                    println!("  {sentence}");
                }
            }
        }
    }
    Ok(())
}
