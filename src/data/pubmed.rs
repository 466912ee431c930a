//! PubMed abstract retrieval via E-utilities.

use std::{fs::File, io::Write, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use quick_xml::de::from_str;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use urlencoding::encode;

use crate::config::Settings;

const EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Accepted article page shape: `https://pubmed.ncbi.nlm.nih.gov/<pmid>/`.
static PUBMED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://pubmed\.ncbi\.nlm\.nih\.gov/(\d+)/?$").expect("valid regex")
});

/// Extract the PMID from a PubMed article URL, if the URL is well formed.
pub fn pmid_from_link(link: &str) -> Option<String> {
    PUBMED_URL
        .captures(link.trim())
        .map(|caps| caps[1].to_string())
}

/// Normalised PubMed record persisted to the local cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubRecord {
    pub pmid: String,
    pub title: String,
    pub abstract_text: String,
}

/// Fetch the abstract for one PMID, consulting the on-disk cache first.
pub async fn fetch_abstract(pmid: &str, settings: &Settings) -> Result<PubRecord> {
    let path = cache_path(pmid, settings);
    if path.exists() {
        let payload = std::fs::read_to_string(&path)?;
        if let Ok(record) = serde_json::from_str::<PubRecord>(&payload) {
            debug!(%pmid, "pubmed cache hit");
            return Ok(record);
        }
    }

    let client = http_client(settings)?;
    let url = format!(
        "{base}/efetch.fcgi?db=pubmed&rettype=abstract&retmode=xml&id={id}&tool={tool}&email={email}",
        base = EUTILS_BASE,
        id = pmid,
        tool = encode(&settings.pubmed_tool),
        email = encode(&settings.pubmed_email)
    );
    let xml = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let article_set: PubmedArticleSet = from_str(&xml).context("parsing efetch response")?;
    let record = article_set
        .articles
        .into_iter()
        .next()
        .and_then(PubmedArticle::into_record)
        .ok_or_else(|| anyhow!("no article returned for pmid {pmid}"))?;
    persist_record(&record, settings)?;
    Ok(record)
}

fn cache_path(pmid: &str, settings: &Settings) -> PathBuf {
    settings
        .join_data("raw/pubmed")
        .join(format!("{pmid}.json"))
}

fn persist_record(record: &PubRecord, settings: &Settings) -> Result<()> {
    let path = cache_path(&record.pmid, settings);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(&path).with_context(|| format!("create {path:?}"))?;
    file.write_all(serde_json::to_string(record)?.as_bytes())?;
    info!(path = %path.display(), pmid = %record.pmid, "cached pubmed record");
    Ok(())
}

fn http_client(settings: &Settings) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(format!("abstract-skimmer/0.1 (+{})", settings.pubmed_email))
        .gzip(true)
        .brotli(true)
        .build()?)
}

#[derive(Debug, Deserialize, Default)]
struct PubmedArticleSet {
    #[serde(rename = "PubmedArticle", default)]
    articles: Vec<PubmedArticle>,
}

#[derive(Debug, Deserialize)]
struct PubmedArticle {
    #[serde(rename = "MedlineCitation")]
    citation: MedlineCitation,
}

impl PubmedArticle {
    fn into_record(self) -> Option<PubRecord> {
        let pmid = self.citation.pmid.value;
        let article = self.citation.article;
        let title = article.title.value;
        // Structured abstracts arrive as several AbstractText nodes; join them
        // so downstream segmentation sees one document.
        let abstract_text = article
            .abstract_section
            .as_ref()
            .map(|abs| {
                abs.text
                    .iter()
                    .filter_map(|t| t.value.clone())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        Some(PubRecord {
            pmid,
            title,
            abstract_text,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MedlineCitation {
    #[serde(rename = "PMID")]
    pmid: TextNode,
    #[serde(rename = "Article")]
    article: Article,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(rename = "ArticleTitle")]
    title: TextNode,
    #[serde(rename = "Abstract")]
    abstract_section: Option<Abstract>,
}

#[derive(Debug, Deserialize)]
struct Abstract {
    #[serde(rename = "AbstractText", default)]
    text: Vec<AbstractText>,
}

#[derive(Debug, Deserialize)]
struct AbstractText {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text")]
    value: String,
}
