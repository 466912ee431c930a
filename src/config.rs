//! Runtime configuration utilities for abstract-skimmer.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Contact email for PubMed E-utilities courtesy policy.
    pub pubmed_email: String,
    /// Tool name sent with PubMed requests.
    pub pubmed_tool: String,
    /// Directory holding the exported classifier artifacts.
    pub model_dir: PathBuf,
    /// Root folder for cached abstracts.
    pub data_dir: PathBuf,
    /// Default HTTP port when the CLI does not override it.
    pub port: u16,
    /// Upload ceiling for `.txt` submissions, in bytes.
    pub max_upload_bytes: usize,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let pubmed_email =
            env::var("PUBMED_EMAIL").unwrap_or_else(|_| "research@example.com".to_string());
        let pubmed_tool =
            env::var("PUBMED_TOOL").unwrap_or_else(|_| "abstract_skimmer".to_string());
        let model_dir = env::var("MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./model"));
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024 * 1024);

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;

        Ok(Self {
            pubmed_email,
            pubmed_tool,
            model_dir,
            data_dir,
            port,
            max_upload_bytes,
        })
    }

    /// Convenience helper for derived data path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for model artifact paths.
    pub fn join_model<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.model_dir.join(path)
    }
}
