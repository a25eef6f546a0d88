//! Runtime configuration utilities for motion-prep.

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

/// Texts shorter than this are dropped from the training table.
pub const MIN_TEXT_CHARS: usize = 150;

/// Lowercased title prefix marking generic "with reference to government bill" motions.
pub const GENERIC_TITLE_PREFIX: &str = "med anledning av prop";

/// Free text shorter than this after cleaning is rejected by `clean`.
pub const MIN_INPUT_CHARS: usize = 300;

const CATALOGUE_URL: &str = "https://data.riksdagen.se/dataset/katalog/dataset.xml";
const DATASET_BASE_URL: &str = "https://data.riksdagen.se/";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder for downloaded and derived data artefacts.
    pub data_dir: PathBuf,
    /// XML listing of every dataset published by the parliament open data service.
    pub catalogue_url: String,
    /// Prefix joined with the relative archive urls of the catalogue.
    pub dataset_base_url: String,
    /// Catalogue `typ` to download (`mot` for motions).
    pub document_type: String,
    /// Catalogue `format` to download.
    pub file_format: String,
    /// Per-request timeout for catalogue and archive downloads.
    pub download_timeout: Duration,
    pub min_text_chars: usize,
    pub generic_title_prefix: String,
    pub min_input_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            catalogue_url: CATALOGUE_URL.to_string(),
            dataset_base_url: DATASET_BASE_URL.to_string(),
            document_type: "mot".to_string(),
            file_format: "json".to_string(),
            download_timeout: Duration::from_secs(10),
            min_text_chars: MIN_TEXT_CHARS,
            generic_title_prefix: GENERIC_TITLE_PREFIX.to_string(),
            min_input_chars: MIN_INPUT_CHARS,
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let settings = Self {
            data_dir,
            catalogue_url: env::var("CATALOGUE_URL").unwrap_or(defaults.catalogue_url),
            dataset_base_url: env::var("DATASET_BASE_URL").unwrap_or(defaults.dataset_base_url),
            document_type: env::var("DOCUMENT_TYPE").unwrap_or(defaults.document_type),
            file_format: env::var("FILE_FORMAT").unwrap_or(defaults.file_format),
            download_timeout: parse_var::<u64>("DOWNLOAD_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.download_timeout),
            min_text_chars: parse_var("MIN_TEXT_CHARS").unwrap_or(defaults.min_text_chars),
            generic_title_prefix: env::var("GENERIC_TITLE_PREFIX")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.generic_title_prefix),
            min_input_chars: parse_var("MIN_INPUT_CHARS").unwrap_or(defaults.min_input_chars),
        };

        std::fs::create_dir_all(settings.zip_dir()).context("creating archive dir")?;
        Ok(settings)
    }

    /// Settings rooted at another data directory, defaults otherwise.
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Directory holding the downloaded zip archives.
    pub fn zip_dir(&self) -> PathBuf {
        self.join_data("downloaded/zipped")
    }

    /// JSONL store of every parsed motion.
    pub fn raw_store_path(&self) -> PathBuf {
        self.join_data("downloaded/raw_swe_parl_mot.jsonl")
    }

    /// Parquet table consumed by model training.
    pub fn training_table_path(&self) -> PathBuf {
        self.join_data("downloaded/prepped_training_data.parquet")
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
