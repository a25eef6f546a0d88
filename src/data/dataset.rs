//! Training table assembly: load the raw store, clean, filter, write Parquet.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{DataFrame, NamedFrom, ParquetReader, ParquetWriter, SerReader, Series};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    data::record::RawMotionRecord,
    text::{trim, TrimInput, TrimPipeline},
};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("no data found at {0}")]
    NoData(PathBuf),
}

/// A raw record with its dates parsed. Any field may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionRow {
    pub id: String,
    pub date: Option<NaiveDateTime>,
    pub file_date: Option<NaiveDateTime>,
    pub title: String,
    pub subtitle: Option<String>,
    pub text: String,
    pub main_author: Option<String>,
    pub author_party: Option<String>,
}

impl From<RawMotionRecord> for MotionRow {
    fn from(raw: RawMotionRecord) -> Self {
        Self {
            date: raw.date.as_deref().and_then(parse_date),
            file_date: raw.file_date.as_deref().and_then(parse_date),
            id: raw.id,
            title: raw.title,
            subtitle: raw.subtitle,
            text: raw.text,
            main_author: raw.main_author,
            author_party: raw.author_party,
        }
    }
}

impl MotionRow {
    fn complete(self) -> Option<CleanedMotionRecord> {
        Some(CleanedMotionRecord {
            date: self.date?,
            file_date: self.file_date?,
            subtitle: self.subtitle?,
            main_author: self.main_author?,
            author_party: self.author_party?,
            id: self.id,
            title: self.title,
            text: self.text,
        })
    }
}

/// A motion with every field present. `text` and `title` go through the
/// trimming cascade before the row is written.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedMotionRecord {
    pub id: String,
    pub date: NaiveDateTime,
    pub file_date: NaiveDateTime,
    pub title: String,
    pub subtitle: String,
    pub text: String,
    pub main_author: String,
    pub author_party: String,
}

/// Feature and target columns handed to model training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub text: String,
    pub title: String,
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and the `T`-separated form.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, DATE_FORMAT))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Load the JSONL raw store.
pub fn load_raw_store(path: &Path) -> Result<Vec<RawMotionRecord>> {
    if !path.exists() {
        warn!(path = %path.display(), "raw motion store missing");
        return Err(DatasetError::NoData(path.to_path_buf()).into());
    }
    info!(path = %path.display(), "loading raw motion store");
    let file = File::open(path).with_context(|| format!("open {path:?}"))?;
    let mut records = Vec::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: RawMotionRecord = serde_json::from_str(&line)
            .with_context(|| format!("parse {path:?} line {}", lineno + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Drop rows with any missing field.
pub fn filter_nan_rows(rows: Vec<MotionRow>) -> Vec<CleanedMotionRecord> {
    let before = rows.len();
    let kept: Vec<_> = rows.into_iter().filter_map(MotionRow::complete).collect();
    info!(removed = before - kept.len(), "filtered rows with missing values");
    kept
}

/// Collapse whitespace in titles and run the trimming cascade over texts.
pub fn prep_text(
    rows: Vec<CleanedMotionRecord>,
    pipeline: &TrimPipeline,
) -> Vec<CleanedMotionRecord> {
    rows.into_iter()
        .map(|mut row| {
            row.title = trim::trim_whitespace(&row.title);
            row.text = pipeline.run(TrimInput::new(
                &row.text,
                Some(row.title.as_str()),
                Some(row.subtitle.as_str()),
            ));
            row
        })
        .collect()
}

/// Drop rows whose text has fewer than `min_chars` characters.
pub fn filter_short_motions(
    rows: Vec<CleanedMotionRecord>,
    min_chars: usize,
) -> Vec<CleanedMotionRecord> {
    let before = rows.len();
    let kept: Vec<_> = rows
        .into_iter()
        .filter(|row| row.text.chars().count() >= min_chars)
        .collect();
    info!(
        removed = before - kept.len(),
        min_chars, "filtered short texts"
    );
    kept
}

/// Drop rows whose lowercased title starts with the generic `prefix`.
pub fn filter_titles(rows: Vec<CleanedMotionRecord>, prefix: &str) -> Vec<CleanedMotionRecord> {
    let before = rows.len();
    let prefix = prefix.to_lowercase();
    let kept: Vec<_> = rows
        .into_iter()
        .filter(|row| !row.title.to_lowercase().starts_with(&prefix))
        .collect();
    info!(removed = before - kept.len(), "filtered generic titles");
    kept
}

/// Load, clean and filter the raw store, then write the training table.
#[instrument(skip(settings))]
pub fn prep_training_dataset(settings: &Settings) -> Result<usize> {
    let raw = load_raw_store(&settings.raw_store_path())?;
    info!(rows = raw.len(), "preprocessing motions");

    let rows: Vec<MotionRow> = raw.into_iter().map(MotionRow::from).collect();
    let rows = filter_nan_rows(rows);
    let rows = prep_text(rows, &TrimPipeline::for_motions());
    let rows = filter_short_motions(rows, settings.min_text_chars);
    let rows = filter_titles(rows, &settings.generic_title_prefix);

    info!(rows = rows.len(), "rows remaining");
    write_training_table(&rows, &settings.training_table_path())?;
    Ok(rows.len())
}

/// Write the cleaned rows as Parquet. An empty row set still produces a file.
pub fn write_training_table(rows: &[CleanedMotionRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut df = DataFrame::new(vec![
        string_column(rows, "id", |r| r.id.clone()),
        string_column(rows, "date", |r| r.date.format(DATE_FORMAT).to_string()),
        string_column(rows, "file_date", |r| {
            r.file_date.format(DATE_FORMAT).to_string()
        }),
        string_column(rows, "title", |r| r.title.clone()),
        string_column(rows, "subtitle", |r| r.subtitle.clone()),
        string_column(rows, "text", |r| r.text.clone()),
        string_column(rows, "main_author", |r| r.main_author.clone()),
        string_column(rows, "author_party", |r| r.author_party.clone()),
    ])?;
    let file = File::create(path).with_context(|| format!("create {path:?}"))?;
    ParquetWriter::new(file).finish(&mut df)?;
    info!(path = %path.display(), rows = rows.len(), "wrote training table");
    Ok(())
}

fn string_column(
    rows: &[CleanedMotionRecord],
    name: &str,
    value: impl Fn(&CleanedMotionRecord) -> String,
) -> Series {
    let values: Vec<String> = rows.iter().map(value).collect();
    Series::new(name.into(), values)
}

/// Read the `text`/`title` columns back from a training table.
pub fn read_training_examples(path: &Path) -> Result<Vec<TrainingExample>> {
    if !path.exists() {
        return Err(DatasetError::NoData(path.to_path_buf()).into());
    }
    let df = ParquetReader::new(File::open(path)?).finish()?;
    let text_col = df.column("text")?.str()?;
    let title_col = df.column("title")?.str()?;
    let mut examples = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if let (Some(text), Some(title)) = (text_col.get(idx), title_col.get(idx)) {
            examples.push(TrainingExample {
                text: text.to_string(),
                title: title.to_string(),
            });
        }
    }
    Ok(examples)
}
