//! Zip archive reader: one JSON document per entry, one motion per document.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};
use zip::ZipArchive;

use crate::{
    data::record::{RawMotionRecord, SkipReason, Stakeholder, WITHDRAWN_TITLE},
    text::html,
};

/// Upper bound on the pre-allocation for one decompressed entry.
const ENTRY_CAPACITY_HINT_MAX: u64 = 64 << 20;

/// Records parsed from one archive plus what was skipped on the way.
#[derive(Debug, Default)]
pub struct ArchiveReport {
    pub records: Vec<RawMotionRecord>,
    pub total: usize,
    /// Skip counts keyed by [`SkipReason::kind`].
    pub skipped: BTreeMap<&'static str, usize>,
}

impl ArchiveReport {
    fn record_skip(&mut self, reason: &SkipReason) {
        *self.skipped.entry(reason.kind()).or_insert(0) += 1;
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    fn merge(&mut self, other: ArchiveReport) {
        self.records.extend(other.records);
        self.total += other.total;
        for (kind, count) in other.skipped {
            *self.skipped.entry(kind).or_insert(0) += count;
        }
    }
}

/// Pre-allocation for an entry whose header declares `declared` bytes.
/// Header sizes are untrusted, so the hint is capped.
pub fn entry_capacity_hint(declared: u64) -> usize {
    declared.min(ENTRY_CAPACITY_HINT_MAX) as usize
}

/// Parse one archive entry into a record.
pub fn parse_motion_entry(bytes: &[u8]) -> Result<RawMotionRecord, SkipReason> {
    let raw = std::str::from_utf8(bytes).map_err(|_| SkipReason::NotUtf8)?;
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let value: Value =
        serde_json::from_str(raw).map_err(|err| SkipReason::InvalidJson(err.to_string()))?;
    parse_motion(&value)
}

/// Read a motion out of a decoded `dokumentstatus` document.
pub fn parse_motion(value: &Value) -> Result<RawMotionRecord, SkipReason> {
    let status = value
        .get("dokumentstatus")
        .ok_or_else(|| missing("dokumentstatus", None, None))?
        .as_object()
        .ok_or(SkipReason::DocumentNotMapping)?;
    let document = status
        .get("dokument")
        .ok_or_else(|| missing("dokument", None, None))?
        .as_object()
        .ok_or(SkipReason::DocumentNotMapping)?;

    let title = required_str(document, "titel", None, None)?;
    if title == WITHDRAWN_TITLE {
        return Err(SkipReason::Withdrawn);
    }
    let id = required_str(document, "dok_id", None, Some(&title))?;

    let fields = DocFields {
        document,
        id: &id,
        title: &title,
    };
    let date = fields.nullable_str("datum")?;
    let file_date = fields.nullable_str("systemdatum")?;
    let subtitle = fields.nullable_str("subtitel")?;
    let html_body = required_str(document, "html", Some(&id), Some(&title))?;

    let stakeholders = status
        .get("dokintressent")
        .ok_or_else(|| fields.missing("dokintressent"))?
        .as_object()
        .ok_or(SkipReason::WrongType {
            key: "dokintressent",
        })?
        .get("intressent")
        .ok_or_else(|| fields.missing("intressent"))?;
    let stakeholder = Stakeholder::from_value(stakeholders).map_err(|err| match err {
        SkipReason::MissingKey { key, .. } => fields.missing(key),
        other => other,
    })?;
    let (main_author, author_party) = stakeholder
        .main_author()
        .map(|a| (a.name.clone(), a.party.clone()))
        .unwrap_or_default();

    Ok(RawMotionRecord {
        text: html::extract_text(&html_body),
        id,
        date,
        file_date,
        title,
        subtitle,
        main_author,
        author_party,
    })
}

struct DocFields<'a> {
    document: &'a Map<String, Value>,
    id: &'a str,
    title: &'a str,
}

impl DocFields<'_> {
    fn missing(&self, key: &'static str) -> SkipReason {
        missing(key, Some(self.id), Some(self.title))
    }

    fn nullable_str(&self, key: &'static str) -> Result<Option<String>, SkipReason> {
        match self.document.get(key) {
            None => Err(self.missing(key)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(SkipReason::WrongType { key }),
        }
    }
}

fn missing(key: &'static str, id: Option<&str>, title: Option<&str>) -> SkipReason {
    SkipReason::MissingKey {
        key,
        id: id.map(str::to_string),
        title: title.map(str::to_string),
    }
}

fn required_str(
    document: &Map<String, Value>,
    key: &'static str,
    id: Option<&str>,
    title: Option<&str>,
) -> Result<String, SkipReason> {
    match document.get(key) {
        None => Err(missing(key, id, title)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SkipReason::WrongType { key }),
    }
}

/// Parse every entry of a zip archive, in archive order.
///
/// Entries that fail to parse are logged and counted, never fatal. Only a
/// file that is not a readable zip archive is an error.
#[instrument]
pub fn read_motions_from_archive(path: &Path) -> Result<ArchiveReport> {
    let file = File::open(path).with_context(|| format!("open archive {path:?}"))?;
    let mut archive = ZipArchive::new(file).with_context(|| format!("read archive {path:?}"))?;

    let mut report = ArchiveReport::default();
    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(index = i, %err, "unreadable archive entry");
                report.total += 1;
                report.record_skip(&SkipReason::Unreadable(err.to_string()));
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        report.total += 1;

        let name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(entry_capacity_hint(entry.size()));
        if let Err(err) = entry.read_to_end(&mut bytes) {
            warn!(entry = %name, %err, "failed to decompress entry");
            report.record_skip(&SkipReason::Unreadable(err.to_string()));
            continue;
        }

        match parse_motion_entry(&bytes) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                debug!(entry = %name, kind = reason.kind(), %reason, "skipped motion");
                report.record_skip(&reason);
            }
        }
    }

    info!(
        archive = %path.display(),
        parsed = report.records.len(),
        total = report.total,
        skipped = report.skipped_total(),
        "parsed motions from archive"
    );
    Ok(report)
}

/// `*.zip` files directly under `dir`, sorted by file name.
pub fn list_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("list archives in {dir:?}"))? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("zip") {
            archives.push(path);
        }
    }
    archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(archives)
}

/// Read every archive in `zip_dir` and overwrite the raw store at `output`.
#[instrument]
pub fn read_archives_to_store(zip_dir: &Path, output: &Path) -> Result<ArchiveReport> {
    info!(dir = %zip_dir.display(), "reading motions from zip archives");
    let mut combined = ArchiveReport::default();
    for archive in list_archives(zip_dir)? {
        combined.merge(read_motions_from_archive(&archive)?);
    }

    write_raw_store(&combined.records, output)?;
    info!(
        path = %output.display(),
        records = combined.records.len(),
        skipped = ?combined.skipped,
        "saved raw motion store"
    );
    Ok(combined)
}

/// Write records as JSON Lines, truncating any previous store.
pub fn write_raw_store(records: &[RawMotionRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("create {path:?}"))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
