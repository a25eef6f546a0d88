//! Dataset catalogue of the parliament open data service and archive downloads.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::Settings;

/// One `<dataset>` of the catalogue. Unknown elements are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogueEntry {
    /// Document type, `mot` for motions.
    #[serde(default)]
    pub typ: String,
    #[serde(default)]
    pub format: String,
    /// File name the archive is stored under locally.
    #[serde(default)]
    pub filnamn: String,
    /// Archive location relative to the service root.
    #[serde(default)]
    pub url: String,
}

impl CatalogueEntry {
    /// Last path component of `filnamn`, so the catalogue cannot point outside the archive dir.
    pub fn local_name(&self) -> Option<&str> {
        Path::new(&self.filnamn)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
    }

    pub fn archive_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.url.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct DatasetList {
    #[serde(rename = "dataset", default)]
    datasets: Vec<CatalogueEntry>,
}

/// Parse the `<datasetlista>` catalogue document.
pub fn parse_catalogue(xml: &str) -> Result<Vec<CatalogueEntry>> {
    let list: DatasetList = from_str(xml).context("parse dataset catalogue")?;
    Ok(list.datasets)
}

/// Entries of the wanted document type and file format.
pub fn select_archives<'a>(
    entries: &'a [CatalogueEntry],
    document_type: &str,
    file_format: &str,
) -> Vec<&'a CatalogueEntry> {
    entries
        .iter()
        .filter(|entry| entry.typ == document_type && entry.format == file_format)
        .collect()
}

pub async fn fetch_catalogue(client: &Client, settings: &Settings) -> Result<Vec<CatalogueEntry>> {
    info!(url = %settings.catalogue_url, "fetching dataset catalogue");
    let xml = client
        .get(&settings.catalogue_url)
        .send()
        .await
        .with_context(|| format!("request {}", settings.catalogue_url))?
        .error_for_status()?
        .text()
        .await?;
    parse_catalogue(&xml)
}

/// Download every motion archive that is not on disk yet. Returns the new files.
///
/// Any network failure aborts the run; there is no retry.
#[instrument(skip(settings))]
pub async fn download_motion_archives(settings: &Settings) -> Result<Vec<PathBuf>> {
    let client = http_client(settings)?;
    let entries = fetch_catalogue(&client, settings).await?;
    let selected = select_archives(&entries, &settings.document_type, &settings.file_format);
    info!(
        catalogue = entries.len(),
        selected = selected.len(),
        base = %settings.dataset_base_url,
        "downloading archives"
    );

    let dest_root = settings.zip_dir();
    tokio::fs::create_dir_all(&dest_root).await?;

    let mut downloaded = Vec::new();
    for entry in selected {
        let name = entry
            .local_name()
            .ok_or_else(|| anyhow!("catalogue entry without file name: {entry:?}"))?;
        let dest = dest_root.join(name);
        if dest.is_file() {
            debug!(path = %dest.display(), "using cached archive");
            continue;
        }
        let url = entry.archive_url(&settings.dataset_base_url);
        download_archive(&client, &url, &dest).await?;
        downloaded.push(dest);
    }

    info!(downloaded = downloaded.len(), "archive download finished");
    Ok(downloaded)
}

async fn download_archive(client: &Client, url: &str, dest: &Path) -> Result<()> {
    debug!(%url, path = %dest.display(), "downloading archive");
    let bytes = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request {url}"))?
        .error_for_status()?
        .bytes()
        .await
        .with_context(|| format!("read body of {url}"))?;

    // partial downloads must not look cached on the next run
    let partial = dest.with_extension("part");
    tokio::fs::write(&partial, &bytes)
        .await
        .with_context(|| format!("write {partial:?}"))?;
    tokio::fs::rename(&partial, dest)
        .await
        .with_context(|| format!("rename {partial:?}"))?;
    info!(path = %dest.display(), size = bytes.len(), "downloaded archive");
    Ok(())
}

fn http_client(settings: &Settings) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!("motion-prep/", env!("CARGO_PKG_VERSION")))
        .timeout(settings.download_timeout)
        .gzip(true)
        .brotli(true)
        .build()?)
}
