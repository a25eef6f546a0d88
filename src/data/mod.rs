//! Data ingestion: archive download, parsing and training table assembly.

pub mod archive;
pub mod catalogue;
pub mod dataset;
pub mod record;

use anyhow::Result;
use tracing::info;

use crate::config::Settings;

/// What a full run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub reparsed: bool,
    pub rows: usize,
}

/// Download, parse when needed, then preprocess.
///
/// Archives are re-read into the raw store when anything new was downloaded
/// or the store does not exist yet.
pub async fn get_data(settings: &Settings, skip_download: bool) -> Result<RunSummary> {
    let downloaded = if skip_download {
        info!("skipping archive download");
        Vec::new()
    } else {
        catalogue::download_motion_archives(settings).await?
    };

    let raw_store = settings.raw_store_path();
    let reparsed = !downloaded.is_empty() || !raw_store.exists();
    if reparsed {
        archive::read_archives_to_store(&settings.zip_dir(), &raw_store)?;
    } else {
        info!(path = %raw_store.display(), "raw store is up to date");
    }

    let rows = dataset::prep_training_dataset(settings)?;
    Ok(RunSummary {
        downloaded: downloaded.len(),
        reparsed,
        rows,
    })
}
