//! CLI entry-point for parsing archives into the raw store.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, data};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    data::archive::read_archives_to_store(&settings.zip_dir(), &settings.raw_store_path())?;
    Ok(())
}
