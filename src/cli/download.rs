//! CLI entry-point for downloading motion archives.

use anyhow::Result;
use tracing::{info, instrument};

use crate::{config::Settings, data};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let downloaded = data::catalogue::download_motion_archives(&settings).await?;
    for path in &downloaded {
        info!(path = %path.display(), "new archive");
    }
    Ok(())
}
