//! CLI entry-point for the whole pipeline.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, data};

/// Args for the `run` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Work from the archives already on disk.
    #[arg(long)]
    pub skip_download: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let summary = data::get_data(&settings, args.skip_download).await?;
    info!(
        downloaded = summary.downloaded,
        reparsed = summary.reparsed,
        rows = summary.rows,
        path = %settings.training_table_path().display(),
        "training data ready"
    );
    Ok(())
}
