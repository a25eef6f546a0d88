//! `motion-prep` binary: download, parse and clean parliamentary motions.

use anyhow::Result;
use motion_prep::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // parse first so `--help` exits before the data dir is created
    let cli = Cli::parse();
    logging::init_tracing()?;
    let settings = Settings::load()?;

    info!(command = ?cli, data_dir = %settings.data_dir.display(), "motion-prep starting");
    cli.dispatch(settings).await
}
