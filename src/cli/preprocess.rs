//! CLI entry-point for building the training table.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, data};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    data::dataset::prep_training_dataset(&settings)?;
    Ok(())
}
