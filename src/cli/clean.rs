//! CLI entry-point for cleaning one motion text.

use anyhow::Result;
use clap::Args as ClapArgs;
use tokio::io::AsyncReadExt;
use tracing::instrument;

use crate::{
    config::Settings,
    text::{self, InputVerdict},
};

/// Args for the `clean` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Motion text; read from stdin when omitted.
    pub text: Option<String>,
}

#[instrument(skip_all)]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    match text::clean_input_text(&input, &settings) {
        InputVerdict::Ready(cleaned) => println!("{cleaned}"),
        verdict => {
            if let Some(message) = verdict.message() {
                println!("{message}");
            }
        }
    }
    Ok(())
}
