//! Reference image subcommands.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use craftar::ResourceKind;

use crate::settings::Context;

#[derive(Args, Debug)]
pub struct ImageCommand {
    #[command(subcommand)]
    pub command: ImageSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ImageSubcommand {
    /// Upload a reference image for an item
    Upload {
        /// Item the image belongs to
        #[arg(long)]
        item: String,

        /// Image file (JPEG or PNG)
        file: PathBuf,
    },
}

pub async fn handle(cmd: ImageCommand, ctx: &Context) -> Result<()> {
    match cmd.command {
        ImageSubcommand::Upload { item, file } => {
            let item = super::identifier(ResourceKind::Item, &item)?;
            let created = ctx
                .resources()?
                .upload_image_from_path(&item, &file)
                .await
                .with_context(|| format!("Failed to upload {}", file.display()))?;

            super::collection::report_created(ResourceKind::Image, created)
        }
    }
}
