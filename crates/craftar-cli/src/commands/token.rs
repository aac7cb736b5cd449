//! Collection token subcommands.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use craftar::ResourceKind;

use crate::settings::Context;

#[derive(Args, Debug)]
pub struct TokenCommand {
    #[command(subcommand)]
    pub command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TokenSubcommand {
    /// Create a recognition token for a collection
    Create {
        /// Collection the token grants access to
        #[arg(long)]
        collection: String,
    },
}

pub async fn handle(cmd: TokenCommand, ctx: &Context) -> Result<()> {
    match cmd.command {
        TokenSubcommand::Create { collection } => {
            let collection = super::identifier(ResourceKind::Collection, &collection)?;
            let created = ctx
                .resources()?
                .create_token(&collection)
                .await
                .context("Failed to create token")?;

            super::collection::report_created(ResourceKind::Token, created)
        }
    }
}
