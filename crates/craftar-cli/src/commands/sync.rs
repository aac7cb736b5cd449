//! Sync command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use craftar::ResourceKind;

use crate::output;
use crate::settings::Context;

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Collection token
    #[arg(long)]
    pub token: String,

    /// Application identifier
    #[arg(long)]
    pub app_id: String,

    /// Application version
    #[arg(long)]
    pub app_version: String,

    /// Request an unbundled response
    #[arg(long)]
    pub unbundled: bool,

    /// Restrict the bundle to a tag
    #[arg(long)]
    pub tag: Option<String>,
}

pub async fn run(args: SyncArgs, ctx: &Context) -> Result<()> {
    let token = super::identifier(ResourceKind::Token, &args.token)?;

    let response = ctx
        .recognition()?
        .sync(
            &token,
            &args.app_id,
            &args.app_version,
            !args.unbundled,
            args.tag.as_deref(),
        )
        .await
        .context("Sync failed")?;

    output::json_pretty(&response)
}
