//! Search command implementation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use craftar::{ResourceKind, SearchOptions};

use crate::output;
use crate::settings::Context;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Collection token
    #[arg(long)]
    pub token: String,

    /// Query image file
    pub file: PathBuf,

    /// Keep colors instead of converting to grayscale
    #[arg(long)]
    pub color: bool,

    /// Target size for the shorter side of the query
    #[arg(long, conflicts_with = "no_resize")]
    pub min_size: Option<u32>,

    /// Send the query at its original size
    #[arg(long)]
    pub no_resize: bool,

    /// Embed custom data in the results
    #[arg(long)]
    pub embed_custom: bool,

    /// Embed tracking data in the results
    #[arg(long)]
    pub embed_tracking: bool,

    /// Return bounding boxes
    #[arg(long)]
    pub bbox: bool,

    /// Application used to sign tracking data
    #[arg(long)]
    pub app_id: Option<String>,

    /// Search strategy
    #[arg(long, default_value = "none")]
    pub strategy: String,

    /// Application version
    #[arg(long)]
    pub app_version: Option<String>,

    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,
}

impl SearchArgs {
    fn options(&self, ctx: &Context) -> SearchOptions {
        let mut options = SearchOptions::from_config(&ctx.config);
        options.embed_custom = self.embed_custom;
        options.embed_tracking = self.embed_tracking;
        options.bbox = self.bbox;
        options.app_id = self.app_id.clone();
        options.strategy = self.strategy.clone();
        options.version = self.app_version.clone();

        options.image.desaturate = !self.color;
        options.image.verbose = ctx.verbose;
        if self.no_resize {
            options.image.min_size = None;
        } else if let Some(min_size) = self.min_size {
            options.image.min_size = Some(min_size);
        }
        options
    }
}

pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let token = super::identifier(ResourceKind::Token, &args.token)?;
    let options = args.options(ctx);

    let response = ctx
        .recognition()?
        .search_path(&token, &args.file, &options)
        .await
        .with_context(|| format!("Search with {} failed", args.file.display()))?;

    output::value(&response, !args.compact)
}
