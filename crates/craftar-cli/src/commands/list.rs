//! List command implementation.

use std::num::NonZeroU32;

use anyhow::{Context as _, Result, bail};
use clap::Args;

use craftar::{Filter, Pagination};

use crate::output;
use crate::settings::Context;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource kind (collection, item, image, token, ...)
    pub kind: String,

    /// Maximum number of resources to return
    #[arg(long, conflicts_with = "all")]
    pub limit: Option<NonZeroU32>,

    /// Number of resources to skip
    #[arg(long, conflicts_with = "all")]
    pub offset: Option<u32>,

    /// Only resources under this parent (collection for items and tokens,
    /// item for images)
    #[arg(long)]
    pub parent: Option<String>,

    /// Fetch every page
    #[arg(long)]
    pub all: bool,

    /// Page size used with --all
    #[arg(long, default_value = "50")]
    pub page_size: NonZeroU32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let kind = super::kind(ctx, &args.kind)?;

    let filter = match &args.parent {
        Some(parent) => {
            let Some(parent_kind) = kind.filter_parent() else {
                bail!("{kind} resources cannot be filtered by parent");
            };
            Some(Filter::new(parent_kind, super::identifier(parent_kind, parent)?))
        }
        None => None,
    };

    let client = ctx.resources()?;
    let records = if args.all {
        client
            .list_all(kind, args.page_size, filter.as_ref())
            .await
            .context("Failed to list resources")?
    } else {
        client
            .list(kind, Pagination::new(args.limit, args.offset), filter.as_ref())
            .await
            .context("Failed to list resources")?
    };

    if records.is_empty() {
        output::note("No resources found.");
        return Ok(());
    }

    for record in &records {
        output::value(record, args.pretty)?;
    }

    Ok(())
}
