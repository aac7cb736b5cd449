//! Get command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::settings::Context;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource kind
    pub kind: String,

    /// Resource identifier
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, ctx: &Context) -> Result<()> {
    let kind = super::kind(ctx, &args.kind)?;
    let id = super::identifier(kind, &args.id)?;

    let record = ctx
        .resources()?
        .get(kind, &id)
        .await
        .with_context(|| format!("Failed to get {kind} {id}"))?;

    output::value(&record, args.pretty)
}
